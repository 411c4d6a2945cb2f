//! The configured namespace context: an immutable bijection between
//! namespace URIs and the prefixes patterns use to refer to them.

use crate::error::NameError;
use crate::name::QualifiedName;
use std::collections::HashMap;

/// Prefix <-> namespace-URI mapping fixed at configuration time and shared
/// read-only by an entire dispatcher. No duplicate URI and no duplicate
/// prefix may exist on either axis.
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    by_prefix: HashMap<String, String>,
    by_namespace: HashMap<String, String>,
}

impl NamespaceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a namespace URI to a prefix. Rebinding either side is a
    /// configuration error.
    pub fn bind(
        &mut self,
        namespace: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Result<(), NameError> {
        let namespace = namespace.into();
        let prefix = prefix.into();
        if self.by_prefix.contains_key(&prefix) {
            return Err(NameError::DuplicatePrefix(prefix));
        }
        if self.by_namespace.contains_key(&namespace) {
            return Err(NameError::DuplicateNamespace(namespace));
        }
        self.by_prefix.insert(prefix.clone(), namespace.clone());
        self.by_namespace.insert(namespace, prefix);
        Ok(())
    }

    /// Builds a context from ordered `(namespace, prefix)` pairs.
    pub fn from_pairs<N, P>(pairs: impl IntoIterator<Item = (N, P)>) -> Result<Self, NameError>
    where
        N: Into<String>,
        P: Into<String>,
    {
        let mut context = Self::new();
        for (namespace, prefix) in pairs {
            context.bind(namespace, prefix)?;
        }
        Ok(context)
    }

    /// Merges another context into this one; collisions on either axis are
    /// configuration errors.
    pub fn merge(&mut self, other: &NamespaceContext) -> Result<(), NameError> {
        for (prefix, namespace) in &other.by_prefix {
            self.bind(namespace.clone(), prefix.clone())?;
        }
        Ok(())
    }

    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.by_prefix.get(prefix).map(String::as_str)
    }

    pub fn lookup_prefix(&self, namespace: &str) -> Option<&str> {
        self.by_namespace.get(namespace).map(String::as_str)
    }

    /// Builds a qualified name from a local name and an optional prefix.
    /// Returns `None` when the prefix is not bound in this context.
    pub fn qualify(&self, local_name: &str, prefix: Option<&str>) -> Option<QualifiedName> {
        match prefix {
            None => Some(QualifiedName::local(local_name)),
            Some(prefix) => self
                .resolve(prefix)
                .map(|ns| QualifiedName::prefixed(local_name, ns, prefix)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_prefix.is_empty()
    }
}
