//! The live namespace scope: whatever prefix bindings the tokenizer reports
//! as in force at one element. Unlike [`NamespaceContext`](crate::NamespaceContext)
//! this is not bijective; several prefixes may point at the same URI and a
//! default namespace may be in force.

use crate::name::QualifiedName;
use std::collections::HashMap;

/// Prefix -> namespace-URI bindings visible at a single element, used by
/// actions to resolve prefixed attribute names.
#[derive(Debug, Clone, Default)]
pub struct NamespaceScope {
    bindings: HashMap<String, String>,
    default_namespace: Option<String>,
}

impl NamespaceScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.bindings.insert(prefix.into(), namespace.into());
    }

    pub fn set_default(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Builds a qualified name from a local name and an optional prefix
    /// using the bindings in force at this element. Returns `None` when the
    /// prefix is unbound.
    pub fn qualify(&self, local_name: &str, prefix: Option<&str>) -> Option<QualifiedName> {
        match prefix {
            None => Some(QualifiedName::local(local_name)),
            Some(prefix) => self
                .resolve(prefix)
                .map(|ns| QualifiedName::prefixed(local_name, ns, prefix)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_allows_aliased_namespaces() {
        let mut scope = NamespaceScope::new();
        scope.bind("a", "urn:x");
        scope.bind("b", "urn:x");
        assert_eq!(scope.resolve("a"), Some("urn:x"));
        assert_eq!(scope.resolve("b"), Some("urn:x"));
    }

    #[test]
    fn test_default_namespace() {
        let mut scope = NamespaceScope::new();
        scope.set_default("urn:default");
        assert_eq!(scope.default_namespace(), Some("urn:default"));
        // An unprefixed lookup still yields a no-namespace name; the
        // default namespace never applies to attributes.
        assert!(scope.qualify("id", None).unwrap().namespace().is_none());
    }

    #[test]
    fn test_qualify_unbound_prefix() {
        let scope = NamespaceScope::new();
        assert!(scope.qualify("id", Some("p")).is_none());
    }
}
