//! Qualified names: a local name plus an optional namespace URI. The prefix
//! is display metadata and never takes part in identity.

use crate::error::NameError;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An element or attribute name. Two names are equal iff their local names
/// and namespace URIs are equal; the prefix a document happened to use is
/// irrelevant.
#[derive(Debug, Clone)]
pub struct QualifiedName {
    local_name: String,
    namespace: Option<String>,
    prefix: Option<String>,
}

impl QualifiedName {
    /// A name with no namespace.
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            namespace: None,
            prefix: None,
        }
    }

    /// A namespaced name without a prefix.
    pub fn namespaced(local_name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            namespace: Some(namespace.into()),
            prefix: None,
        }
    }

    /// A namespaced name carrying the prefix it was written with.
    pub fn prefixed(
        local_name: impl Into<String>,
        namespace: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            local_name: local_name.into(),
            namespace: Some(namespace.into()),
            prefix: Some(prefix.into()),
        }
    }

    /// Parses the literal grammar `['{' namespace '}'] [prefix ':'] localName`.
    ///
    /// Namespace and prefix, when present, must be non-empty, and a prefix
    /// is only legal together with a namespace.
    pub fn parse(input: &str) -> Result<Self, NameError> {
        let malformed = |reason: &str| NameError::Malformed(input.to_string(), reason.to_string());

        let (namespace, rest) = if let Some(stripped) = input.strip_prefix('{') {
            let (ns, rest) = stripped
                .split_once('}')
                .ok_or_else(|| malformed("unterminated '{namespace}' section"))?;
            if ns.is_empty() {
                return Err(malformed("namespace must not be empty"));
            }
            (Some(ns.to_string()), rest)
        } else {
            (None, input)
        };

        let (prefix, local_name) = match rest.split_once(':') {
            Some((prefix, local)) => {
                if prefix.is_empty() {
                    return Err(malformed("prefix must not be empty"));
                }
                if local.contains(':') {
                    return Err(malformed("more than one ':' separator"));
                }
                (Some(prefix.to_string()), local)
            }
            None => (None, rest),
        };

        if local_name.is_empty() {
            return Err(malformed("local name must not be empty"));
        }
        if prefix.is_some() && namespace.is_none() {
            return Err(malformed("prefix requires a namespace"));
        }

        Ok(Self {
            local_name: local_name.to_string(),
            namespace,
            prefix,
        })
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl PartialEq for QualifiedName {
    fn eq(&self, other: &Self) -> bool {
        self.local_name == other.local_name && self.namespace == other.namespace
    }
}

impl Eq for QualifiedName {}

impl Hash for QualifiedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.local_name.hash(state);
        self.namespace.hash(state);
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.namespace {
            write!(f, "{{{}}}", ns)?;
        }
        if let Some(prefix) = &self.prefix {
            write!(f, "{}:", prefix)?;
        }
        write!(f, "{}", self.local_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(name: &QualifiedName) -> u64 {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_prefix_does_not_affect_identity() {
        let plain = QualifiedName::namespaced("b", "urn:x");
        let prefixed = QualifiedName::prefixed("b", "urn:x", "p");
        assert_eq!(plain, prefixed);
        assert_eq!(hash_of(&plain), hash_of(&prefixed));
    }

    #[test]
    fn test_namespace_affects_identity() {
        let a = QualifiedName::namespaced("b", "urn:x");
        let b = QualifiedName::namespaced("b", "urn:y");
        let c = QualifiedName::local("b");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parse_local_only() {
        let name = QualifiedName::parse("item").unwrap();
        assert_eq!(name.local_name(), "item");
        assert!(name.namespace().is_none());
        assert!(name.prefix().is_none());
    }

    #[test]
    fn test_parse_full_form() {
        let name = QualifiedName::parse("{urn:ns1}p:item").unwrap();
        assert_eq!(name.local_name(), "item");
        assert_eq!(name.namespace(), Some("urn:ns1"));
        assert_eq!(name.prefix(), Some("p"));
    }

    #[test]
    fn test_parse_namespace_without_prefix() {
        let name = QualifiedName::parse("{urn:ns1}item").unwrap();
        assert_eq!(name.namespace(), Some("urn:ns1"));
        assert!(name.prefix().is_none());
    }

    #[test]
    fn test_parse_rejects_prefix_without_namespace() {
        assert!(QualifiedName::parse("p:item").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_sections() {
        assert!(QualifiedName::parse("").is_err());
        assert!(QualifiedName::parse("{}item").is_err());
        assert!(QualifiedName::parse("{urn:ns1}:item").is_err());
        assert!(QualifiedName::parse("{urn:ns1}p:").is_err());
        assert!(QualifiedName::parse("{urn:ns1").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let name = QualifiedName::parse("{urn:ns1}p:item").unwrap();
        assert_eq!(name.to_string(), "{urn:ns1}p:item");
        assert_eq!(QualifiedName::local("item").to_string(), "item");
    }
}
