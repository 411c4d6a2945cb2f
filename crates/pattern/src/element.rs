//! Pattern segments: literal name tests and the `**` global wildcard.

use devour_qname::{NamespaceContext, QualifiedName};
use std::fmt;

/// The wildcard token usable as a literal's name or prefix.
pub const WILDCARD: &str = "*";

/// A single segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternElement {
    /// A name test, e.g. `item`, `p:item`, `*:item` or `*`.
    Literal(LiteralElement),
    /// `**`: absorbs zero or more consecutive path elements. Never tested
    /// against a single name; the pattern-level matcher handles it
    /// structurally.
    Global,
}

impl fmt::Display for PatternElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternElement::Literal(literal) => literal.fmt(f),
            PatternElement::Global => write!(f, "**"),
        }
    }
}

/// A literal segment: a local-name test plus an optional prefix test.
/// Either part may be the `*` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiteralElement {
    name: String,
    prefix: Option<String>,
}

impl LiteralElement {
    pub fn new(name: impl Into<String>, prefix: Option<String>) -> Self {
        Self {
            name: name.into(),
            prefix,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Tests one qualified name. The name rule accepts `*` or an exact
    /// local-name match. The prefix rule compares namespaces: no prefix
    /// requires a name without namespace, `*` accepts any namespace, and a
    /// concrete prefix must resolve through `context` to the name's
    /// namespace URI. The name's own prefix is never consulted.
    pub fn matches(&self, name: &QualifiedName, context: &NamespaceContext) -> bool {
        if self.name != WILDCARD && self.name != name.local_name() {
            return false;
        }
        match self.prefix.as_deref() {
            None => name.namespace().is_none(),
            Some(WILDCARD) => true,
            Some(prefix) => match context.resolve(prefix) {
                Some(namespace) => name.namespace() == Some(namespace),
                // An unbound prefix matches nothing.
                None => false,
            },
        }
    }
}

impl fmt::Display for LiteralElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
