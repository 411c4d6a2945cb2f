//! Exact paths: the concrete ancestor-name chain to the node currently
//! being visited during a parse.

use crate::error::NameError;
use crate::name::QualifiedName;
use std::fmt;

/// An ordered sequence of qualified names; the root is the empty sequence.
///
/// Values are immutable: `append` and `parent` return new paths. The type
/// hashes and compares through [`QualifiedName`] identity, so it can key
/// lookup caches directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ExactPath {
    names: Vec<QualifiedName>,
}

impl ExactPath {
    /// The empty path at document level.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.names.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[QualifiedName] {
        &self.names
    }

    pub fn last(&self) -> Option<&QualifiedName> {
        self.names.last()
    }

    /// The path one level deeper, ending in `name`.
    pub fn append(&self, name: QualifiedName) -> Self {
        let mut names = self.names.clone();
        names.push(name);
        Self { names }
    }

    /// The path one level up; the root's parent is the root itself.
    pub fn parent(&self) -> Self {
        let mut names = self.names.clone();
        names.pop();
        Self { names }
    }

    /// Parses a `/`-separated sequence of qualified-name literals, e.g.
    /// `/data/{urn:ns1}datum`. Empty segments from leading, trailing or
    /// doubled slashes are ignored. Slashes inside a `{namespace}` section
    /// belong to the namespace URI, not the path.
    pub fn parse(input: &str) -> Result<Self, NameError> {
        let mut names = Vec::new();
        let mut segment = String::new();
        let mut in_namespace = false;
        for c in input.chars() {
            match c {
                '{' => {
                    in_namespace = true;
                    segment.push(c);
                }
                '}' => {
                    in_namespace = false;
                    segment.push(c);
                }
                '/' if !in_namespace => {
                    if !segment.is_empty() {
                        names.push(QualifiedName::parse(&segment)?);
                        segment.clear();
                    }
                }
                _ => segment.push(c),
            }
        }
        if !segment.is_empty() {
            names.push(QualifiedName::parse(&segment)?);
        }
        Ok(Self { names })
    }
}

impl From<Vec<QualifiedName>> for ExactPath {
    fn from(names: Vec<QualifiedName>) -> Self {
        Self { names }
    }
}

impl fmt::Display for ExactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            return write!(f, "/");
        }
        for name in &self.names {
            write!(f, "/{}", name)?;
        }
        Ok(())
    }
}
