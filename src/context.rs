//! Per-element context handed to actions: the element's name, its resolved
//! attributes, and the namespace bindings in force at it.

use devour_qname::{NamespaceScope, QualifiedName};
use std::collections::HashMap;

/// Snapshot of one element, built on start-element and consumed by the
/// actions dispatched for it. Never outlives the element's subtree.
#[derive(Debug, Clone)]
pub struct ElementContext {
    name: QualifiedName,
    attributes: HashMap<QualifiedName, String>,
    namespaces: NamespaceScope,
}

impl ElementContext {
    pub fn new(
        name: QualifiedName,
        attributes: HashMap<QualifiedName, String>,
        namespaces: NamespaceScope,
    ) -> Self {
        Self {
            name,
            attributes,
            namespaces,
        }
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn attributes(&self) -> &HashMap<QualifiedName, String> {
        &self.attributes
    }

    /// The live namespace bindings at this element, for resolving prefixed
    /// attribute names.
    pub fn namespaces(&self) -> &NamespaceScope {
        &self.namespaces
    }

    /// An attribute without a namespace, by local name.
    pub fn attr(&self, local_name: &str) -> Option<&str> {
        self.attr_named(&QualifiedName::local(local_name))
    }

    pub fn attr_named(&self, name: &QualifiedName) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// A namespaced attribute, with the prefix resolved through the live
    /// scope. `None` when the prefix is unbound or the attribute absent.
    pub fn attr_prefixed(&self, prefix: &str, local_name: &str) -> Option<&str> {
        let name = self.namespaces.qualify(local_name, Some(prefix))?;
        self.attr_named(&name)
    }
}
