//! The registration model: accumulating `(pattern, kind, action)` triples
//! and freezing them into an immutable mapping.

use crate::action::{Action, ActionResult, AfterAction, AtAction, BeforeAction};
use crate::context::ElementContext;
use crate::error::MappingError;
use crate::stacks::Stacks;
use devour_pattern::{PathPattern, PatternGroup, PatternGroupProvider, default_group_provider};
use devour_qname::{ExactPath, NamespaceContext};
use std::collections::HashMap;
use std::sync::Arc;

/// The three ordered action lists attached to one pattern. Each list
/// preserves the order its actions were registered in; ordering across
/// kinds is irrelevant.
#[derive(Default)]
pub struct ActionBundle {
    before: Vec<BeforeAction>,
    at: Vec<AtAction>,
    after: Vec<AfterAction>,
}

impl ActionBundle {
    fn add(&mut self, action: Action) {
        match action {
            Action::Before(action) => self.before.push(action),
            Action::At(action) => self.at.push(action),
            Action::After(action) => self.after.push(action),
        }
    }

    pub fn before_actions(&self) -> &[BeforeAction] {
        &self.before
    }

    pub fn at_actions(&self) -> &[AtAction] {
        &self.at
    }

    pub fn after_actions(&self) -> &[AfterAction] {
        &self.after
    }

    fn len(&self) -> usize {
        self.before.len() + self.at.len() + self.after.len()
    }
}

/// The immutable product of configuration: action bundles keyed by
/// pattern, the pattern group resolving paths to patterns, and the
/// namespace context patterns resolve prefixes through.
///
/// The namespace context is owned here and never mutated afterwards; the
/// pattern-group cache relies on that.
pub struct Mapping {
    bundles: HashMap<PathPattern, ActionBundle>,
    group: Arc<dyn PatternGroup>,
    namespaces: NamespaceContext,
}

impl Mapping {
    pub fn builder() -> MappingBuilder {
        MappingBuilder::new()
    }

    pub fn namespaces(&self) -> &NamespaceContext {
        &self.namespaces
    }

    /// Resolves an exact path to the action bundle responsible for it, if
    /// any pattern matches.
    pub(crate) fn lookup(&self, path: &ExactPath) -> Option<&ActionBundle> {
        let pattern = self.group.lookup(path, &self.namespaces)?;
        self.bundles.get(&pattern)
    }
}

/// Accumulates registrations in caller order. Patterns are parsed eagerly,
/// so configuration mistakes surface here and never inside a parse.
pub struct MappingBuilder {
    order: Vec<PathPattern>,
    bundles: HashMap<PathPattern, ActionBundle>,
    namespaces: NamespaceContext,
    group_provider: PatternGroupProvider,
}

impl MappingBuilder {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            bundles: HashMap::new(),
            namespaces: NamespaceContext::new(),
            group_provider: default_group_provider(),
        }
    }

    /// Binds a namespace URI to the prefix patterns will use for it.
    pub fn namespace(
        mut self,
        uri: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Result<Self, MappingError> {
        self.namespaces.bind(uri, prefix)?;
        Ok(self)
    }

    /// Merges a pre-built namespace context into the configuration.
    pub fn namespaces(mut self, context: &NamespaceContext) -> Result<Self, MappingError> {
        self.namespaces.merge(context)?;
        Ok(self)
    }

    /// Replaces the pattern-group provider (the caching group by default).
    pub fn group_provider(mut self, provider: PatternGroupProvider) -> Self {
        self.group_provider = provider;
        self
    }

    /// Registers one action against a pattern string.
    pub fn register(mut self, pattern: &str, action: Action) -> Result<Self, MappingError> {
        let pattern = PathPattern::parse(pattern)?;
        if !self.bundles.contains_key(&pattern) {
            self.order.push(pattern.clone());
        }
        self.bundles.entry(pattern).or_default().add(action);
        Ok(self)
    }

    /// Registers a before-action: runs on entry to matching elements.
    pub fn on_start<F>(self, pattern: &str, action: F) -> Result<Self, MappingError>
    where
        F: Fn(&mut Stacks, &ElementContext) -> ActionResult + Send + Sync + 'static,
    {
        self.register(pattern, Action::Before(Box::new(action)))
    }

    /// Registers an at-action: runs on non-whitespace text content of
    /// matching elements.
    pub fn on_text<F>(self, pattern: &str, action: F) -> Result<Self, MappingError>
    where
        F: Fn(&mut Stacks, &ElementContext, &str) -> ActionResult + Send + Sync + 'static,
    {
        self.register(pattern, Action::At(Box::new(action)))
    }

    /// Registers an after-action: runs on exit from matching elements.
    pub fn on_end<F>(self, pattern: &str, action: F) -> Result<Self, MappingError>
    where
        F: Fn(&mut Stacks, &ElementContext) -> ActionResult + Send + Sync + 'static,
    {
        self.register(pattern, Action::After(Box::new(action)))
    }

    /// Freezes the registrations into an immutable [`Mapping`].
    pub fn build(self) -> Mapping {
        let actions: usize = self.bundles.values().map(ActionBundle::len).sum();
        log::debug!(
            "compiled mapping: {} patterns, {} actions",
            self.order.len(),
            actions
        );
        let group = (self.group_provider)(self.order);
        Mapping {
            bundles: self.bundles,
            group,
            namespaces: self.namespaces,
        }
    }
}

impl Default for MappingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
