//! Pattern groups: ordered first-match lookup over registered patterns,
//! plus the bounded LRU-caching decorator.

use crate::pattern::PathPattern;
use devour_qname::{ExactPath, NamespaceContext};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

/// Resolves an exact path to the registered pattern responsible for it.
///
/// Implementations must be shareable across concurrent parses; all state
/// visible through `lookup` is either immutable or internally synchronized.
pub trait PatternGroup: Send + Sync {
    fn lookup(&self, path: &ExactPath, context: &NamespaceContext) -> Option<PathPattern>;
}

/// Builds the pattern group a mapping will use for lookups, given the
/// registered patterns in first-seen order.
pub type PatternGroupProvider = Box<dyn Fn(Vec<PathPattern>) -> Arc<dyn PatternGroup> + Send + Sync>;

/// The default provider: the caching group over sequential lookup.
pub fn default_group_provider() -> PatternGroupProvider {
    Box::new(|patterns| Arc::new(CachedPatternGroup::new(SequentialPatternGroup::new(patterns))))
}

/// Tries patterns in registration order and returns the first match.
///
/// There is no specificity ranking; overlapping registrations are the
/// caller's responsibility.
#[derive(Debug, Clone, Default)]
pub struct SequentialPatternGroup {
    patterns: Vec<PathPattern>,
}

impl SequentialPatternGroup {
    pub fn new(patterns: Vec<PathPattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[PathPattern] {
        &self.patterns
    }
}

impl PatternGroup for SequentialPatternGroup {
    fn lookup(&self, path: &ExactPath, context: &NamespaceContext) -> Option<PathPattern> {
        self.patterns
            .iter()
            .find(|pattern| pattern.matches(path, context))
            .cloned()
    }
}

pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Decorator that memoizes lookups, hits and misses alike, in a bounded
/// least-recently-used cache keyed on the exact path.
///
/// The namespace context is deliberately absent from the key: a mapping's
/// context is fixed at configuration time, so every lookup against this
/// group sees the same context for the lifetime of the dispatcher.
pub struct CachedPatternGroup<G> {
    inner: G,
    cache: Mutex<LruCache<ExactPath, Option<PathPattern>>>,
}

impl<G: PatternGroup> CachedPatternGroup<G> {
    pub fn new(inner: G) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(inner: G, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl<G: PatternGroup> PatternGroup for CachedPatternGroup<G> {
    fn lookup(&self, path: &ExactPath, context: &NamespaceContext) -> Option<PathPattern> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(path) {
            return cached.clone();
        }
        let computed = self.inner.lookup(path, context);
        cache.put(path.clone(), computed.clone());
        computed
    }
}
