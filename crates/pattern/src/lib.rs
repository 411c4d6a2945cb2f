//! The path-pattern matching engine for the devour XML mapper.
//!
//! Patterns are sequences of literal segments (with `*` name/prefix
//! wildcards) and `**` global wildcards, matched against the exact ancestor
//! path of a node. Lookup happens through a [`PatternGroup`], normally the
//! LRU-caching decorator over the first-registered-first-tried group.

pub mod element;
pub mod error;
pub mod group;
pub mod pattern;

pub use element::{LiteralElement, PatternElement};
pub use error::PatternError;
pub use group::{
    CachedPatternGroup, DEFAULT_CACHE_CAPACITY, PatternGroup, PatternGroupProvider,
    SequentialPatternGroup, default_group_provider,
};
pub use pattern::PathPattern;
