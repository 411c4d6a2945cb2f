//! # devour
//!
//! A declarative, streaming XML-to-structure mapper. Callers register
//! callbacks against tree-path patterns; a single pass over the XML event
//! stream dispatches them as matching elements are entered, have text
//! content, and are exited, accumulating results in a named stack store.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use devour::{Devourer, Mapping};
//!
//! let mapping = Mapping::builder()
//!     .on_start("/data/datum", |stacks, context| {
//!         stacks.push(context.attr("id").unwrap_or("").to_string());
//!         Ok(())
//!     })?
//!     .on_text("/data/datum/name", |stacks, _, text| {
//!         stacks.push_to("names", text.to_string());
//!         Ok(())
//!     })?
//!     .build();
//!
//! let devourer = Devourer::new(mapping);
//! let stacks = devourer.parse("<data><datum id=\"34\"><name>N</name></datum></data>")?;
//! ```
//!
//! Patterns support `*` name and prefix wildcards and the multi-level `**`
//! wildcard; namespaced segments resolve prefixes through the namespace
//! context configured on the builder. The compiled [`Mapping`] is
//! immutable and one [`Devourer`] may run any number of concurrent
//! parses, each with its own [`Stacks`].

pub mod action;
pub mod context;
pub mod devourer;
pub mod error;
pub mod mapping;
pub mod stacks;

pub use action::{Action, ActionError, ActionResult, AfterAction, AtAction, BeforeAction};
pub use context::ElementContext;
pub use devourer::Devourer;
pub use error::{DevourError, MappingError};
pub use mapping::{ActionBundle, Mapping, MappingBuilder};
pub use stacks::{MAIN_STACK, StackError, Stacks};

pub use devour_pattern::{
    CachedPatternGroup, DEFAULT_CACHE_CAPACITY, LiteralElement, PathPattern, PatternElement,
    PatternError, PatternGroup, PatternGroupProvider, SequentialPatternGroup,
};
pub use devour_qname::{ExactPath, NameError, NamespaceContext, NamespaceScope, QualifiedName};
