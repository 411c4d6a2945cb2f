//! Identity primitives for the devour XML mapper: qualified names, the
//! configured namespace context, the live per-element namespace scope, and
//! exact ancestor paths.

pub mod context;
pub mod error;
pub mod name;
pub mod path;
pub mod scope;

pub use context::NamespaceContext;
pub use error::NameError;
pub use name::QualifiedName;
pub use path::ExactPath;
pub use scope::NamespaceScope;
