//! Action callbacks and the error type they surface.
//!
//! Three callback shapes exist, one per dispatch point: before-actions run
//! on element entry, at-actions on non-whitespace text content, and
//! after-actions on element exit. Within a pattern, actions of one kind
//! run in registration order.

use crate::context::ElementContext;
use crate::stacks::{StackError, Stacks};
use thiserror::Error;

pub type ActionResult = Result<(), ActionError>;

/// Runs on element entry with the element's context.
pub type BeforeAction = Box<dyn Fn(&mut Stacks, &ElementContext) -> ActionResult + Send + Sync>;

/// Runs on each non-whitespace text event with the enclosing element's
/// context and the text.
pub type AtAction = Box<dyn Fn(&mut Stacks, &ElementContext, &str) -> ActionResult + Send + Sync>;

/// Runs on element exit with the element's (already popped) context.
pub type AfterAction = Box<dyn Fn(&mut Stacks, &ElementContext) -> ActionResult + Send + Sync>;

/// One registration: a callback tagged with the dispatch point it fires on.
pub enum Action {
    Before(BeforeAction),
    At(AtAction),
    After(AfterAction),
}

/// A failure escaping an action. Stack misuse converts automatically;
/// anything else goes through [`ActionError::custom`] or the `String`
/// conversions.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Stack(#[from] StackError),

    #[error("{0}")]
    Message(String),

    #[error("{message}")]
    Wrapped {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ActionError {
    /// Wraps an arbitrary caller error, keeping it as the cause.
    pub fn custom(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        let source = source.into();
        Self::Wrapped {
            message: source.to_string(),
            source,
        }
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}
