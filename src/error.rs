use crate::action::ActionError;
use devour_pattern::PatternError;
use devour_qname::NameError;
use thiserror::Error;

/// A configuration-phase failure: the dispatcher is never produced.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("namespace configuration error: {0}")]
    Namespace(#[from] NameError),
}

/// A parse-phase failure; it aborts the current call only and discards the
/// call's stack store.
#[derive(Error, Debug)]
pub enum DevourError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("text unescape error: {0}")]
    Unescape(String),

    #[error("UTF-8 string error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unbound namespace prefix '{0}'")]
    UnboundPrefix(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("action failed at {path}: {source}")]
    Action {
        path: String,
        #[source]
        source: ActionError,
    },
}
