use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("invalid path pattern '{0}': {1}")]
    Parse(String, String),
}
