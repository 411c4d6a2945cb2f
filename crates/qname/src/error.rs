use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("malformed qualified name '{0}': {1}")]
    Malformed(String, String),

    #[error("prefix '{0}' is already bound")]
    DuplicatePrefix(String),

    #[error("namespace '{0}' is already bound")]
    DuplicateNamespace(String),
}
