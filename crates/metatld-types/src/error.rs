use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("TLD is empty after normalization")]
    EmptyTld,

    #[error("TLD {tld:?} contains invalid character {ch:?}")]
    InvalidTldChar { tld: String, ch: char },
}
