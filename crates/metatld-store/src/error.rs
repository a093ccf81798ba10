use metatld_crypto::MerkleError;
use metatld_types::Digest;

/// Errors from artifact store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The tree artifact does not describe a valid tree.
    #[error("corrupt tree artifact: {0}")]
    Corrupt(#[from] MerkleError),

    /// The tree artifact and the root artifact disagree.
    #[error("tree artifact root {tree} does not match published root {root}")]
    RootMismatch { tree: Digest, root: Digest },

    /// The artifact was written by an incompatible format version.
    #[error("unsupported artifact version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
