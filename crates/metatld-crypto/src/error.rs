use metatld_types::{Digest, TypeError};

/// Errors from tree construction, proof generation and proof decoding.
///
/// A proof that simply fails to reproduce the root is not an error; the
/// verifier reports that as `false`.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// `build` was called with no TLDs.
    #[error("cannot build a Merkle tree from an empty TLD list")]
    EmptyInput,

    /// A proof was requested for a TLD that is not a leaf of the tree.
    #[error("TLD {tld:?} is not in the tree")]
    LeafNotFound { tld: String },

    /// A proof payload could not be decoded.
    #[error("malformed proof: {reason}")]
    MalformedProof { reason: String },

    /// A TLD failed normalization.
    #[error("invalid TLD: {0}")]
    InvalidTld(#[from] TypeError),

    /// Two input entries normalize to the same TLD.
    #[error("duplicate TLD {tld:?} at positions {first} and {second}")]
    DuplicateLeaf {
        tld: String,
        first: usize,
        second: usize,
    },

    /// Level data handed to `from_levels` is inconsistent.
    #[error("corrupt tree data: {reason}")]
    CorruptTree { reason: String },

    /// Two leaf digests are equal, so positional lookup would be ambiguous.
    #[error("duplicate leaf digest {digest} at positions {first} and {second}")]
    DuplicateDigest {
        digest: Digest,
        first: usize,
        second: usize,
    },
}

impl MerkleError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedProof {
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptTree {
            reason: reason.into(),
        }
    }
}

/// Result alias for Merkle operations.
pub type MerkleResult<T> = Result<T, MerkleError>;
