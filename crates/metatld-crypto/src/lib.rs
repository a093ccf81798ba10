//! Membership proofs for the MetaTLD authorized-TLD set.
//!
//! Provides SHA-256 hashing, leaf encoding for normalized TLDs, a binary
//! Merkle tree with inclusion proofs, and a verifier that needs nothing but
//! the TLD, the proof and the published root.
//!
//! All hashing wraps the `sha2` crate — no custom cryptography.

pub mod error;
pub mod hasher;
pub mod leaf;
pub mod merkle;
pub mod proof;
pub mod verifier;

pub use error::{MerkleError, MerkleResult};
pub use hasher::Sha256Hasher;
pub use leaf::LeafEncoder;
pub use merkle::MerkleTree;
pub use proof::{MerkleProof, ProofPayload, ProofStep, ProofStepPayload, Side, MAX_PROOF_DEPTH};
pub use verifier::ProofVerifier;
