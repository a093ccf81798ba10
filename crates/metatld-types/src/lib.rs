//! Foundation types for MetaTLD membership proofs.
//!
//! Every other MetaTLD crate depends on `metatld-types`.
//!
//! # Key Types
//!
//! - [`Digest`] — 32-byte SHA-256 output, hex-encoded when serialized
//! - [`Tld`] — a top-level-domain label in canonical (normalized) form

pub mod digest;
pub mod error;
pub mod tld;

pub use digest::{Digest, DIGEST_LEN};
pub use error::TypeError;
pub use tld::Tld;
