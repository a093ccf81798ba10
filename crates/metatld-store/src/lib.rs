//! Persistence of MetaTLD Merkle artifacts.
//!
//! Two artifacts are kept, both derived data that can always be rebuilt from
//! the canonical TLD list:
//!
//! - [`RootArtifact`] -- the published root, `{"root": "<hex>"}`
//! - [`TreeArtifact`] -- every level of the tree, so proofs can be served
//!   without rehashing the TLD list
//!
//! # Storage Backends
//!
//! All backends implement the [`ArtifactStore`] trait:
//!
//! - [`InMemoryArtifactStore`] -- lock-protected store for tests and embedding
//! - [`FsArtifactStore`] -- pretty-printed JSON files, replaced atomically
//!
//! # Design Rules
//!
//! 1. Persisting is an explicit step; building a tree never writes anything.
//! 2. The tree artifact is written before the root, so a published root
//!    always has a matching tree behind it.
//! 3. A loaded tree is re-validated level by level and checked against the
//!    root artifact before it is used.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod artifact;
pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use artifact::{RootArtifact, TreeArtifact};
pub use error::{StoreError, StoreResult};
pub use fs::{FsArtifactStore, StoreConfig};
pub use memory::InMemoryArtifactStore;
pub use traits::ArtifactStore;
