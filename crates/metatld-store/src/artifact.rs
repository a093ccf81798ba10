use metatld_crypto::{MerkleError, MerkleTree};
use metatld_types::Digest;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// The published commitment: a single root digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootArtifact {
    pub root: Digest,
}

impl RootArtifact {
    pub fn from_tree(tree: &MerkleTree) -> Self {
        Self { root: tree.root() }
    }
}

/// Serialized tree: every level, leaves first.
///
/// `leafCount`, `height` and `root` are redundant with `levels` and are
/// cross-checked on load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeArtifact {
    pub version: u32,
    pub leaf_count: usize,
    pub height: usize,
    pub root: Digest,
    pub levels: Vec<Vec<Digest>>,
}

impl TreeArtifact {
    /// Current on-disk format version.
    pub const VERSION: u32 = 1;

    pub fn from_tree(tree: &MerkleTree) -> Self {
        Self {
            version: Self::VERSION,
            leaf_count: tree.leaf_count(),
            height: tree.height(),
            root: tree.root(),
            levels: tree.levels().to_vec(),
        }
    }

    /// Ordered leaf digests.
    pub fn leaves(&self) -> &[Digest] {
        self.levels.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Validate the artifact and turn it back into a tree.
    pub fn into_tree(self) -> StoreResult<MerkleTree> {
        if self.version != Self::VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }

        let (leaf_count, height, root) = (self.leaf_count, self.height, self.root);
        let tree = MerkleTree::from_levels(self.levels)?;
        if tree.leaf_count() != leaf_count || tree.height() != height || tree.root() != root {
            return Err(MerkleError::CorruptTree {
                reason: format!(
                    "header says {leaf_count} leaves, height {height}, root {}; levels give {}, {}, {}",
                    root.short_hex(),
                    tree.leaf_count(),
                    tree.height(),
                    tree.root().short_hex()
                ),
            }
            .into());
        }
        Ok(tree)
    }
}
