use metatld_crypto::MerkleTree;
use tracing::{info, warn};

use crate::artifact::{RootArtifact, TreeArtifact};
use crate::error::{StoreError, StoreResult};

/// Storage for the root and tree artifacts.
///
/// All implementations must satisfy these invariants:
/// - A save replaces the previous artifact of the same kind as a whole;
///   readers never observe a partially written artifact.
/// - `load_*` returns `Ok(None)` when nothing has been saved yet.
/// - All I/O errors are propagated, never silently ignored.
pub trait ArtifactStore: Send + Sync {
    fn save_root(&self, root: &RootArtifact) -> StoreResult<()>;

    fn load_root(&self) -> StoreResult<Option<RootArtifact>>;

    fn save_tree(&self, tree: &TreeArtifact) -> StoreResult<()>;

    fn load_tree(&self) -> StoreResult<Option<TreeArtifact>>;

    /// Persist both artifacts for `tree`: tree first, then root.
    fn publish(&self, tree: &MerkleTree) -> StoreResult<RootArtifact> {
        self.save_tree(&TreeArtifact::from_tree(tree))?;
        let root = RootArtifact::from_tree(tree);
        self.save_root(&root)?;
        info!(
            root = %root.root,
            leaves = tree.leaf_count(),
            "published merkle artifacts"
        );
        Ok(root)
    }

    /// Load the tree artifact, validate it, and check it against the root
    /// artifact when one exists.
    fn load_verified_tree(&self) -> StoreResult<Option<MerkleTree>> {
        let Some(artifact) = self.load_tree()? else {
            return Ok(None);
        };
        let tree = match artifact.into_tree() {
            Ok(tree) => tree,
            Err(e) => {
                warn!(error = %e, "rejecting tree artifact");
                return Err(e);
            }
        };

        match self.load_root()? {
            Some(published) if published.root != tree.root() => {
                warn!(
                    tree = %tree.root(),
                    published = %published.root,
                    "tree artifact does not match published root"
                );
                Err(StoreError::RootMismatch {
                    tree: tree.root(),
                    root: published.root,
                })
            }
            Some(_) => Ok(Some(tree)),
            None => {
                warn!(root = %tree.root(), "tree artifact has no published root");
                Ok(Some(tree))
            }
        }
    }
}
