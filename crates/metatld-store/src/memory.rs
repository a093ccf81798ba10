use std::sync::RwLock;

use crate::artifact::{RootArtifact, TreeArtifact};
use crate::error::StoreResult;
use crate::traits::ArtifactStore;

/// In-memory artifact store.
///
/// Intended for tests and embedding. Artifacts are held behind `RwLock`s
/// and cloned on read/write.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    root: RwLock<Option<RootArtifact>>,
    tree: RwLock<Option<TreeArtifact>>,
}

impl InMemoryArtifactStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove both artifacts.
    pub fn clear(&self) {
        *self.root.write().expect("lock poisoned") = None;
        *self.tree.write().expect("lock poisoned") = None;
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn save_root(&self, root: &RootArtifact) -> StoreResult<()> {
        *self.root.write().expect("lock poisoned") = Some(*root);
        Ok(())
    }

    fn load_root(&self) -> StoreResult<Option<RootArtifact>> {
        Ok(*self.root.read().expect("lock poisoned"))
    }

    fn save_tree(&self, tree: &TreeArtifact) -> StoreResult<()> {
        *self.tree.write().expect("lock poisoned") = Some(tree.clone());
        Ok(())
    }

    fn load_tree(&self) -> StoreResult<Option<TreeArtifact>> {
        Ok(self.tree.read().expect("lock poisoned").clone())
    }
}

impl std::fmt::Debug for InMemoryArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let root = *self.root.read().expect("lock poisoned");
        f.debug_struct("InMemoryArtifactStore")
            .field("root", &root.map(|r| r.root))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use metatld_crypto::MerkleTree;

    #[test]
    fn empty_store_loads_nothing() {
        let store = InMemoryArtifactStore::new();
        assert!(store.load_root().unwrap().is_none());
        assert!(store.load_tree().unwrap().is_none());
        assert!(store.load_verified_tree().unwrap().is_none());
    }

    #[test]
    fn publish_then_load() {
        let store = InMemoryArtifactStore::new();
        let tree = MerkleTree::build(["com", "io", "xyz"]).unwrap();
        let root = store.publish(&tree).unwrap();
        assert_eq!(root.root, tree.root());

        let loaded = store.load_verified_tree().unwrap().unwrap();
        assert_eq!(loaded.root(), tree.root());
        assert_eq!(store.load_root().unwrap(), Some(root));
    }

    #[test]
    fn republish_replaces_artifacts() {
        let store = InMemoryArtifactStore::new();
        store.publish(&MerkleTree::build(["com"]).unwrap()).unwrap();
        let second = MerkleTree::build(["com", "io"]).unwrap();
        store.publish(&second).unwrap();
        assert_eq!(store.load_verified_tree().unwrap().unwrap().root(), second.root());
    }

    #[test]
    fn mismatched_root_is_detected() {
        let store = InMemoryArtifactStore::new();
        store.publish(&MerkleTree::build(["com", "io"]).unwrap()).unwrap();
        let other = MerkleTree::build(["net"]).unwrap();
        store.save_root(&RootArtifact::from_tree(&other)).unwrap();

        assert!(matches!(
            store.load_verified_tree(),
            Err(StoreError::RootMismatch { .. })
        ));
    }

    #[test]
    fn unsupported_tree_version_is_rejected() {
        let store = InMemoryArtifactStore::new();
        let tree = MerkleTree::build(["com", "io"]).unwrap();
        store.publish(&tree).unwrap();
        let mut artifact = TreeArtifact::from_tree(&tree);
        artifact.version = TreeArtifact::VERSION + 1;
        store.save_tree(&artifact).unwrap();

        assert!(matches!(
            store.load_verified_tree(),
            Err(StoreError::UnsupportedVersion { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn tampered_tree_levels_are_rejected() {
        let store = InMemoryArtifactStore::new();
        let tree = MerkleTree::build(["com", "io", "xyz"]).unwrap();
        store.publish(&tree).unwrap();
        let mut artifact = TreeArtifact::from_tree(&tree);
        artifact.levels[0][1] = artifact.levels[0][1].with_bit_flipped(0);
        store.save_tree(&artifact).unwrap();

        assert!(matches!(
            store.load_verified_tree(),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn tree_without_root_still_loads() {
        let store = InMemoryArtifactStore::new();
        let tree = MerkleTree::build(["com", "io"]).unwrap();
        store.save_tree(&TreeArtifact::from_tree(&tree)).unwrap();
        assert_eq!(store.load_verified_tree().unwrap().unwrap().root(), tree.root());
    }

    #[test]
    fn clear_removes_everything() {
        let store = InMemoryArtifactStore::new();
        store.publish(&MerkleTree::build(["com"]).unwrap()).unwrap();
        store.clear();
        assert!(store.load_root().unwrap().is_none());
        assert!(store.load_tree().unwrap().is_none());
    }
}
