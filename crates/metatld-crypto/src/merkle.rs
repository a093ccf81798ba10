use std::collections::HashMap;

use metatld_types::{Digest, Tld};
use tracing::debug;

use crate::error::{MerkleError, MerkleResult};
use crate::hasher::Sha256Hasher;
use crate::leaf::LeafEncoder;
use crate::proof::{MerkleProof, ProofStep, Side};

/// Binary SHA-256 Merkle tree over an ordered list of authorized TLDs.
///
/// Nodes live in a per-level arena: level 0 holds the leaf digests in input
/// order, each following level holds the parents, and the last level holds
/// only the root. A level with an odd number of nodes (more than one) pairs
/// its last node with itself, so `n` leaves give a tree of height
/// `ceil(log2(n))`.
///
/// The tree is immutable once built. Rebuild it whenever the TLD list
/// changes.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// Level 0 = leaves, last element = `[root]`.
    levels: Vec<Vec<Digest>>,
    /// Leaf digest to leaf position.
    index: HashMap<Digest, usize>,
}

impl MerkleTree {
    /// Build a tree from raw TLD strings, normalizing each one.
    ///
    /// Fails on an empty list, on any entry that does not normalize, and on
    /// entries that normalize to the same TLD.
    pub fn build<I, S>(tlds: I) -> MerkleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tlds = tlds
            .into_iter()
            .map(|raw| Tld::parse(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tlds(&tlds)
    }

    /// Build a tree from already-normalized TLDs.
    pub fn from_tlds(tlds: &[Tld]) -> MerkleResult<Self> {
        if tlds.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let mut leaves = Vec::with_capacity(tlds.len());
        let mut index = HashMap::with_capacity(tlds.len());
        for (position, tld) in tlds.iter().enumerate() {
            let leaf = LeafEncoder::encode(tld);
            if let Some(first) = index.insert(leaf, position) {
                return Err(MerkleError::DuplicateLeaf {
                    tld: tld.to_string(),
                    first,
                    second: position,
                });
            }
            leaves.push(leaf);
        }

        Ok(Self::from_indexed_leaves(leaves, index))
    }

    /// Build a tree from pre-computed leaf digests.
    pub fn from_leaf_digests(leaves: Vec<Digest>) -> MerkleResult<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }
        let index = index_leaves(&leaves)?;
        Ok(Self::from_indexed_leaves(leaves, index))
    }

    /// Reassemble a tree from stored level data without rehashing any TLD.
    ///
    /// Every level must have the size implied by the one below it and every
    /// parent must equal the hash of its children, otherwise the data is
    /// rejected as [`MerkleError::CorruptTree`].
    pub fn from_levels(levels: Vec<Vec<Digest>>) -> MerkleResult<Self> {
        let leaves = levels
            .first()
            .ok_or_else(|| MerkleError::corrupt("no levels"))?;
        if leaves.is_empty() {
            return Err(MerkleError::corrupt("leaf level is empty"));
        }

        for (depth, pair) in levels.windows(2).enumerate() {
            let (below, above) = (&pair[0], &pair[1]);
            if below.len() == 1 {
                return Err(MerkleError::corrupt(format!(
                    "level {depth} already has a single node but more levels follow"
                )));
            }
            if above != &parent_level(below) {
                return Err(MerkleError::corrupt(format!(
                    "level {} does not hash from level {depth}",
                    depth + 1
                )));
            }
        }
        if levels.last().map(Vec::len) != Some(1) {
            return Err(MerkleError::corrupt("top level is not a single root"));
        }

        let index = index_leaves(leaves)?;
        Ok(Self { levels, index })
    }

    fn from_indexed_leaves(leaves: Vec<Digest>, index: HashMap<Digest, usize>) -> Self {
        let leaf_count = leaves.len();
        let mut levels = vec![leaves];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next = parent_level(current);
            levels.push(next);
        }

        let tree = Self { levels, index };
        debug!(
            leaves = leaf_count,
            height = tree.height(),
            root = %tree.root().short_hex(),
            "built merkle tree"
        );
        tree
    }

    /// The root digest: the public commitment to the whole TLD list.
    pub fn root(&self) -> Digest {
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of hashing levels above the leaves; also every proof's length.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    /// Leaf digests in input order.
    pub fn leaves(&self) -> &[Digest] {
        &self.levels[0]
    }

    /// All levels, leaves first.
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Position of a TLD's leaf, if present.
    pub fn position(&self, tld: &Tld) -> Option<usize> {
        self.index.get(&LeafEncoder::encode(tld)).copied()
    }

    pub fn contains(&self, tld: &Tld) -> bool {
        self.position(tld).is_some()
    }

    /// Generate an inclusion proof for the leaf at `index`.
    pub fn prove_index(&self, index: usize) -> Option<MerkleProof> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut path = Vec::with_capacity(self.height());
        let mut idx = index;

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_idx = if idx % 2 == 0 { idx + 1 } else { idx - 1 };
            // Odd level: the last node is its own sibling.
            let sibling = level.get(sibling_idx).unwrap_or(&level[idx]);
            let side = if idx % 2 == 0 { Side::Right } else { Side::Left };
            path.push(ProofStep::new(*sibling, side));
            idx /= 2;
        }

        Some(MerkleProof::new(path))
    }

    /// Generate an inclusion proof for a normalized TLD.
    pub fn prove(&self, tld: &Tld) -> MerkleResult<MerkleProof> {
        let index = self.position(tld).ok_or_else(|| MerkleError::LeafNotFound {
            tld: tld.to_string(),
        })?;
        let proof = self
            .prove_index(index)
            .ok_or_else(|| MerkleError::corrupt(format!("leaf index {index} out of range")))?;
        debug!(%tld, index, steps = proof.len(), "generated inclusion proof");
        Ok(proof)
    }

    /// Normalize `tld`, then generate its inclusion proof.
    ///
    /// A TLD that is not a leaf fails with [`MerkleError::LeafNotFound`];
    /// no empty proof is ever returned for an absent TLD.
    pub fn prove_inclusion(&self, tld: &str) -> MerkleResult<MerkleProof> {
        let tld = Tld::parse(tld)?;
        self.prove(&tld)
    }
}

fn parent_level(level: &[Digest]) -> Vec<Digest> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => Sha256Hasher::hash_pair(left, right),
            [odd] => Sha256Hasher::hash_pair(odd, odd),
            _ => unreachable!("chunks(2) yields one or two items"),
        })
        .collect()
}

fn index_leaves(leaves: &[Digest]) -> MerkleResult<HashMap<Digest, usize>> {
    let mut index = HashMap::with_capacity(leaves.len());
    for (position, leaf) in leaves.iter().enumerate() {
        if let Some(first) = index.insert(*leaf, position) {
            return Err(MerkleError::DuplicateDigest {
                digest: *leaf,
                first,
                second: position,
            });
        }
    }
    Ok(index)
}
