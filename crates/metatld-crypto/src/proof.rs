use metatld_types::{Digest, Tld};
use serde::{Deserialize, Serialize};

use crate::error::{MerkleError, MerkleResult};
use crate::hasher::Sha256Hasher;

/// Longest path a proof may carry. A tree of `usize::MAX` leaves is 64 levels
/// tall, so anything longer cannot have come from a real tree.
pub const MAX_PROOF_DEPTH: usize = 64;

/// Side of a sibling in a Merkle proof path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Sibling is the left child: parent = `H(sibling || current)`.
    Left,
    /// Sibling is the right child: parent = `H(current || sibling)`.
    Right,
}

impl Side {
    pub fn is_right(self) -> bool {
        matches!(self, Side::Right)
    }

    pub fn from_is_right(is_right: bool) -> Self {
        if is_right {
            Side::Right
        } else {
            Side::Left
        }
    }
}

/// One step of a proof path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub sibling: Digest,
    pub side: Side,
}

impl ProofStep {
    pub fn new(sibling: Digest, side: Side) -> Self {
        Self { sibling, side }
    }

    /// Combine the running digest with this step's sibling.
    pub fn apply(&self, current: &Digest) -> Digest {
        match self.side {
            Side::Left => Sha256Hasher::hash_pair(&self.sibling, current),
            Side::Right => Sha256Hasher::hash_pair(current, &self.sibling),
        }
    }
}

/// Merkle inclusion proof: sibling steps ordered from the leaf upwards.
///
/// The proof carries neither the leaf nor the root. The verifier supplies the
/// TLD and the trusted root itself, so a forged proof cannot vouch for its
/// own root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    path: Vec<ProofStep>,
}

impl MerkleProof {
    pub fn new(path: Vec<ProofStep>) -> Self {
        Self { path }
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.path
    }

    /// Mutable access to the path, mostly useful for tamper tests.
    pub fn steps_mut(&mut self) -> &mut [ProofStep] {
        &mut self.path
    }

    /// Number of steps, equal to the height of the tree that produced it.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// `true` for the proof of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Fold the path over `leaf` and return the implied root.
    pub fn compute_root(&self, leaf: &Digest) -> Digest {
        self.path.iter().fold(*leaf, |current, step| step.apply(&current))
    }

    /// Wire form for a remote verifier.
    pub fn to_payload(&self, tld: &Tld, root: &Digest) -> ProofPayload {
        ProofPayload {
            tld: tld.to_string(),
            proof: self
                .path
                .iter()
                .map(|step| ProofStepPayload {
                    sibling_digest_hex: step.sibling.to_hex(),
                    is_right: step.side.is_right(),
                })
                .collect(),
            root: root.to_hex(),
        }
    }
}

/// One proof step as exchanged over JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofStepPayload {
    pub sibling_digest_hex: String,
    /// `true` when the sibling is the right child.
    pub is_right: bool,
}

/// A self-contained membership claim: TLD, proof path and target root.
///
/// ```json
/// {
///   "tld": "io",
///   "proof": [{ "siblingDigestHex": "…", "isRight": false }],
///   "root": "…"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPayload {
    pub tld: String,
    pub proof: Vec<ProofStepPayload>,
    pub root: String,
}

impl ProofPayload {
    /// Parse a JSON payload. Any decoding failure, including a position flag
    /// that is not a boolean, is a [`MerkleError::MalformedProof`].
    pub fn from_json(json: &str) -> MerkleResult<Self> {
        serde_json::from_str(json).map_err(|e| MerkleError::malformed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> MerkleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MerkleError::malformed(e.to_string()))
    }

    /// Decode the proof path into typed steps.
    pub fn decode_proof(&self) -> MerkleResult<MerkleProof> {
        if self.proof.len() > MAX_PROOF_DEPTH {
            return Err(MerkleError::malformed(format!(
                "path has {} steps, at most {MAX_PROOF_DEPTH} allowed",
                self.proof.len()
            )));
        }
        let path = self
            .proof
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let sibling = Digest::from_hex(&step.sibling_digest_hex)
                    .map_err(|e| MerkleError::malformed(format!("step {i}: {e}")))?;
                Ok(ProofStep::new(sibling, Side::from_is_right(step.is_right)))
            })
            .collect::<MerkleResult<Vec<_>>>()?;
        Ok(MerkleProof::new(path))
    }

    /// Decode the target root.
    pub fn decode_root(&self) -> MerkleResult<Digest> {
        Digest::from_hex(&self.root).map_err(|e| MerkleError::malformed(format!("root: {e}")))
    }

    /// Normalize the claimed TLD.
    pub fn decode_tld(&self) -> MerkleResult<Tld> {
        Ok(Tld::parse(&self.tld)?)
    }
}
