use metatld_types::{Digest, Tld};
use tracing::debug;

use crate::error::MerkleResult;
use crate::leaf::LeafEncoder;
use crate::proof::{MerkleProof, ProofPayload};

/// Stateless membership verifier.
///
/// Needs only `(tld, proof, root)`, so a party that knows nothing but the
/// published root can check a claim. A proof that does not reproduce the
/// root yields `false`; only undecodable input is an error.
pub struct ProofVerifier;

impl ProofVerifier {
    /// Recompute the root from `tld` and `proof` and compare it to `root`.
    pub fn verify(tld: &Tld, proof: &MerkleProof, root: &Digest) -> bool {
        let leaf = LeafEncoder::encode(tld);
        proof.compute_root(&leaf) == *root
    }

    /// Like [`verify`](Self::verify), normalizing a raw TLD string first.
    pub fn verify_str(tld: &str, proof: &MerkleProof, root: &Digest) -> MerkleResult<bool> {
        let tld = Tld::parse(tld)?;
        Ok(Self::verify(&tld, proof, root))
    }

    /// Verify a wire payload against the root it names.
    pub fn verify_payload(payload: &ProofPayload) -> MerkleResult<bool> {
        let root = payload.decode_root()?;
        Self::verify_payload_against(payload, &root)
    }

    /// Verify a wire payload against a trusted root, ignoring the root the
    /// payload itself carries.
    pub fn verify_payload_against(payload: &ProofPayload, root: &Digest) -> MerkleResult<bool> {
        let tld = payload.decode_tld()?;
        let proof = payload.decode_proof()?;
        let valid = Self::verify(&tld, &proof, root);
        debug!(%tld, steps = proof.len(), valid, "verified membership proof");
        Ok(valid)
    }
}
