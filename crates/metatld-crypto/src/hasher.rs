use metatld_types::Digest;
use sha2::{Digest as _, Sha256};

/// SHA-256 as used throughout the tree.
///
/// The same function hashes leaves and internal nodes. Node hashing
/// concatenates `left || right` with no separator or domain tag.
pub struct Sha256Hasher;

impl Sha256Hasher {
    /// Hash raw bytes.
    pub fn hash(data: &[u8]) -> Digest {
        finish(Sha256::new_with_prefix(data))
    }

    /// Hash an ordered pair of child digests: `SHA-256(left || right)`.
    pub fn hash_pair(left: &Digest, right: &Digest) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        finish(hasher)
    }

    /// Verify that data hashes to the expected digest.
    pub fn verify(data: &[u8], expected: &Digest) -> bool {
        Self::hash(data) == *expected
    }
}

fn finish(hasher: Sha256) -> Digest {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    Digest::from_hash(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_sha256_test_vector() {
        let d = Sha256Hasher::hash(b"abc");
        assert_eq!(
            d.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn empty_input_is_hashable() {
        assert_eq!(
            Sha256Hasher::hash(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hash_pair_is_plain_concatenation() {
        let l = Sha256Hasher::hash(b"left");
        let r = Sha256Hasher::hash(b"right");
        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(l.as_bytes());
        concat.extend_from_slice(r.as_bytes());
        assert_eq!(Sha256Hasher::hash_pair(&l, &r), Sha256Hasher::hash(&concat));
    }

    #[test]
    fn hash_pair_is_order_sensitive() {
        let l = Sha256Hasher::hash(b"left");
        let r = Sha256Hasher::hash(b"right");
        assert_ne!(Sha256Hasher::hash_pair(&l, &r), Sha256Hasher::hash_pair(&r, &l));
    }

    #[test]
    fn verify_detects_tampering() {
        let d = Sha256Hasher::hash(b"original");
        assert!(Sha256Hasher::verify(b"original", &d));
        assert!(!Sha256Hasher::verify(b"tampered", &d));
    }
}
