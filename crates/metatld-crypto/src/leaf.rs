use metatld_types::{Digest, Tld};

use crate::error::MerkleResult;
use crate::hasher::Sha256Hasher;

/// Maps TLDs to leaf digests.
pub struct LeafEncoder;

impl LeafEncoder {
    /// Leaf digest of a canonical TLD: `SHA-256(utf8(tld))`.
    pub fn encode(tld: &Tld) -> Digest {
        Sha256Hasher::hash(tld.as_bytes())
    }

    /// Normalize a raw string, then encode it.
    pub fn encode_str(raw: &str) -> MerkleResult<Digest> {
        let tld = Tld::parse(raw)?;
        Ok(Self::encode(&tld))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MerkleError;

    #[test]
    fn leaf_is_hash_of_canonical_bytes() {
        let tld = Tld::parse("com").unwrap();
        assert_eq!(LeafEncoder::encode(&tld), Sha256Hasher::hash(b"com"));
    }

    #[test]
    fn logically_equal_inputs_share_a_leaf() {
        let a = LeafEncoder::encode_str("COM").unwrap();
        let b = LeafEncoder::encode_str(" .com ").unwrap();
        let c = LeafEncoder::encode_str("com").unwrap();
        assert_eq!(a, c);
        assert_eq!(b, c);
    }

    #[test]
    fn distinct_tlds_have_distinct_leaves() {
        assert_ne!(
            LeafEncoder::encode_str("com").unwrap(),
            LeafEncoder::encode_str("io").unwrap()
        );
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert!(matches!(
            LeafEncoder::encode_str("  "),
            Err(MerkleError::InvalidTld(_))
        ));
    }
}
