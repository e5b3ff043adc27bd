//! Calldata hash packing and folding.
//!
//! A 32-byte digest is carried as two field elements, the high 16 bytes
//! right-aligned in the first and the low 16 bytes right-aligned in the
//! second.  Leaves hash the raw calldata, internal nodes hash the
//! concatenation of their children's digests, left first, so the root commits
//! to every transaction in order.

use rollup_primitives::{buf::Buf32, constants::DIGEST_HALF_SIZE, field::Fr, hash};

/// A digest packed into two field elements, high half first.
pub type CalldataHash = [Fr; 2];

/// Splits a digest into its two right-aligned halves.
pub fn pack_digest(digest: &Buf32) -> CalldataHash {
    let bytes = digest.as_slice();

    let mut high = [0u8; 32];
    let mut low = [0u8; 32];
    high[DIGEST_HALF_SIZE..].copy_from_slice(&bytes[..DIGEST_HALF_SIZE]);
    low[DIGEST_HALF_SIZE..].copy_from_slice(&bytes[DIGEST_HALF_SIZE..]);

    [Fr::from_be_bytes(high), Fr::from_be_bytes(low)]
}

/// Reassembles a digest from its packed halves.  Only the low 16 bytes of
/// each element are read.
pub fn unpack_digest(packed: &CalldataHash) -> Buf32 {
    let high = packed[0].to_be_bytes();
    let low = packed[1].to_be_bytes();

    let mut digest = [0u8; 32];
    digest[..DIGEST_HALF_SIZE].copy_from_slice(&high[DIGEST_HALF_SIZE..]);
    digest[DIGEST_HALF_SIZE..].copy_from_slice(&low[DIGEST_HALF_SIZE..]);
    Buf32::from(digest)
}

/// Calldata hash of a base rollup leaf from its raw calldata bytes.
pub fn calldata_hash_from_preimage(calldata: &[u8]) -> CalldataHash {
    pack_digest(&hash::raw(calldata))
}

/// Calldata hash of a merge node from the hashes of its children.
pub fn hash_fold(left: &CalldataHash, right: &CalldataHash) -> CalldataHash {
    let digest = hash::concat_pair(&unpack_digest(left), &unpack_digest(right));
    pack_digest(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_of(byte: u8) -> Buf32 {
        let mut d = [0u8; 32];
        for (i, b) in d.iter_mut().enumerate() {
            *b = byte.wrapping_add(i as u8);
        }
        Buf32::from(d)
    }

    #[test]
    fn test_pack_layout() {
        let d = digest_of(1);
        let [high, low] = pack_digest(&d);

        let high = high.to_be_bytes();
        let low = low.to_be_bytes();
        assert!(high[..16].iter().all(|b| *b == 0));
        assert!(low[..16].iter().all(|b| *b == 0));
        assert_eq!(&high[16..], &d.as_slice()[..16]);
        assert_eq!(&low[16..], &d.as_slice()[16..]);
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let d = digest_of(0xf0);
        assert_eq!(unpack_digest(&pack_digest(&d)), d);
    }

    #[test]
    fn test_unpack_ignores_high_bytes() {
        let d = digest_of(3);
        let mut packed = pack_digest(&d);

        let mut dirty = packed[0].to_be_bytes();
        dirty[0] = 0xff;
        packed[0] = Fr::from_be_bytes(dirty);

        assert_eq!(unpack_digest(&packed), d);
    }

    #[test]
    fn test_fold_is_ordered() {
        let a = pack_digest(&digest_of(1));
        let b = pack_digest(&digest_of(2));
        assert_ne!(hash_fold(&a, &b), hash_fold(&b, &a));
        assert_eq!(hash_fold(&a, &b), hash_fold(&a, &b));
    }

    #[test]
    fn test_fold_matches_raw_hash() {
        let a = digest_of(10);
        let b = digest_of(20);

        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(a.as_slice());
        buf.extend_from_slice(b.as_slice());

        let folded = hash_fold(&pack_digest(&a), &pack_digest(&b));
        assert_eq!(unpack_digest(&folded), hash::raw(&buf));
    }
}
