//! Common wrapper around whatever we choose our native hash function to be.

use digest::Digest;
use sha2::Sha256;

use crate::buf::Buf32;

/// Direct untagged hash.
pub fn raw(buf: &[u8]) -> Buf32 {
    Buf32::from(<[u8; 32]>::from(Sha256::digest(buf)))
}

/// Hashes the concatenation of two digests, left first.
pub fn concat_pair(left: &Buf32, right: &Buf32) -> Buf32 {
    let mut hasher = Sha256::new();
    hasher.update(left.as_slice());
    hasher.update(right.as_slice());
    Buf32::from(<[u8; 32]>::from(hasher.finalize()))
}
