//! Opaque field element.
//!
//! We never do arithmetic on these here, we only move them around, compare
//! them and pack digests into them.  The encoding is the canonical 32-byte
//! big-endian one.

use std::fmt;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::buf::Buf32;

/// A field element in its 32-byte big-endian encoding.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Fr(Buf32);

impl Fr {
    pub const fn zero() -> Self {
        Self(Buf32::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn from_u64(v: u64) -> Self {
        let mut buf = [0u8; 32];
        buf[24..].copy_from_slice(&v.to_be_bytes());
        Self(Buf32::new(buf))
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(Buf32::new(bytes))
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.into_inner()
    }

    /// Returns the value as a `u32` if all the high bytes are zero.
    pub fn to_u32(&self) -> Option<u32> {
        let bytes = self.0.as_slice();
        if bytes[..28].iter().any(|b| *b != 0) {
            return None;
        }

        let mut low = [0u8; 4];
        low.copy_from_slice(&bytes[28..]);
        Some(u32::from_be_bytes(low))
    }
}

impl From<u32> for Fr {
    fn from(value: u32) -> Self {
        Self::from_u64(value as u64)
    }
}

impl From<u64> for Fr {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<Buf32> for Fr {
    fn from(value: Buf32) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
