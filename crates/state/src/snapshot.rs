use std::{fmt, io};

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use rollup_primitives::{field::Fr, wire};
use serde::{Deserialize, Serialize};

/// State of one append-only merkle tree at an instant.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Arbitrary, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub root: Fr,
    pub next_available_leaf_index: u32,
}

impl TreeSnapshot {
    pub fn new(root: Fr, next_available_leaf_index: u32) -> Self {
        Self {
            root,
            next_available_leaf_index,
        }
    }
}

impl fmt::Display for TreeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "root: {}, next_available_leaf_index: {}",
            self.root, self.next_available_leaf_index
        )
    }
}

impl BorshSerialize for TreeSnapshot {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.root, writer)?;
        wire::write_u32(writer, self.next_available_leaf_index)
    }
}

impl BorshDeserialize for TreeSnapshot {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let root = Fr::deserialize_reader(reader)?;
        let next_available_leaf_index = wire::read_u32(reader)?;
        Ok(Self {
            root,
            next_available_leaf_index,
        })
    }
}
