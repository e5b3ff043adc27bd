//! Recursive verification accumulator.
//!
//! This is carried along as an opaque blob.  Nothing in the rollup logic
//! inspects it beyond moving it from input to output.

use std::io;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use rollup_primitives::{buf::Buf64, field::Fr, wire};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Arbitrary, Serialize, Deserialize)]
pub struct AggregationObject {
    /// First pairing point, uncompressed affine encoding.
    pub p0: Buf64,
    /// Second pairing point, uncompressed affine encoding.
    pub p1: Buf64,
    pub public_inputs: Vec<Fr>,
    pub proof_witness_indices: Vec<u32>,
    pub has_data: bool,
}

impl BorshSerialize for AggregationObject {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.p0, writer)?;
        BorshSerialize::serialize(&self.p1, writer)?;
        wire::write_seq(writer, &self.public_inputs)?;
        wire::write_u32_seq(writer, &self.proof_witness_indices)?;
        wire::write_bool(writer, self.has_data)
    }
}

impl BorshDeserialize for AggregationObject {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            p0: Buf64::deserialize_reader(reader)?,
            p1: Buf64::deserialize_reader(reader)?,
            public_inputs: wire::read_seq(reader)?,
            proof_witness_indices: wire::read_u32_seq(reader)?,
            has_data: wire::read_bool(reader)?,
        })
    }
}
