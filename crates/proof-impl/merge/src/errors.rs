use std::io;

use thiserror::Error;

/// Reasons two rollup records can't be merged.
///
/// The messages are part of the external contract, callers match on them.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Error)]
pub enum MergeInvariantViolation {
    #[error("input proofs are of different rollup types")]
    RollupTypeMismatch,

    #[error("input proofs are of different rollup heights")]
    RollupHeightMismatch,

    #[error("input proofs have different constants")]
    ConstantsMismatch,

    #[error("input proofs have different private data tree snapshots")]
    PrivateDataTreeDiscontinuity,

    #[error("input proofs have different nullifier tree snapshots")]
    NullifierTreeDiscontinuity,

    #[error("input proofs have different contract tree snapshots")]
    ContractTreeDiscontinuity,
}

/// Errors at the serialized invocation boundary.
#[derive(Debug, Error)]
pub enum MergeSimError {
    #[error("malformed merge inputs: {0}")]
    Decode(io::Error),

    #[error("failed to encode merge output: {0}")]
    Encode(io::Error),

    #[error(transparent)]
    Invariant(#[from] MergeInvariantViolation),
}

impl MergeSimError {
    /// The invariant violation behind this error, if it was one.
    pub fn violation(&self) -> Option<MergeInvariantViolation> {
        match self {
            Self::Invariant(v) => Some(*v),
            _ => None,
        }
    }
}

/// Errors folding a batch of records into a single root.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("no records to aggregate")]
    Empty,

    #[error("record count {0} is not a power of two")]
    NotPowerOfTwo(usize),

    #[error("resulting subtree height {height} exceeds the limit of {max}")]
    TooTall { height: u32, max: u32 },

    #[error("merge at level {level} index {index} failed: {violation}")]
    Merge {
        level: u32,
        index: usize,
        violation: MergeInvariantViolation,
    },

    #[error("merge worker at level {0} exited without a result")]
    WorkerLost(u32),
}
