//! Public-output types shared by every rollup proof and their wire encoding.

pub mod aggregation;
pub mod constants;
pub mod inputs;
pub mod rollup;
pub mod snapshot;

pub mod prelude;
