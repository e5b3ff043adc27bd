//! Configuration types for the rollup aggregation tooling.

mod aggregator;

pub use aggregator::AggregatorConfig;
