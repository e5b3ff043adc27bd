//! Crate includes reusable utils for the rollup tools that handle common
//! behavior, such as initializing the tracing framework and reading envvars.

pub mod env;
pub mod logging;
