//! Collection of generic internal data types that are used widely.

#[macro_use]
mod macros;

pub mod buf;
pub mod constants;
pub mod field;
pub mod hash;
pub mod wire;

pub mod prelude;
