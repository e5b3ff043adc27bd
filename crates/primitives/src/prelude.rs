pub use crate::buf::{Buf32, Buf64};
pub use crate::field::Fr;
