// 32-byte buf, useful for hashes and field element encodings
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Buf32([u8; 32]);
impl_buf!(Buf32, 32);

// 64-byte buf, useful for uncompressed affine curve points
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Buf64([u8; 64]);
impl_buf!(Buf64, 64);
