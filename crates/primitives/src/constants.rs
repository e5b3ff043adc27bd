//! Constants for magic numbers and sizes used in the primitives.

/// The size (in bytes) of a native hash digest.
pub const HASH_SIZE: usize = 32;

/// The size (in bytes) of each half of a digest packed into a field element.
pub const DIGEST_HALF_SIZE: usize = HASH_SIZE / 2;

/// Upper bound on how many elements a decoder preallocates for a length
/// prefixed vector, so a bogus prefix can't trigger a huge allocation.
pub const MAX_DECODE_PREALLOC: usize = 1 << 12;
