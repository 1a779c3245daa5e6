//! Encoded byte width of every primitive kind.
//!
//! Offset arithmetic across the crate is expressed in terms of these constants.

pub const BOOL: usize = 1;
pub const I8: usize = 1;
pub const U8: usize = 1;
pub const I16: usize = 2;
pub const U16: usize = 2;
pub const I32: usize = 4;
pub const U32: usize = 4;
pub const I64: usize = 8;
pub const U64: usize = 8;
pub const F32: usize = 4;
pub const F64: usize = 8;

/// Length prefix of a short string.
pub const STRING_PREFIX: usize = I16;

/// Length prefix of an opaque block or long string.
pub const BLOCK_PREFIX: usize = I32;

/// Widest primitive; sizes the scratch space used when copying across fragments.
pub const MAX_PRIMITIVE: usize = 8;
