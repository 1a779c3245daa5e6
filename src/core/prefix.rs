//! Length prefixes for variable-length fields.

use crate::core::endian::Endianness;
use crate::core::primitive::Primitive;
use crate::core::width;
use std::borrow::Cow;

/// Width of the signed big-endian length ahead of a variable-length payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthPrefix {
    /// `i16` prefix used by strings
    Short,
    /// `i32` prefix used by opaque blocks and long strings
    Long,
}

impl LengthPrefix {
    /// Encoded width of the prefix itself.
    pub const fn width(self) -> usize {
        match self {
            LengthPrefix::Short => width::STRING_PREFIX,
            LengthPrefix::Long => width::BLOCK_PREFIX,
        }
    }

    /// Largest payload the prefix can describe.
    pub const fn max_len(self) -> usize {
        match self {
            LengthPrefix::Short => i16::MAX as usize,
            LengthPrefix::Long => i32::MAX as usize,
        }
    }

    /// Payload length declared by the first `width()` bytes of `bytes`.
    ///
    /// Zero and negative prefixes both describe an empty payload.
    pub fn decode(self, bytes: &[u8]) -> usize {
        let declared = match self {
            LengthPrefix::Short => i64::from(i16::decode(bytes, Endianness::NETWORK)),
            LengthPrefix::Long => i64::from(i32::decode(bytes, Endianness::NETWORK)),
        };
        usize::try_from(declared).unwrap_or(0)
    }

    /// Write `len` into the first `width()` bytes of `out`.
    ///
    /// Callers check `len <= max_len()` first.
    pub(crate) fn encode(self, len: usize, out: &mut [u8]) {
        match self {
            LengthPrefix::Short => {
                i16::try_from(len)
                    .unwrap_or(i16::MAX)
                    .encode(out, Endianness::NETWORK);
            }
            LengthPrefix::Long => {
                i32::try_from(len)
                    .unwrap_or(i32::MAX)
                    .encode(out, Endianness::NETWORK);
            }
        }
    }
}

/// UTF-8 decode, replacing invalid sequences with U+FFFD.
pub(crate) fn decode_text(bytes: Cow<'_, [u8]>) -> Cow<'_, str> {
    match bytes {
        Cow::Borrowed(raw) => String::from_utf8_lossy(raw),
        Cow::Owned(raw) => match String::from_utf8(raw) {
            Ok(text) => Cow::Owned(text),
            Err(err) => Cow::Owned(String::from_utf8_lossy(err.as_bytes()).into_owned()),
        },
    }
}
