//! # Read-Only View
//!
//! Strict decoding over a borrowed, contiguous byte window.
//!
//! Every fixed-width read comes in a big-endian and a little-endian form
//! ([`ByteView::read_be`], [`ByteView::read_le`]), both backed by the same generic
//! body. Length prefixes are always big-endian.
//!
//! Reads are all-or-nothing: when the requested field does not fit in the
//! remaining bytes the call returns [`CodecError::OutOfBounds`] naming the offset
//! and leaves the cursor where it was.

use crate::core::endian::{BigEndian, ByteOrder, Endianness, LittleEndian};
use crate::core::prefix::{decode_text, LengthPrefix};
use crate::core::primitive::Primitive;
use crate::error::{CodecError, Result};
use std::borrow::Cow;

/// Decode-only view over a borrowed byte slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteView<'a> {
    /// Wrap a byte slice.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Total length of the view.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The underlying bytes.
    pub const fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// Bytes left after `offset` (zero once past the end).
    pub fn remaining(&self, offset: usize) -> usize {
        self.bytes.len().saturating_sub(offset)
    }

    /// Read a primitive in byte order `O`.
    #[inline]
    pub fn read<T: Primitive, O: ByteOrder>(&self, offset: &mut usize) -> Result<T> {
        self.read_with(O::ENDIANNESS, offset)
    }

    /// Read a big-endian primitive.
    #[inline]
    pub fn read_be<T: Primitive>(&self, offset: &mut usize) -> Result<T> {
        self.read::<T, BigEndian>(offset)
    }

    /// Read a little-endian primitive.
    #[inline]
    pub fn read_le<T: Primitive>(&self, offset: &mut usize) -> Result<T> {
        self.read::<T, LittleEndian>(offset)
    }

    /// Read a primitive with the byte order chosen at runtime.
    #[inline]
    pub fn read_with<T: Primitive>(&self, order: Endianness, offset: &mut usize) -> Result<T> {
        let raw = self.window(*offset, T::WIDTH)?;
        let value = T::decode(raw, order);
        *offset += T::WIDTH;
        Ok(value)
    }

    /// Read an opaque block: `[i32 BE len][len bytes]`.
    ///
    /// A zero or negative length yields an empty slice and consumes only the prefix.
    pub fn read_bytes(&self, offset: &mut usize) -> Result<&'a [u8]> {
        self.read_prefixed(LengthPrefix::Long, offset)
    }

    /// Read exactly `len` raw bytes with no prefix.
    pub fn read_bytes_without_length(&self, len: usize, offset: &mut usize) -> Result<&'a [u8]> {
        let raw = self.window(*offset, len)?;
        *offset += len;
        Ok(raw)
    }

    /// Read a string: `[i16 BE len][len UTF-8 bytes]`.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than reported.
    pub fn read_str(&self, offset: &mut usize) -> Result<Cow<'a, str>> {
        self.read_prefixed(LengthPrefix::Short, offset)
            .map(|raw| decode_text(Cow::Borrowed(raw)))
    }

    /// Read a long string: `[i32 BE len][len UTF-8 bytes]`.
    pub fn read_long_str(&self, offset: &mut usize) -> Result<Cow<'a, str>> {
        self.read_prefixed(LengthPrefix::Long, offset)
            .map(|raw| decode_text(Cow::Borrowed(raw)))
    }

    /// Read a length-prefixed payload without moving `offset` unless the whole field fits.
    pub fn read_prefixed(&self, prefix: LengthPrefix, offset: &mut usize) -> Result<&'a [u8]> {
        let start = *offset;
        let head = self.window(start, prefix.width())?;
        let len = prefix.decode(head);
        let body_start = start + prefix.width();
        let body = self.window(body_start, len).map_err(|_| {
            CodecError::out_of_bounds(start, prefix.width().saturating_add(len), self.len())
        })?;
        *offset = body_start + len;
        Ok(body)
    }

    /// Slice `len` bytes at `offset`, or a bounds violation.
    fn window(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or_else(|| CodecError::out_of_bounds(offset, len, self.bytes.len()))
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}
