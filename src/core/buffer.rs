//! # Mutable Buffer
//!
//! Encoding into a fixed-capacity, pre-allocated byte buffer.
//!
//! The buffer never grows. The cursor is owned by the caller and passed by
//! reference to every call, so several encoders can share one buffer pass.
//!
//! ## Overflow Policies
//! - Fixed-width writes, [`MutableBuffer::write_bytes`], [`MutableBuffer::write_str`]
//!   and [`MutableBuffer::write_long_str`] skip silently when the field does not
//!   fit: nothing is written, the cursor still advances by the encoded size and no
//!   error is raised. Buffer contents at that location are left as they were.
//! - [`MutableBuffer::write_bytes_without_length`] is strict and returns
//!   [`CodecError::OutOfBounds`] on overflow.
//! - All reads are strict and never move the cursor on failure.
//!
//! ## Measure Mode
//! Because skipped writes still advance the cursor, running an encoder against
//! [`MutableBuffer::measuring`] yields the exact size the real pass needs:
//!
//! ```rust
//! use wire_buffer::MutableBuffer;
//!
//! # fn main() -> wire_buffer::Result<()> {
//! fn encode(buf: &mut MutableBuffer<'_>, offset: &mut usize) -> wire_buffer::Result<()> {
//!     buf.write(7u16, offset);
//!     buf.write_str(Some("payload"), offset)?;
//!     buf.write_bytes(Some([1u8, 2, 3].as_slice()), offset)
//! }
//!
//! let size = MutableBuffer::measure(encode)?;
//! assert_eq!(size, 2 + 2 + 7 + 4 + 3);
//!
//! let mut storage = vec![0u8; size];
//! let mut offset = 0;
//! encode(&mut MutableBuffer::new(&mut storage), &mut offset)?;
//! assert_eq!(offset, size);
//! # Ok(())
//! # }
//! ```

use crate::core::endian::Endianness;
use crate::core::prefix::LengthPrefix;
use crate::core::primitive::Primitive;
use crate::core::view::ByteView;
use crate::error::{CodecError, Result};
use std::borrow::Cow;
use tracing::debug;

/// Fixed-capacity encode/decode buffer
#[derive(Debug)]
pub struct MutableBuffer<'a> {
    buf: &'a mut [u8],
    measuring: bool,
}

impl<'a> MutableBuffer<'a> {
    /// Wrap a pre-allocated buffer.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            measuring: false,
        }
    }

    /// Zero-capacity buffer for a size measurement pass.
    ///
    /// Every write overflows, so every write only advances the cursor.
    pub fn measuring() -> MutableBuffer<'static> {
        MutableBuffer {
            buf: Default::default(),
            measuring: true,
        }
    }

    /// Run `encode` in measure mode and return the number of bytes it would write.
    ///
    /// Size violations (over-long strings or blocks) are still reported.
    pub fn measure<F>(encode: F) -> Result<usize>
    where
        F: FnOnce(&mut MutableBuffer<'_>, &mut usize) -> Result<()>,
    {
        let mut buf = MutableBuffer::measuring();
        let mut offset = 0;
        encode(&mut buf, &mut offset)?;
        Ok(offset)
    }

    pub fn is_measuring(&self) -> bool {
        self.measuring
    }

    /// Capacity of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes left after `offset` (zero once past the end).
    pub fn remaining(&self, offset: usize) -> usize {
        self.buf.len().saturating_sub(offset)
    }

    pub fn as_slice(&self) -> &[u8] {
        &*self.buf
    }

    /// Read-only view over the current contents.
    pub fn view(&self) -> ByteView<'_> {
        ByteView::new(&*self.buf)
    }

    /// Write a primitive in network order, skipping silently on overflow.
    #[inline]
    pub fn write<T: Primitive>(&mut self, value: T, offset: &mut usize) {
        self.write_with(value, Endianness::NETWORK, offset);
    }

    /// Write a primitive in the given byte order, skipping silently on overflow.
    #[inline]
    pub fn write_with<T: Primitive>(&mut self, value: T, order: Endianness, offset: &mut usize) {
        if let Some(slot) = self.slot(*offset, T::WIDTH) {
            value.encode(slot, order);
        }
        *offset = offset.saturating_add(T::WIDTH);
    }

    /// Write an opaque block: `[i32 BE len][len bytes]`.
    ///
    /// `None` writes a zero length and no payload. When the whole field does not
    /// fit, nothing is written and the cursor advances by `4 + len`.
    pub fn write_bytes(&mut self, value: Option<&[u8]>, offset: &mut usize) -> Result<()> {
        let payload = value.unwrap_or_default();
        let max = LengthPrefix::Long.max_len();
        if payload.len() > max {
            return Err(CodecError::BlockTooLong {
                len: payload.len(),
                max,
            });
        }
        self.write_prefixed(LengthPrefix::Long, payload, offset);
        Ok(())
    }

    /// Write raw bytes with no length prefix.
    ///
    /// Unlike the other writes this one is strict: if the payload does not fit the
    /// call fails with a bounds violation and neither the buffer nor the cursor
    /// changes. A measuring buffer only advances the cursor.
    pub fn write_bytes_without_length(&mut self, value: &[u8], offset: &mut usize) -> Result<()> {
        if self.measuring {
            *offset = offset.saturating_add(value.len());
            return Ok(());
        }

        let capacity = self.buf.len();
        match self.slot(*offset, value.len()) {
            Some(slot) => {
                slot.copy_from_slice(value);
                *offset += value.len();
                Ok(())
            }
            None => {
                debug!(
                    offset = *offset,
                    len = value.len(),
                    capacity,
                    "raw write does not fit buffer"
                );
                Err(CodecError::out_of_bounds(*offset, value.len(), capacity))
            }
        }
    }

    /// Write a string: `[i16 BE len][len UTF-8 bytes]`.
    ///
    /// Strings over 32767 encoded bytes are rejected. `None` and `""` both write a
    /// zero length. Overflow skips silently like [`MutableBuffer::write_bytes`].
    pub fn write_str(&mut self, value: Option<&str>, offset: &mut usize) -> Result<()> {
        self.write_text(LengthPrefix::Short, value, offset)
    }

    /// Write a long string: `[i32 BE len][len UTF-8 bytes]`.
    pub fn write_long_str(&mut self, value: Option<&str>, offset: &mut usize) -> Result<()> {
        self.write_text(LengthPrefix::Long, value, offset)
    }

    /// Read a big-endian primitive.
    #[inline]
    pub fn read<T: Primitive>(&self, offset: &mut usize) -> Result<T> {
        self.view().read_be(offset)
    }

    /// Read an opaque block written by [`MutableBuffer::write_bytes`].
    pub fn read_bytes(&self, offset: &mut usize) -> Result<&[u8]> {
        self.view().read_bytes(offset)
    }

    /// Read exactly `len` raw bytes.
    pub fn read_bytes_without_length(&self, len: usize, offset: &mut usize) -> Result<&[u8]> {
        self.view().read_bytes_without_length(len, offset)
    }

    /// Read a string written by [`MutableBuffer::write_str`].
    pub fn read_str(&self, offset: &mut usize) -> Result<Cow<'_, str>> {
        self.view().read_str(offset)
    }

    /// Read a string written by [`MutableBuffer::write_long_str`].
    pub fn read_long_str(&self, offset: &mut usize) -> Result<Cow<'_, str>> {
        self.view().read_long_str(offset)
    }

    fn write_text(
        &mut self,
        prefix: LengthPrefix,
        value: Option<&str>,
        offset: &mut usize,
    ) -> Result<()> {
        let payload = value.unwrap_or_default().as_bytes();
        if payload.len() > prefix.max_len() {
            return Err(CodecError::StringTooLong {
                len: payload.len(),
                max: prefix.max_len(),
            });
        }
        self.write_prefixed(prefix, payload, offset);
        Ok(())
    }

    fn write_prefixed(&mut self, prefix: LengthPrefix, payload: &[u8], offset: &mut usize) {
        let total = prefix.width().saturating_add(payload.len());
        if let Some(slot) = self.slot(*offset, total) {
            let (head, body) = slot.split_at_mut(prefix.width());
            prefix.encode(payload.len(), head);
            body.copy_from_slice(payload);
        }
        *offset = offset.saturating_add(total);
    }

    /// Mutable window of `len` bytes at `offset`, if it fits.
    fn slot(&mut self, offset: usize, len: usize) -> Option<&mut [u8]> {
        let end = offset.checked_add(len)?;
        self.buf.get_mut(offset..end)
    }
}
