//! # Stream Cursor
//!
//! Non-failing decoding over fragmented, partially received byte streams.
//!
//! A [`Fragments`] source presents a logically contiguous byte sequence that may
//! be split across any number of chunks. A [`StreamCursor`] walks that sequence
//! by absolute position. It is `Copy`, so saving a position is a plain copy and
//! peeking is a read on the copy.
//!
//! Every decode comes in two forms:
//! - `try_read_*` returns `Some` and advances the cursor, or returns `None` and
//!   leaves it untouched when not enough bytes are buffered yet.
//! - `try_peek_*` has the same data contract but never advances.
//!
//! Running out of data is the normal case while parsing incrementally, so it is
//! reported as `None` rather than as an error.
//!
//! ```rust
//! use wire_buffer::StreamCursor;
//!
//! let fragments: [&[u8]; 3] = [&[0x00], &[0x03, b'a'], &[b'b', b'c']];
//! let mut cursor = StreamCursor::new(&fragments[..]);
//! assert_eq!(cursor.try_peek_be::<u16>(), Some(3));
//! assert_eq!(cursor.try_read_str().as_deref(), Some("abc"));
//! assert_eq!(cursor.remaining(), 0);
//! ```

use crate::core::endian::{BigEndian, ByteOrder, Endianness, LittleEndian};
use crate::core::prefix::{decode_text, LengthPrefix};
use crate::core::primitive::Primitive;
use crate::core::width;
use bytes::{Bytes, BytesMut};
use std::borrow::Cow;
use std::fmt;

/// A logically contiguous byte sequence stored as one or more fragments.
pub trait Fragments {
    /// Number of fragments, including empty ones.
    fn fragment_count(&self) -> usize;

    /// Fragment at `index`, or an empty slice past the last one.
    fn fragment(&self, index: usize) -> &[u8];

    /// Sum of all fragment lengths.
    fn total_len(&self) -> usize {
        (0..self.fragment_count())
            .map(|index| self.fragment(index).len())
            .sum()
    }
}

impl Fragments for [u8] {
    fn fragment_count(&self) -> usize {
        1
    }

    fn fragment(&self, index: usize) -> &[u8] {
        if index == 0 {
            self
        } else {
            &[]
        }
    }

    fn total_len(&self) -> usize {
        self.len()
    }
}

impl Fragments for BytesMut {
    fn fragment_count(&self) -> usize {
        1
    }

    fn fragment(&self, index: usize) -> &[u8] {
        self[..].fragment(index)
    }

    fn total_len(&self) -> usize {
        self.len()
    }
}

impl Fragments for Bytes {
    fn fragment_count(&self) -> usize {
        1
    }

    fn fragment(&self, index: usize) -> &[u8] {
        self[..].fragment(index)
    }

    fn total_len(&self) -> usize {
        self.len()
    }
}

macro_rules! impl_fragment_slices {
    ($($ty:ty),* $(,)?) => {$(
        impl Fragments for [$ty] {
            fn fragment_count(&self) -> usize {
                self.len()
            }

            fn fragment(&self, index: usize) -> &[u8] {
                self.get(index).map_or(&[][..], |chunk| &chunk[..])
            }
        }

        impl Fragments for Vec<$ty> {
            fn fragment_count(&self) -> usize {
                self.len()
            }

            fn fragment(&self, index: usize) -> &[u8] {
                self.as_slice().fragment(index)
            }
        }
    )*};
}

impl_fragment_slices!(&[u8], Vec<u8>, Bytes);

/// Position within a [`Fragments`] source
pub struct StreamCursor<'a, F: ?Sized + Fragments> {
    source: &'a F,
    fragment: usize,
    within: usize,
    position: usize,
    len: usize,
}

impl<F: ?Sized + Fragments> Clone for StreamCursor<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: ?Sized + Fragments> Copy for StreamCursor<'_, F> {}

impl<F: ?Sized + Fragments> fmt::Debug for StreamCursor<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamCursor")
            .field("position", &self.position)
            .field("len", &self.len)
            .field("fragment", &self.fragment)
            .finish()
    }
}

impl<'a, F: ?Sized + Fragments> StreamCursor<'a, F> {
    /// Cursor at the start of `source`.
    ///
    /// The total length is captured here; the borrow keeps `source` from growing.
    pub fn new(source: &'a F) -> Self {
        Self {
            source,
            fragment: 0,
            within: 0,
            position: 0,
            len: source.total_len(),
        }
    }

    /// Absolute position from the start of the source.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.len - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Save the current position.
    pub fn checkpoint(&self) -> Self {
        *self
    }

    /// Return to a position saved with [`StreamCursor::checkpoint`].
    pub fn rewind(&mut self, mark: Self) {
        *self = mark;
    }

    /// Read a primitive in byte order `O`.
    #[inline]
    pub fn try_read<T: Primitive, O: ByteOrder>(&mut self) -> Option<T> {
        self.try_read_with(O::ENDIANNESS)
    }

    /// Peek a primitive in byte order `O`.
    #[inline]
    pub fn try_peek<T: Primitive, O: ByteOrder>(&self) -> Option<T> {
        self.try_peek_with(O::ENDIANNESS)
    }

    #[inline]
    pub fn try_read_be<T: Primitive>(&mut self) -> Option<T> {
        self.try_read::<T, BigEndian>()
    }

    #[inline]
    pub fn try_read_le<T: Primitive>(&mut self) -> Option<T> {
        self.try_read::<T, LittleEndian>()
    }

    #[inline]
    pub fn try_peek_be<T: Primitive>(&self) -> Option<T> {
        self.try_peek::<T, BigEndian>()
    }

    #[inline]
    pub fn try_peek_le<T: Primitive>(&self) -> Option<T> {
        self.try_peek::<T, LittleEndian>()
    }

    /// Read a primitive with the byte order chosen at runtime.
    pub fn try_read_with<T: Primitive>(&mut self, order: Endianness) -> Option<T> {
        let mut scratch = [0u8; width::MAX_PRIMITIVE];
        let raw = &mut scratch[..T::WIDTH];
        if !self.fill(raw) {
            return None;
        }
        Some(T::decode(raw, order))
    }

    /// Peek a primitive with the byte order chosen at runtime.
    pub fn try_peek_with<T: Primitive>(&self, order: Endianness) -> Option<T> {
        let mut probe = *self;
        probe.try_read_with(order)
    }

    /// Read an opaque block: `[i32 BE len][len bytes]`.
    ///
    /// The payload is borrowed when it lies inside a single fragment.
    pub fn try_read_bytes(&mut self) -> Option<Cow<'a, [u8]>> {
        self.try_read_prefixed(LengthPrefix::Long)
    }

    pub fn try_peek_bytes(&self) -> Option<Cow<'a, [u8]>> {
        let mut probe = *self;
        probe.try_read_bytes()
    }

    /// Read a string: `[i16 BE len][len UTF-8 bytes]`.
    pub fn try_read_str(&mut self) -> Option<Cow<'a, str>> {
        self.try_read_prefixed(LengthPrefix::Short).map(decode_text)
    }

    pub fn try_peek_str(&self) -> Option<Cow<'a, str>> {
        let mut probe = *self;
        probe.try_read_str()
    }

    /// Read a long string: `[i32 BE len][len UTF-8 bytes]`.
    pub fn try_read_long_str(&mut self) -> Option<Cow<'a, str>> {
        self.try_read_prefixed(LengthPrefix::Long).map(decode_text)
    }

    pub fn try_peek_long_str(&self) -> Option<Cow<'a, str>> {
        let mut probe = *self;
        probe.try_read_long_str()
    }

    /// Read exactly `len` bytes with no prefix.
    pub fn try_read_raw(&mut self, len: usize) -> Option<Cow<'a, [u8]>> {
        self.take(len)
    }

    pub fn try_peek_raw(&self, len: usize) -> Option<Cow<'a, [u8]>> {
        let mut probe = *self;
        probe.take(len)
    }

    /// Skip `len` bytes if they are all buffered.
    pub fn try_skip(&mut self, len: usize) -> bool {
        if self.remaining() < len {
            return false;
        }
        self.advance(len);
        true
    }

    /// Read a length-prefixed payload, consuming nothing unless it is fully buffered.
    ///
    /// Zero and negative lengths yield an empty payload and consume the prefix.
    pub fn try_read_prefixed(&mut self, prefix: LengthPrefix) -> Option<Cow<'a, [u8]>> {
        let mut probe = *self;
        let mut scratch = [0u8; width::BLOCK_PREFIX];
        let head = &mut scratch[..prefix.width()];
        if !probe.fill(head) {
            return None;
        }
        let body = probe.take(prefix.decode(head))?;
        *self = probe;
        Some(body)
    }

    /// Copy `dst.len()` bytes into `dst` and advance, or do nothing and return false.
    fn fill(&mut self, dst: &mut [u8]) -> bool {
        if self.remaining() < dst.len() {
            return false;
        }
        let source: &'a F = self.source;
        let mut filled = 0;
        while filled < dst.len() {
            self.settle();
            let chunk = &source.fragment(self.fragment)[self.within..];
            let n = chunk.len().min(dst.len() - filled);
            dst[filled..filled + n].copy_from_slice(&chunk[..n]);
            filled += n;
            self.within += n;
            self.position += n;
        }
        true
    }

    /// Take `len` bytes, borrowing when they sit in one fragment.
    fn take(&mut self, len: usize) -> Option<Cow<'a, [u8]>> {
        if self.remaining() < len {
            return None;
        }
        if len == 0 {
            return Some(Cow::Borrowed(&[][..]));
        }
        self.settle();
        let source: &'a F = self.source;
        let chunk = &source.fragment(self.fragment)[self.within..];
        if chunk.len() >= len {
            self.within += len;
            self.position += len;
            return Some(Cow::Borrowed(&chunk[..len]));
        }
        let mut owned = vec![0u8; len];
        self.fill(&mut owned);
        Some(Cow::Owned(owned))
    }

    /// Advance `len` bytes; callers check `remaining()` first.
    fn advance(&mut self, mut len: usize) {
        while len > 0 {
            self.settle();
            let left = self.source.fragment(self.fragment).len() - self.within;
            let step = left.min(len);
            self.within += step;
            self.position += step;
            len -= step;
        }
    }

    /// Move past exhausted and empty fragments while data remains.
    fn settle(&mut self) {
        while self.position < self.len
            && self.within >= self.source.fragment(self.fragment).len()
        {
            self.fragment += 1;
            self.within = 0;
        }
    }
}
