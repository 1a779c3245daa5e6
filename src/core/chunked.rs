//! Receive queue of byte chunks.
//!
//! [`ChunkedBytes`] accumulates data as it arrives without copying it into one
//! contiguous buffer. Decoders walk it with a [`StreamCursor`] and then call
//! [`ChunkedBytes::consume`] with the cursor position once a message is complete.

use crate::core::stream::{Fragments, StreamCursor};
use bytes::{Buf, Bytes};
use std::collections::VecDeque;

/// Queue of received chunks read as one logical stream
#[derive(Debug, Clone, Default)]
pub struct ChunkedBytes {
    chunks: VecDeque<Bytes>,
    len: usize,
}

impl ChunkedBytes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a received chunk. Empty chunks are dropped.
    pub fn push(&mut self, chunk: impl Into<Bytes>) {
        let chunk = chunk.into();
        if chunk.is_empty() {
            return;
        }
        self.len += chunk.len();
        self.chunks.push_back(chunk);
    }

    /// Total buffered bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of chunks currently held.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Cursor at the start of the buffered data.
    pub fn cursor(&self) -> StreamCursor<'_, Self> {
        StreamCursor::new(self)
    }

    /// Drop up to `count` bytes from the front.
    pub fn consume(&mut self, count: usize) {
        self.advance(count.min(self.len));
    }

    /// Remove all buffered data.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.len = 0;
    }
}

impl Fragments for ChunkedBytes {
    fn fragment_count(&self) -> usize {
        self.chunks.len()
    }

    fn fragment(&self, index: usize) -> &[u8] {
        self.chunks.get(index).map_or(&[][..], |chunk| &chunk[..])
    }

    fn total_len(&self) -> usize {
        self.len
    }
}

impl Buf for ChunkedBytes {
    fn remaining(&self) -> usize {
        self.len
    }

    fn chunk(&self) -> &[u8] {
        self.fragment(0)
    }

    fn advance(&mut self, mut cnt: usize) {
        assert!(
            cnt <= self.len,
            "cannot advance past end of buffer: {cnt} > {}",
            self.len
        );
        self.len -= cnt;
        while cnt > 0 {
            let Some(front) = self.chunks.front_mut() else {
                break;
            };
            if cnt < front.len() {
                front.advance(cnt);
                break;
            }
            cnt -= front.len();
            self.chunks.pop_front();
        }
    }
}

impl<B: Into<Bytes>> FromIterator<B> for ChunkedBytes {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        let mut out = Self::new();
        for chunk in iter {
            out.push(chunk);
        }
        out
    }
}
