//! # Frames
//!
//! Length-delimited messages built on the buffer codecs.
//!
//! This is a reference consumer of the codecs, showing how a protocol layer
//! drives [`StreamCursor`] peeks through an incremental decode. The frame layout
//! below is this module's own convention and not part of the primitive wire
//! contract; `max_frame_size` is likewise a policy of this layer only.
//!
//! ## Wire Format
//! ```text
//! [Kind(2)] [Length(4)] [Body(N)]
//! ```
//! `Kind` is a big-endian `u16`; `Length` is a big-endian `i32`, so the length and
//! body together are exactly an opaque block. A negative length decodes as an
//! empty body.
//!
//! ## Decoding
//! [`FrameDecoder`] is a two-state machine driven by peeks on a [`StreamCursor`]:
//!
//! - `AwaitingHeader`: peek the 6-byte header. Once it is buffered, validate the
//!   declared length, consume the header and move to `AwaitingBody`.
//! - `AwaitingBody`: wait for the declared body. Once it is buffered, consume it
//!   and return the frame.
//!
//! A short read leaves both the cursor and the state unchanged, so the caller
//! simply feeds more bytes and tries again. [`FrameCodec`] runs the machine over
//! a tokio `BytesMut`; [`FrameAssembler`] runs it over a [`ChunkedBytes`] queue.
//!
//! ## End of Input
//! A header is consumed before its body arrives, so the caller's buffer can be
//! empty while a frame is still pending. `decode_eof` on [`FrameCodec`] and
//! [`FrameAssembler::finish`] report [`CodecError::TruncatedFrame`] when input
//! ends in that state or with unparsed bytes left over.
//!
//! ## Security
//! - Declared lengths are checked against `max_frame_size` before any body bytes
//!   are awaited or allocated

use crate::config::{FrameConfig, MAX_FRAME_SIZE};
use crate::core::buffer::MutableBuffer;
use crate::core::chunked::ChunkedBytes;
use crate::core::stream::{Fragments, StreamCursor};
use crate::core::width;
use crate::error::{CodecError, Result};
use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace, warn};

/// Encoded header size: kind plus body length
pub const HEADER_LEN: usize = width::U16 + width::I32;

/// A decoded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: u16,
    pub body: Bytes,
}

impl Frame {
    pub fn new(kind: u16, body: impl Into<Bytes>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }

    /// Bytes this frame occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.body.len()
    }

    /// Write the frame at `offset`, with the same overflow policy as the buffer writes.
    pub fn encode_into(&self, buf: &mut MutableBuffer<'_>, offset: &mut usize) -> Result<()> {
        buf.write(self.kind, offset);
        buf.write_bytes(Some(&self.body[..]), offset)
    }
}

/// Decoder progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeState {
    #[default]
    AwaitingHeader,
    AwaitingBody {
        kind: u16,
        len: usize,
    },
}

/// Incremental frame decoder over any fragmented source
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    state: DecodeState,
    max_frame_size: usize,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(MAX_FRAME_SIZE)
    }
}

impl FrameDecoder {
    pub fn new(max_frame_size: usize) -> Self {
        Self {
            state: DecodeState::AwaitingHeader,
            max_frame_size,
        }
    }

    pub fn from_config(config: &FrameConfig) -> Self {
        Self::new(config.max_frame_size)
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    /// True while a header has been consumed but its body has not.
    pub fn is_mid_frame(&self) -> bool {
        matches!(self.state, DecodeState::AwaitingBody { .. })
    }

    /// Forget any partially decoded frame.
    pub fn reset(&mut self) {
        self.state = DecodeState::AwaitingHeader;
    }

    /// Advance the state machine with whatever `cursor` has buffered.
    ///
    /// Returns `Ok(None)` when more bytes are needed. The cursor moves past every
    /// byte the decoder has taken ownership of, including a header whose body is
    /// still pending, so callers discard `cursor.position()` bytes afterwards.
    pub fn decode<F: ?Sized + Fragments>(
        &mut self,
        cursor: &mut StreamCursor<'_, F>,
    ) -> Result<Option<Frame>> {
        if self.state == DecodeState::AwaitingHeader {
            let Some((kind, len)) = Self::peek_header(cursor) else {
                trace!(buffered = cursor.remaining(), "awaiting frame header");
                return Ok(None);
            };
            if len > self.max_frame_size {
                warn!(kind, len, max = self.max_frame_size, "rejecting oversized frame");
                return Err(CodecError::OversizedFrame {
                    len,
                    max: self.max_frame_size,
                });
            }
            cursor.try_skip(HEADER_LEN);
            trace!(kind, len, "frame header buffered");
            self.state = DecodeState::AwaitingBody { kind, len };
        }

        let DecodeState::AwaitingBody { kind, len } = self.state else {
            return Ok(None);
        };
        let Some(raw) = cursor.try_read_raw(len) else {
            trace!(kind, len, buffered = cursor.remaining(), "awaiting frame body");
            return Ok(None);
        };
        let body = Bytes::copy_from_slice(&raw);
        self.state = DecodeState::AwaitingHeader;
        debug!(kind, len, "frame ready");
        Ok(Some(Frame { kind, body }))
    }

    /// Bytes still needed before the current stage can complete.
    pub fn bytes_needed(&self, buffered: usize) -> usize {
        let target = match self.state {
            DecodeState::AwaitingHeader => HEADER_LEN,
            DecodeState::AwaitingBody { len, .. } => len,
        };
        target.saturating_sub(buffered)
    }

    /// Error unless input ended on a frame boundary with nothing left over.
    pub fn check_finished(&self, buffered: usize) -> Result<()> {
        if !self.is_mid_frame() && buffered == 0 {
            return Ok(());
        }
        let missing = self.bytes_needed(buffered).max(1);
        warn!(buffered, missing, state = ?self.state, "input ended inside a frame");
        Err(CodecError::TruncatedFrame { buffered, missing })
    }

    fn peek_header<F: ?Sized + Fragments>(cursor: &StreamCursor<'_, F>) -> Option<(u16, usize)> {
        let mut probe = cursor.checkpoint();
        let kind = probe.try_read_be::<u16>()?;
        let declared = probe.try_peek_be::<i32>()?;
        Some((kind, usize::try_from(declared).unwrap_or(0)))
    }
}

/// tokio-util codec for [`Frame`]s
#[derive(Debug, Clone, Default)]
pub struct FrameCodec {
    decoder: FrameDecoder,
}

impl FrameCodec {
    pub fn new(max_frame_size: usize) -> Self {
        Self {
            decoder: FrameDecoder::new(max_frame_size),
        }
    }

    pub fn from_config(config: &FrameConfig) -> Self {
        Self {
            decoder: FrameDecoder::from_config(config),
        }
    }

    pub fn max_frame_size(&self) -> usize {
        self.decoder.max_frame_size()
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        let mut cursor = StreamCursor::new(&src[..]);
        let frame = self.decoder.decode(&mut cursor)?;
        let consumed = cursor.position();
        src.advance(consumed);

        if frame.is_none() {
            // Make room for the rest of the pending stage up front.
            src.reserve(self.decoder.bytes_needed(src.len()));
        }
        Ok(frame)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        self.decoder.check_finished(src.len())?;
        Ok(None)
    }
}

impl Encoder<Frame> for FrameCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<()> {
        let max = self.max_frame_size();
        if item.body.len() > max {
            return Err(CodecError::OversizedFrame {
                len: item.body.len(),
                max,
            });
        }

        let size = MutableBuffer::measure(|buf, offset| item.encode_into(buf, offset))?;
        let start = dst.len();
        dst.resize(start + size, 0);

        let mut buf = MutableBuffer::new(&mut dst[start..]);
        let mut offset = 0;
        item.encode_into(&mut buf, &mut offset)?;
        debug_assert_eq!(offset, size);
        Ok(())
    }
}

/// Collects pushed chunks and yields complete frames
#[derive(Debug, Clone, Default)]
pub struct FrameAssembler {
    buffer: ChunkedBytes,
    decoder: FrameDecoder,
}

impl FrameAssembler {
    pub fn new(max_frame_size: usize) -> Self {
        Self {
            buffer: ChunkedBytes::new(),
            decoder: FrameDecoder::new(max_frame_size),
        }
    }

    pub fn from_config(config: &FrameConfig) -> Self {
        Self {
            buffer: ChunkedBytes::new(),
            decoder: FrameDecoder::from_config(config),
        }
    }

    /// Queue a received chunk.
    pub fn push(&mut self, chunk: impl Into<Bytes>) {
        self.buffer.push(chunk);
    }

    /// Next complete frame, if one is buffered.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        let mut cursor = self.buffer.cursor();
        let frame = self.decoder.decode(&mut cursor)?;
        let consumed = cursor.position();
        self.buffer.consume(consumed);
        Ok(frame)
    }

    /// Bytes received but not yet part of a returned frame or consumed header.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn state(&self) -> DecodeState {
        self.decoder.state()
    }

    /// Call once no more chunks will arrive.
    ///
    /// Fails if a frame was started but not completed.
    pub fn finish(&self) -> Result<()> {
        self.decoder.check_finished(self.buffer.len())
    }
}
