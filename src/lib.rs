//! # wire-buffer
//!
//! Bounds-checked binary buffer codec.
//!
//! Encodes and decodes fixed-width primitives (`bool`, 8/16/32/64-bit integers,
//! `f32`/`f64`) and length-prefixed fields (UTF-8 strings, opaque byte blocks)
//! over three kinds of storage:
//!
//! - [`MutableBuffer`]: a pre-allocated `&mut [u8]` written and read through a
//!   caller-owned cursor. Writes that do not fit are skipped silently so the same
//!   encode routine doubles as a size measurement pass.
//! - [`ByteView`]: a borrowed `&[u8]` with strict, `Result`-returning reads in
//!   either byte order.
//! - [`StreamCursor`]: a cursor over fragmented, partially received data with
//!   `Option`-returning `try_read_*` and `try_peek_*` operations.
//!
//! ## Wire Format
//! ```text
//! integers   big-endian unless a little-endian entry point is used
//! bool       [u8]             nonzero = true
//! string     [i16 BE len][len UTF-8 bytes]
//! long str   [i32 BE len][len UTF-8 bytes]
//! block      [i32 BE len][len raw bytes]
//! ```
//!
//! ## Example
//! ```rust
//! use wire_buffer::{ByteView, MutableBuffer};
//!
//! # fn main() -> wire_buffer::Result<()> {
//! let mut storage = [0u8; 16];
//! let mut buf = MutableBuffer::new(&mut storage);
//! let mut offset = 0;
//! buf.write(42u32, &mut offset);
//! buf.write_str(Some("hi"), &mut offset)?;
//!
//! let view = ByteView::new(&storage);
//! let mut offset = 0;
//! assert_eq!(view.read_be::<u32>(&mut offset)?, 42);
//! assert_eq!(view.read_str(&mut offset)?, "hi");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::buffer::MutableBuffer;
pub use crate::core::chunked::ChunkedBytes;
pub use crate::core::endian::{BigEndian, ByteOrder, Endianness, LittleEndian};
pub use crate::core::frame::{Frame, FrameAssembler, FrameCodec, FrameDecoder};
pub use crate::core::primitive::Primitive;
pub use crate::core::stream::{Fragments, StreamCursor};
pub use crate::core::view::ByteView;
pub use crate::error::{CodecError, Result};
