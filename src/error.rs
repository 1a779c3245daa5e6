//! # Error Types
//!
//! Error handling for the buffer codec.
//!
//! Only the strict entry points produce errors: reads on [`MutableBuffer`] and
//! [`ByteView`], the length-less block write, and the size checks on strings and
//! blocks. The streaming cursor reports missing data through `Option` instead.
//!
//! ## Error Categories
//! - **Bounds violations**: a read or strict write would fall outside the buffer
//! - **Size violations**: a string or block is too long for its length prefix
//! - **Framing errors**: a frame declares a body larger than the configured limit,
//!   or the input ends before a frame is complete
//! - **I/O and configuration**: surfaced by the tokio-util codec and config loader
//!
//! ## Example Usage
//! ```rust
//! use wire_buffer::{ByteView, CodecError};
//!
//! let view = ByteView::new(&[0x00, 0x01]);
//! let mut offset = 1;
//! match view.read_be::<u32>(&mut offset) {
//!     Err(CodecError::OutOfBounds { offset, .. }) => assert_eq!(offset, 1),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! [`MutableBuffer`]: crate::MutableBuffer
//! [`ByteView`]: crate::ByteView

use std::io;
use thiserror::Error;

/// Error message constants shared by the config loader.
pub mod constants {
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";
    pub const ERR_LOGGING_INIT: &str = "Failed to install tracing subscriber";
}

// CodecError is the single error type for every fallible codec operation
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Bounds violation at offset {offset}: need {needed} bytes, {available} available")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("String too long: {len} bytes (maximum {max})")]
    StringTooLong { len: usize, max: usize },

    #[error("Block too long: {len} bytes (maximum {max})")]
    BlockTooLong { len: usize, max: usize },

    #[error("Frame too large: {len} bytes (maximum {max})")]
    OversizedFrame { len: usize, max: usize },

    #[error("Stream ended inside a frame: {buffered} bytes buffered, {missing} more needed")]
    TruncatedFrame { buffered: usize, missing: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CodecError {
    /// Bounds violation for an access of `needed` bytes at `offset` in a buffer of `len` bytes.
    pub(crate) fn out_of_bounds(offset: usize, needed: usize, len: usize) -> Self {
        CodecError::OutOfBounds {
            offset,
            needed,
            available: len.saturating_sub(offset),
        }
    }

    /// True for the bounds-violation variant.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, CodecError::OutOfBounds { .. })
    }
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
