//! # Core Codec Components
//!
//! Primitive encoding and the three buffer codecs built on it.
//!
//! ## Components
//! - **Width**: encoded size of every primitive kind
//! - **Endian / Primitive**: one generic encode/decode body per primitive type
//! - **Buffer**: writes and strict reads over a pre-allocated `&mut [u8]`
//! - **View**: strict reads over a borrowed `&[u8]`
//! - **Stream**: non-failing reads and peeks over fragmented data
//! - **Chunked**: receive queue of `Bytes` chunks for the stream cursor
//! - **Frame**: length-delimited messages and the tokio-util codec
//!
//! ## Error Policies
//! - Buffer and view reads return `Result` and never partially consume
//! - Stream reads return `Option` and never advance on `None`
//! - Buffer writes skip silently on overflow, except the length-less block write

pub mod buffer;
pub mod chunked;
pub mod endian;
pub mod frame;
pub mod prefix;
pub mod primitive;
pub mod stream;
pub mod view;
pub mod width;
