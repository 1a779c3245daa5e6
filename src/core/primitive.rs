//! Fixed-width primitive encoding.
//!
//! [`Primitive`] is the single place where a value becomes bytes and back. Every
//! codec in this crate checks bounds first and then hands exactly `WIDTH` bytes
//! to these routines.

use crate::core::endian::{sealed::Sealed, Endianness};
use crate::core::width;
use std::fmt;

/// A fixed-width value with a canonical wire encoding.
///
/// Floats encode their IEEE-754 bit pattern in the requested byte order, the
/// same bytes produced by swapping the native bits as an integer of equal width.
pub trait Primitive: Copy + PartialEq + fmt::Debug + Send + Sync + Sealed + 'static {
    /// Encoded size in bytes.
    const WIDTH: usize;

    /// Decode from the first `WIDTH` bytes of `bytes`.
    ///
    /// Callers guarantee `bytes.len() >= WIDTH`.
    fn decode(bytes: &[u8], order: Endianness) -> Self;

    /// Encode into the first `WIDTH` bytes of `out`.
    ///
    /// Callers guarantee `out.len() >= WIDTH`.
    fn encode(self, out: &mut [u8], order: Endianness);
}

macro_rules! impl_primitive {
    ($($ty:ty => $width:path),* $(,)?) => {$(
        impl Sealed for $ty {}

        impl Primitive for $ty {
            const WIDTH: usize = $width;

            #[inline]
            fn decode(bytes: &[u8], order: Endianness) -> Self {
                let mut raw = [0u8; $width];
                raw.copy_from_slice(&bytes[..$width]);
                match order {
                    Endianness::Big => <$ty>::from_be_bytes(raw),
                    Endianness::Little => <$ty>::from_le_bytes(raw),
                }
            }

            #[inline]
            fn encode(self, out: &mut [u8], order: Endianness) {
                let raw = match order {
                    Endianness::Big => self.to_be_bytes(),
                    Endianness::Little => self.to_le_bytes(),
                };
                out[..$width].copy_from_slice(&raw);
            }
        }
    )*};
}

impl_primitive! {
    i8 => width::I8,
    u8 => width::U8,
    i16 => width::I16,
    u16 => width::U16,
    i32 => width::I32,
    u32 => width::U32,
    i64 => width::I64,
    u64 => width::U64,
    f32 => width::F32,
    f64 => width::F64,
}

impl Sealed for bool {}

impl Primitive for bool {
    const WIDTH: usize = width::BOOL;

    #[inline]
    fn decode(bytes: &[u8], _order: Endianness) -> Self {
        bytes[0] != 0
    }

    #[inline]
    fn encode(self, out: &mut [u8], _order: Endianness) {
        out[0] = u8::from(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded<T: Primitive>(value: T, order: Endianness) -> Vec<u8> {
        let mut out = vec![0u8; T::WIDTH];
        value.encode(&mut out, order);
        out
    }

    #[test]
    fn test_integer_byte_layout() {
        assert_eq!(
            encoded(0x0102_0304u32, Endianness::Big),
            vec![0x01, 0x02, 0x03, 0x04]
        );
        assert_eq!(
            encoded(0x0102_0304u32, Endianness::Little),
            vec![0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(encoded(-2i16, Endianness::Big), vec![0xFF, 0xFE]);
    }

    #[test]
    fn test_float_matches_swapped_integer_bits() {
        let value = 1.5f64;
        let expected = value.to_bits().to_be_bytes().to_vec();
        assert_eq!(encoded(value, Endianness::Big), expected);

        let value = -0.25f32;
        assert_eq!(
            encoded(value, Endianness::Big),
            value.to_bits().swap_bytes().to_le_bytes().to_vec()
        );
    }

    #[test]
    fn test_bool_nonzero_is_true() {
        assert!(bool::decode(&[0x7F], Endianness::Big));
        assert!(!bool::decode(&[0x00], Endianness::Little));
        assert_eq!(encoded(true, Endianness::Big), vec![0x01]);
        assert_eq!(encoded(false, Endianness::Big), vec![0x00]);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let bytes = [0x00, 0x2A, 0xFF, 0xFF];
        assert_eq!(u16::decode(&bytes, Endianness::Big), 42);
    }

    #[test]
    fn test_widths() {
        assert_eq!(<u8 as Primitive>::WIDTH, 1);
        assert_eq!(<i16 as Primitive>::WIDTH, 2);
        assert_eq!(<f32 as Primitive>::WIDTH, 4);
        assert_eq!(<u64 as Primitive>::WIDTH, 8);
        assert_eq!(<bool as Primitive>::WIDTH, 1);
    }
}
