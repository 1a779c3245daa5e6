//! # Byte Order
//!
//! Byte order selection for primitive encoding.
//!
//! Readers are generic over a [`ByteOrder`] marker type so each primitive has one
//! decoding body shared by the big-endian and little-endian entry points. The
//! runtime [`Endianness`] value is what that body actually matches on; since the
//! marker's value is a constant the branch folds away after monomorphization.

use std::fmt;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Runtime byte order selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Most significant byte first (network order, the wire default)
    #[default]
    Big,
    /// Least significant byte first
    Little,
}

impl Endianness {
    /// Network byte order.
    pub const NETWORK: Endianness = Endianness::Big;

    /// Byte order of the host this crate was compiled for.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Endianness::Big => "big-endian",
            Endianness::Little => "little-endian",
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compile-time byte order marker.
///
/// Implemented only by [`BigEndian`] and [`LittleEndian`].
pub trait ByteOrder:
    sealed::Sealed + Copy + Default + fmt::Debug + Send + Sync + 'static
{
    const ENDIANNESS: Endianness;
}

/// Big-endian (network order) marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BigEndian;

/// Little-endian marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LittleEndian;

/// Alias used by the length prefixes, which are always big-endian.
pub type NetworkEndian = BigEndian;

impl sealed::Sealed for BigEndian {}
impl sealed::Sealed for LittleEndian {}

impl ByteOrder for BigEndian {
    const ENDIANNESS: Endianness = Endianness::Big;
}

impl ByteOrder for LittleEndian {
    const ENDIANNESS: Endianness = Endianness::Little;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_endianness() {
        assert_eq!(BigEndian::ENDIANNESS, Endianness::Big);
        assert_eq!(LittleEndian::ENDIANNESS, Endianness::Little);
        assert_eq!(NetworkEndian::ENDIANNESS, Endianness::NETWORK);
    }

    #[test]
    fn test_default_is_network_order() {
        assert_eq!(Endianness::default(), Endianness::Big);
    }

    #[test]
    fn test_native_matches_host() {
        let probe = 1u16.to_ne_bytes();
        let expected = if probe[0] == 1 {
            Endianness::Little
        } else {
            Endianness::Big
        };
        assert_eq!(Endianness::native(), expected);
        assert_eq!(Endianness::Little.to_string(), "little-endian");
    }
}
