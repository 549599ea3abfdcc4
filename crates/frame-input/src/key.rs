//! Key identifiers and their bit addressing.
//!
//! A key is an 8-bit scan code, so every value names a valid key. Wider codes
//! coming from a platform layer go through [`KeyId::from_masked`] or one of the
//! `TryFrom` conversions.

use std::fmt;

use crate::error::InputError;

/// Number of 32-bit words backing one 256-key plane.
pub const WORDS: usize = 8;

/// Number of addressable keys.
pub const KEY_COUNT: usize = 256;

/// A physical key, named by its layout-independent scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct KeyId(u8);

impl KeyId {
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Keep only the low 8 bits of a wide platform code.
    pub const fn from_masked(code: u32) -> Self {
        Self((code & 0xFF) as u8)
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    /// Index of the word holding this key's bit.
    #[inline]
    pub const fn word(self) -> usize {
        (self.0 >> 5) as usize
    }

    /// Mask selecting this key's bit inside its word.
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << (self.0 & 31)
    }

    /// Iterate over all 256 keys in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = KeyId> + ExactSizeIterator {
        (0..=u8::MAX).map(KeyId)
    }
}

impl From<u8> for KeyId {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<KeyId> for u8 {
    fn from(key: KeyId) -> Self {
        key.0
    }
}

impl TryFrom<u32> for KeyId {
    type Error = InputError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        u8::try_from(code)
            .map(Self)
            .map_err(|_| InputError::KeyOutOfRange { code: code.into() })
    }
}

impl TryFrom<i32> for KeyId {
    type Error = InputError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        u8::try_from(code)
            .map(Self)
            .map_err(|_| InputError::KeyOutOfRange { code: code.into() })
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_and_mask_addressing() {
        assert_eq!(KeyId::new(0).word(), 0);
        assert_eq!(KeyId::new(0).mask(), 1);
        assert_eq!(KeyId::new(31).word(), 0);
        assert_eq!(KeyId::new(31).mask(), 1 << 31);
        assert_eq!(KeyId::new(32).word(), 1);
        assert_eq!(KeyId::new(32).mask(), 1);
        assert_eq!(KeyId::new(255).word(), WORDS - 1);
        assert_eq!(KeyId::new(255).mask(), 1 << 31);
    }

    #[test]
    fn every_key_maps_to_a_distinct_bit() {
        let mut seen = [[false; 32]; WORDS];
        for key in KeyId::all() {
            let bit = key.mask().trailing_zeros() as usize;
            assert!(!seen[key.word()][bit], "{key} collides");
            seen[key.word()][bit] = true;
        }
        assert!(seen.iter().flatten().all(|&b| b));
    }

    #[test]
    fn masked_conversion_keeps_low_byte() {
        assert_eq!(KeyId::from_masked(0x141), KeyId::new(0x41));
        assert_eq!(KeyId::from_masked(u32::MAX), KeyId::new(255));
    }

    #[test]
    fn checked_conversion_rejects_wide_codes() {
        assert_eq!(KeyId::try_from(200u32), Ok(KeyId::new(200)));
        assert_eq!(
            KeyId::try_from(256u32),
            Err(InputError::KeyOutOfRange { code: 256 })
        );
        assert_eq!(
            KeyId::try_from(-1i32),
            Err(InputError::KeyOutOfRange { code: -1 })
        );
    }

    #[test]
    fn all_covers_the_domain() {
        assert_eq!(KeyId::all().len(), KEY_COUNT);
        assert_eq!(KeyId::all().next_back(), Some(KeyId::new(255)));
    }
}
