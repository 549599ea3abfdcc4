//! Typed 256-bit key set.

use std::fmt;

use crate::key::{KeyId, WORDS};

/// One plane of key state: a set of keys packed into eight 32-bit words.
///
/// Key `k` lives in word `k >> 5` under mask `1 << (k & 31)`. The word layout is
/// exposed read-only through [`KeyBits::words`] so storage backends can copy a
/// plane one word at a time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyBits {
    words: [u32; WORDS],
}

impl KeyBits {
    pub const EMPTY: Self = Self { words: [0; WORDS] };

    pub const fn from_words(words: [u32; WORDS]) -> Self {
        Self { words }
    }

    pub const fn words(&self) -> &[u32; WORDS] {
        &self.words
    }

    #[inline]
    pub const fn contains(&self, key: KeyId) -> bool {
        self.words[key.word()] & key.mask() != 0
    }

    pub fn insert(&mut self, key: KeyId) {
        self.words[key.word()] |= key.mask();
    }

    pub fn remove(&mut self, key: KeyId) {
        self.words[key.word()] &= !key.mask();
    }

    pub fn clear(&mut self) {
        self.words = [0; WORDS];
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of keys in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut words = self.words;
        for (w, o) in words.iter_mut().zip(other.words) {
            *w |= o;
        }
        Self { words }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let mut words = self.words;
        for (w, o) in words.iter_mut().zip(other.words) {
            *w &= o;
        }
        Self { words }
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> Iter {
        Iter {
            words: self.words,
            word: 0,
        }
    }
}

impl FromIterator<KeyId> for KeyBits {
    fn from_iter<I: IntoIterator<Item = KeyId>>(iter: I) -> Self {
        let mut bits = Self::EMPTY;
        bits.extend(iter);
        bits
    }
}

impl Extend<KeyId> for KeyBits {
    fn extend<I: IntoIterator<Item = KeyId>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a> IntoIterator for &'a KeyBits {
    type Item = KeyId;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl fmt::Debug for KeyBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(KeyId::code)).finish()
    }
}

/// Iterator over the keys of a [`KeyBits`], lowest code first.
#[derive(Debug, Clone)]
pub struct Iter {
    words: [u32; WORDS],
    word: usize,
}

impl Iterator for Iter {
    type Item = KeyId;

    fn next(&mut self) -> Option<KeyId> {
        while self.word < WORDS {
            let bits = self.words[self.word];
            if bits != 0 {
                let bit = bits.trailing_zeros();
                // Clear the lowest set bit.
                self.words[self.word] = bits & (bits - 1);
                return Some(KeyId::new((self.word as u32 * 32 + bit) as u8));
            }
            self.word += 1;
        }
        None
    }
}
