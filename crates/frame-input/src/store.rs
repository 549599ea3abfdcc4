//! Live keyboard state shared between the event thread and the game loop.

use std::array;
use std::cell::Cell;
use std::sync::atomic::AtomicU32;

use crate::bitset::KeyBits;
use crate::key::{KeyId, WORDS};
use crate::word::WordCell;

/// The three state aspects tracked per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Key is physically down right now.
    Held,
    /// Key went down at least once since the last consuming sample.
    Pressed,
    /// Key went up at least once since the last consuming sample.
    Released,
}

/// Store backed by atomic words, shareable across threads.
pub type SharedKeyStore = KeyStateStore<AtomicU32>;

/// Store backed by plain words, for a single thread.
pub type LocalKeyStore = KeyStateStore<Cell<u32>>;

/// Bit-packed key state for all 256 keys plus the last-key latches.
///
/// Writes assume exactly one writer at a time. With [`AtomicU32`] words any
/// number of readers may query or sample concurrently with that writer; each
/// word is updated atomically but there is no ordering across words.
///
/// Latches hold `code + 1`, with `0` meaning no key.
#[derive(Debug)]
pub struct KeyStateStore<W: WordCell = AtomicU32> {
    pub(crate) held: [W; WORDS],
    pub(crate) pressed: [W; WORDS],
    pub(crate) released: [W; WORDS],
    pub(crate) last_key_down: W,
    pub(crate) last_key_up: W,
}

impl<W: WordCell> KeyStateStore<W> {
    /// Create a zeroed store: every key up, no edges, empty latches.
    pub fn new() -> Self {
        Self {
            held: array::from_fn(|_| W::default()),
            pressed: array::from_fn(|_| W::default()),
            released: array::from_fn(|_| W::default()),
            last_key_down: W::default(),
            last_key_up: W::default(),
        }
    }

    /// Record a key transition.
    ///
    /// A down event sets `held` and the `pressed` edge and overwrites the
    /// last-down latch; an up event clears `held`, sets the `released` edge
    /// and overwrites the last-up latch. Edges accumulate until a consuming
    /// sample, so repeated or redundant transitions are all recorded.
    pub fn set_key(&self, key: KeyId, down: bool) {
        let (word, mask) = (key.word(), key.mask());
        if down {
            self.held[word].fetch_or(mask);
            self.pressed[word].fetch_or(mask);
            self.last_key_down.store(encode_latch(key));
        } else {
            self.held[word].fetch_and(!mask);
            self.released[word].fetch_or(mask);
            self.last_key_up.store(encode_latch(key));
        }
    }

    /// Read one bit of the live store without side effects.
    #[inline]
    pub fn read_bit(&self, plane: Plane, key: KeyId) -> bool {
        self.plane(plane)[key.word()].load() & key.mask() != 0
    }

    /// Copy one live plane word by word.
    ///
    /// Each word is read atomically, the plane as a whole is not.
    pub fn read_plane(&self, plane: Plane) -> KeyBits {
        let words = self.plane(plane);
        KeyBits::from_words(array::from_fn(|i| words[i].load()))
    }

    pub fn last_key_down(&self) -> Option<KeyId> {
        decode_latch(self.last_key_down.load())
    }

    pub fn last_key_up(&self) -> Option<KeyId> {
        decode_latch(self.last_key_up.load())
    }

    /// Force every key up and drop all edges and latches.
    pub fn reset(&self) {
        for word in self.held.iter().chain(&self.pressed).chain(&self.released) {
            word.store(0);
        }
        self.last_key_down.store(0);
        self.last_key_up.store(0);
    }

    pub(crate) fn plane(&self, plane: Plane) -> &[W; WORDS] {
        match plane {
            Plane::Held => &self.held,
            Plane::Pressed => &self.pressed,
            Plane::Released => &self.released,
        }
    }
}

impl<W: WordCell> Default for KeyStateStore<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub(crate) fn encode_latch(key: KeyId) -> u32 {
    u32::from(key.code()) + 1
}

#[inline]
pub(crate) fn decode_latch(raw: u32) -> Option<KeyId> {
    raw.checked_sub(1).map(KeyId::from_masked)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: KeyId = KeyId::new(65);
    const B: KeyId = KeyId::new(66);

    fn down_then_up<W: WordCell>() {
        let store = KeyStateStore::<W>::new();

        store.set_key(A, true);
        assert!(store.read_bit(Plane::Held, A));
        assert!(store.read_bit(Plane::Pressed, A));
        assert!(!store.read_bit(Plane::Released, A));
        assert_eq!(store.last_key_down(), Some(A));
        assert_eq!(store.last_key_up(), None);

        store.set_key(A, false);
        assert!(!store.read_bit(Plane::Held, A));
        // The down edge stays recorded until a consuming sample.
        assert!(store.read_bit(Plane::Pressed, A));
        assert!(store.read_bit(Plane::Released, A));
        assert_eq!(store.last_key_up(), Some(A));
    }

    #[test]
    fn set_key_atomic() {
        down_then_up::<AtomicU32>();
    }

    #[test]
    fn set_key_local() {
        down_then_up::<Cell<u32>>();
    }

    #[test]
    fn new_store_is_zeroed() {
        let store = SharedKeyStore::new();
        for key in KeyId::all() {
            assert!(!store.read_bit(Plane::Held, key));
            assert!(!store.read_bit(Plane::Pressed, key));
            assert!(!store.read_bit(Plane::Released, key));
        }
        assert_eq!(store.last_key_down(), None);
        assert_eq!(store.last_key_up(), None);
    }

    #[test]
    fn latch_keeps_last_value_only() {
        let store = LocalKeyStore::new();
        store.set_key(A, true);
        store.set_key(B, true);
        assert_eq!(store.last_key_down(), Some(B));
        store.set_key(B, false);
        store.set_key(A, false);
        assert_eq!(store.last_key_up(), Some(A));
    }

    #[test]
    fn latch_distinguishes_key_zero_from_none() {
        let store = SharedKeyStore::new();
        store.set_key(KeyId::new(0), true);
        assert_eq!(store.last_key_down(), Some(KeyId::new(0)));
        store.set_key(KeyId::new(255), false);
        assert_eq!(store.last_key_up(), Some(KeyId::new(255)));
    }

    #[test]
    fn keys_in_same_word_are_independent() {
        let store = SharedKeyStore::new();
        store.set_key(KeyId::new(64), true);
        store.set_key(KeyId::new(65), true);
        store.set_key(KeyId::new(64), false);
        assert!(!store.read_bit(Plane::Held, KeyId::new(64)));
        assert!(store.read_bit(Plane::Held, KeyId::new(65)));
    }

    #[test]
    fn reset_clears_everything() {
        let store = SharedKeyStore::new();
        store.set_key(A, true);
        store.set_key(B, true);
        store.set_key(A, false);

        store.reset();

        assert!(store.read_plane(Plane::Held).is_empty());
        assert!(store.read_plane(Plane::Pressed).is_empty());
        assert!(store.read_plane(Plane::Released).is_empty());
        assert_eq!(store.last_key_down(), None);
        assert_eq!(store.last_key_up(), None);
    }

    #[test]
    fn read_plane_copies_live_bits() {
        let store = LocalKeyStore::new();
        store.set_key(KeyId::new(1), true);
        store.set_key(KeyId::new(200), true);
        let held = store.read_plane(Plane::Held);
        assert_eq!(held.len(), 2);
        assert!(held.contains(KeyId::new(200)));
    }
}
