//! Point queries against a snapshot or the live store.

use crate::key::KeyId;
use crate::snapshot::KeyboardState;
use crate::store::{KeyStateStore, Plane};
use crate::word::WordCell;

/// Per-key queries shared by [`KeyboardState`] and [`KeyStateStore`].
///
/// Only [`KeyQuery::contains`] has to be implemented.
pub trait KeyQuery {
    /// Whether `key`'s bit is set in `plane`.
    fn contains(&self, plane: Plane, key: KeyId) -> bool;

    /// `include_history == false`: the key is held right now.
    /// `include_history == true`: the key went down at least once since the
    /// last consuming sample, whatever its current state.
    fn is_key_down(&self, key: KeyId, include_history: bool) -> bool {
        if include_history {
            self.contains(Plane::Pressed, key)
        } else {
            self.contains(Plane::Held, key)
        }
    }

    /// `include_history == true`: the key went up at least once since the
    /// last consuming sample.
    /// `include_history == false`: the key is not held right now. This is the
    /// complement of `held`, not "released this frame", so it is true for keys
    /// that were never pressed.
    fn is_key_up(&self, key: KeyId, include_history: bool) -> bool {
        if include_history {
            self.contains(Plane::Released, key)
        } else {
            !self.contains(Plane::Held, key)
        }
    }
}

impl KeyQuery for KeyboardState {
    #[inline]
    fn contains(&self, plane: Plane, key: KeyId) -> bool {
        self.plane(plane).contains(key)
    }
}

impl<W: WordCell> KeyQuery for KeyStateStore<W> {
    #[inline]
    fn contains(&self, plane: Plane, key: KeyId) -> bool {
        self.read_bit(plane, key)
    }
}
