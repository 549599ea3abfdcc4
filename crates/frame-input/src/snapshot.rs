//! Point-in-time keyboard state handed to the game loop.

use crate::bitset::KeyBits;
use crate::key::KeyId;
use crate::store::Plane;

/// An owned copy of the keyboard state taken by a sample.
///
/// Snapshots are `Copy` and allocation-free; holding or copying one never
/// affects the live store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardState {
    pub(crate) held: KeyBits,
    pub(crate) pressed: KeyBits,
    pub(crate) released: KeyBits,
    pub(crate) last_key_down: Option<KeyId>,
    pub(crate) last_key_up: Option<KeyId>,
}

impl KeyboardState {
    /// Keys physically down when the sample was taken.
    pub fn held(&self) -> &KeyBits {
        &self.held
    }

    /// Keys that went down at least once during the frame.
    pub fn pressed(&self) -> &KeyBits {
        &self.pressed
    }

    /// Keys that went up at least once during the frame.
    pub fn released(&self) -> &KeyBits {
        &self.released
    }

    pub fn plane(&self, plane: Plane) -> &KeyBits {
        match plane {
            Plane::Held => &self.held,
            Plane::Pressed => &self.pressed,
            Plane::Released => &self.released,
        }
    }

    pub fn last_key_down(&self) -> Option<KeyId> {
        self.last_key_down
    }

    pub fn last_key_up(&self) -> Option<KeyId> {
        self.last_key_up
    }

    /// Whether any edge or latch was captured for the frame.
    pub fn has_transients(&self) -> bool {
        !self.pressed.is_empty()
            || !self.released.is_empty()
            || self.last_key_down.is_some()
            || self.last_key_up.is_some()
    }

    /// Keys that were both pressed and released within the frame.
    pub fn tapped(&self) -> KeyBits {
        self.pressed.intersection(&self.released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_empty() {
        let state = KeyboardState::default();
        assert!(state.held().is_empty());
        assert!(!state.has_transients());
        assert_eq!(state.last_key_down(), None);
    }

    #[test]
    fn latch_alone_counts_as_transient() {
        let state = KeyboardState {
            last_key_up: Some(KeyId::new(9)),
            ..KeyboardState::default()
        };
        assert!(state.has_transients());
    }

    #[test]
    fn tapped_is_pressed_and_released() {
        let state = KeyboardState {
            pressed: [1, 2].into_iter().map(KeyId::new).collect(),
            released: [2, 3].into_iter().map(KeyId::new).collect(),
            ..KeyboardState::default()
        };
        let tapped: Vec<u8> = state.tapped().iter().map(KeyId::code).collect();
        assert_eq!(tapped, vec![2]);
    }

    #[test]
    fn copies_are_independent() {
        let mut a = KeyboardState::default();
        let b = a;
        a.held.insert(KeyId::new(5));
        assert!(!b.held().contains(KeyId::new(5)));
        assert_eq!(a.plane(Plane::Held).len(), 1);
    }
}
