//! Frame sampling: turning the live store into a per-tick snapshot.
//!
//! `held` is always copied. The transient state (`pressed`, `released` and the
//! two latches) is either peeked or exchanged with zero word by word, so a
//! consuming sample both reads and opens the next frame in one call.
//!
//! Edges are accumulated rather than diffed: a key tapped between two samples
//! shows up as both pressed and released in the next snapshot.
//!
//! Consistency is per word. With atomic words the 256-bit `held` copy is not a
//! single instant, but the writer's per-word OR and the sampler's per-word swap
//! are both atomic, so each edge lands in exactly one consuming sample. Plain
//! words are confined to one thread, where events and samples never overlap.

use std::array;

use log::trace;

use crate::bitset::KeyBits;
use crate::key::WORDS;
use crate::snapshot::KeyboardState;
use crate::store::{KeyStateStore, decode_latch};
use crate::word::WordCell;

impl<W: WordCell> KeyStateStore<W> {
    /// Take a snapshot, consuming the frame's edges when `consume_frame` is set.
    ///
    /// A non-consuming sample is idempotent and leaves the store untouched.
    pub fn sample(&self, consume_frame: bool) -> KeyboardState {
        let held = copy_words(&self.held);
        let state = if consume_frame {
            KeyboardState {
                held,
                pressed: take_words(&self.pressed),
                released: take_words(&self.released),
                last_key_down: decode_latch(self.last_key_down.swap(0)),
                last_key_up: decode_latch(self.last_key_up.swap(0)),
            }
        } else {
            KeyboardState {
                held,
                pressed: copy_words(&self.pressed),
                released: copy_words(&self.released),
                last_key_down: decode_latch(self.last_key_down.load()),
                last_key_up: decode_latch(self.last_key_up.load()),
            }
        };
        if consume_frame {
            trace!(
                "Frame consumed: held={}, pressed={}, released={}",
                state.held.len(),
                state.pressed.len(),
                state.released.len()
            );
        }
        state
    }

    /// Sample and clear the frame's edges. Call once per tick.
    pub fn consume_frame(&self) -> KeyboardState {
        self.sample(true)
    }

    /// Sample without clearing anything.
    pub fn peek(&self) -> KeyboardState {
        self.sample(false)
    }
}

fn copy_words<W: WordCell>(words: &[W; WORDS]) -> KeyBits {
    KeyBits::from_words(array::from_fn(|i| words[i].load()))
}

fn take_words<W: WordCell>(words: &[W; WORDS]) -> KeyBits {
    KeyBits::from_words(array::from_fn(|i| words[i].swap(0)))
}
