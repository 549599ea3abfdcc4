//! Event ingestion from the window layer into the live store.
//!
//! The window layer owns the event pump and hands over two kinds of events: key
//! transitions and focus changes. A focus change in either direction clears the
//! whole store, since a key held while focus moves will never deliver its
//! matching up event. The key has to be pressed again to register.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use log::{debug, warn};

use crate::config::OutOfRangePolicy;
use crate::error::InputError;
use crate::key::KeyId;
use crate::store::KeyStateStore;
use crate::word::WordCell;

/// Input events delivered by the window/event layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key went down or up.
    Key { key: KeyId, down: bool },
    /// The window gained or lost keyboard focus.
    Focus { gained: bool },
}

impl InputEvent {
    pub const fn key_down(key: KeyId) -> Self {
        Self::Key { key, down: true }
    }

    pub const fn key_up(key: KeyId) -> Self {
        Self::Key { key, down: false }
    }
}

/// Non-blocking source of input events.
pub trait EventSource {
    /// Next pending event, or `None` when nothing is available right now.
    fn next_event(&mut self) -> Option<InputEvent>;
}

impl EventSource for Receiver<InputEvent> {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.try_recv().ok()
    }
}

/// In-memory event source for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    events: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) -> &mut Self {
        self.events.push_back(event);
        self
    }

    pub fn down(&mut self, key: KeyId) -> &mut Self {
        self.push(InputEvent::key_down(key))
    }

    pub fn up(&mut self, key: KeyId) -> &mut Self {
        self.push(InputEvent::key_up(key))
    }

    pub fn focus(&mut self, gained: bool) -> &mut Self {
        self.push(InputEvent::Focus { gained })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

/// Counters kept by an [`EventIngest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestStats {
    /// Key transitions applied to the store.
    pub key_events: u64,
    /// Focus changes, each of which reset the store.
    pub focus_resets: u64,
    /// Raw scan codes dropped by [`OutOfRangePolicy::Reject`].
    pub rejected: u64,
}

impl IngestStats {
    /// Add another set of counters into this one.
    pub fn accumulate(&mut self, other: IngestStats) {
        self.key_events += other.key_events;
        self.focus_resets += other.focus_resets;
        self.rejected += other.rejected;
    }
}

/// The writer side of a [`KeyStateStore`].
///
/// Only one ingest may write to a store at a time; the store does not enforce
/// this.
#[derive(Debug)]
pub struct EventIngest<'a, W: WordCell> {
    store: &'a KeyStateStore<W>,
    policy: OutOfRangePolicy,
    stats: IngestStats,
}

impl<'a, W: WordCell> EventIngest<'a, W> {
    pub fn new(store: &'a KeyStateStore<W>) -> Self {
        Self::with_policy(store, OutOfRangePolicy::default())
    }

    pub fn with_policy(store: &'a KeyStateStore<W>, policy: OutOfRangePolicy) -> Self {
        Self {
            store,
            policy,
            stats: IngestStats::default(),
        }
    }

    /// Apply a single event.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, down } => {
                self.store.set_key(key, down);
                self.stats.key_events += 1;
            }
            InputEvent::Focus { gained } => {
                debug!(
                    "Keyboard focus {}, clearing key state",
                    if gained { "gained" } else { "lost" }
                );
                self.store.reset();
                self.stats.focus_resets += 1;
            }
        }
    }

    /// Apply a transition for a platform scan code wider than 8 bits.
    ///
    /// With [`OutOfRangePolicy::Mask`] the low byte is used. With
    /// [`OutOfRangePolicy::Reject`] codes above 255 leave the store untouched
    /// and return [`InputError::KeyOutOfRange`].
    pub fn apply_scan_code(&mut self, code: u32, down: bool) -> Result<KeyId, InputError> {
        let key = match self.policy {
            OutOfRangePolicy::Mask => KeyId::from_masked(code),
            OutOfRangePolicy::Reject => KeyId::try_from(code).inspect_err(|_| {
                warn!("Dropping key event for out-of-range scan code {code}");
                self.stats.rejected += 1;
            })?,
        };
        self.apply(InputEvent::Key { key, down });
        Ok(key)
    }

    /// Apply every event the source has available, without blocking.
    /// Returns the number of events applied.
    pub fn drain<S: EventSource + ?Sized>(&mut self, source: &mut S) -> usize {
        let mut applied = 0;
        while let Some(event) = source.next_event() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    pub fn policy(&self) -> OutOfRangePolicy {
        self.policy
    }

    pub fn store(&self) -> &'a KeyStateStore<W> {
        self.store
    }
}
