//! Configuration-selected keyboard store.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::config::{InputConfig, OutOfRangePolicy, StorageMode};
use crate::error::InputError;
use crate::ingest::{EventIngest, IngestStats, InputEvent};
use crate::key::KeyId;
use crate::query::KeyQuery;
use crate::snapshot::KeyboardState;
use crate::store::{LocalKeyStore, Plane, SharedKeyStore};

/// Ingest counters shared by the clones of an atomic handle.
#[derive(Debug, Default)]
pub struct SharedStats {
    key_events: AtomicU64,
    focus_resets: AtomicU64,
    rejected: AtomicU64,
}

impl SharedStats {
    fn add(&self, delta: IngestStats) {
        self.key_events.fetch_add(delta.key_events, Ordering::Relaxed);
        self.focus_resets.fetch_add(delta.focus_resets, Ordering::Relaxed);
        self.rejected.fetch_add(delta.rejected, Ordering::Relaxed);
    }

    fn load(&self) -> IngestStats {
        IngestStats {
            key_events: self.key_events.load(Ordering::Relaxed),
            focus_resets: self.focus_resets.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

/// A keyboard store whose word storage was picked at construction time.
///
/// Cloning the handle shares the same store and the same ingest counters. The
/// atomic store can be handed to an event thread through
/// [`KeyboardHandle::shared`]; the local store stays on the thread that built
/// it.
///
/// The store accepts one writer at a time. Once [`KeyboardHandle::shared`] has
/// given the store to an event thread, that thread is the writer: calling
/// [`KeyboardHandle::apply`], [`KeyboardHandle::apply_scan_code`] or
/// [`KeyboardHandle::reset`] from the game loop at the same time adds a second
/// writer, and the accumulated edges become unpredictable. Sampling and
/// queries stay safe from any thread.
#[derive(Debug, Clone)]
pub enum KeyboardHandle {
    Shared {
        store: Arc<SharedKeyStore>,
        policy: OutOfRangePolicy,
        stats: Arc<SharedStats>,
    },
    Local {
        store: Rc<LocalKeyStore>,
        policy: OutOfRangePolicy,
        stats: Rc<Cell<IngestStats>>,
    },
}

impl KeyboardHandle {
    pub fn new(mode: StorageMode) -> Self {
        Self::from_config(&InputConfig {
            storage: mode,
            ..InputConfig::default()
        })
    }

    pub fn from_config(config: &InputConfig) -> Self {
        debug!(
            "Building keyboard store: storage={:?}, out_of_range={:?}",
            config.storage, config.out_of_range
        );
        let policy = config.out_of_range;
        match config.storage {
            StorageMode::Atomic => Self::Shared {
                store: Arc::new(SharedKeyStore::new()),
                policy,
                stats: Arc::default(),
            },
            StorageMode::Local => Self::Local {
                store: Rc::new(LocalKeyStore::new()),
                policy,
                stats: Rc::default(),
            },
        }
    }

    pub fn mode(&self) -> StorageMode {
        match self {
            Self::Shared { .. } => StorageMode::Atomic,
            Self::Local { .. } => StorageMode::Local,
        }
    }

    pub fn policy(&self) -> OutOfRangePolicy {
        match self {
            Self::Shared { policy, .. } | Self::Local { policy, .. } => *policy,
        }
    }

    /// The atomic store, for handing to an event thread. `None` in local mode.
    ///
    /// Events applied directly to the returned store are not counted in
    /// [`KeyboardHandle::stats`].
    pub fn shared(&self) -> Option<Arc<SharedKeyStore>> {
        match self {
            Self::Shared { store, .. } => Some(Arc::clone(store)),
            Self::Local { .. } => None,
        }
    }

    /// Counters for every event applied through this handle or its clones.
    pub fn stats(&self) -> IngestStats {
        match self {
            Self::Shared { stats, .. } => stats.load(),
            Self::Local { stats, .. } => stats.get(),
        }
    }

    pub fn apply(&self, event: InputEvent) {
        let delta = match self {
            Self::Shared { store, policy, .. } => {
                let mut ingest = EventIngest::with_policy(&**store, *policy);
                ingest.apply(event);
                ingest.stats()
            }
            Self::Local { store, policy, .. } => {
                let mut ingest = EventIngest::with_policy(&**store, *policy);
                ingest.apply(event);
                ingest.stats()
            }
        };
        self.record(delta);
    }

    /// See [`EventIngest::apply_scan_code`].
    pub fn apply_scan_code(&self, code: u32, down: bool) -> Result<KeyId, InputError> {
        let (result, delta) = match self {
            Self::Shared { store, policy, .. } => {
                let mut ingest = EventIngest::with_policy(&**store, *policy);
                (ingest.apply_scan_code(code, down), ingest.stats())
            }
            Self::Local { store, policy, .. } => {
                let mut ingest = EventIngest::with_policy(&**store, *policy);
                (ingest.apply_scan_code(code, down), ingest.stats())
            }
        };
        self.record(delta);
        result
    }

    pub fn sample(&self, consume_frame: bool) -> KeyboardState {
        match self {
            Self::Shared { store, .. } => store.sample(consume_frame),
            Self::Local { store, .. } => store.sample(consume_frame),
        }
    }

    pub fn reset(&self) {
        match self {
            Self::Shared { store, .. } => store.reset(),
            Self::Local { store, .. } => store.reset(),
        }
    }

    fn record(&self, delta: IngestStats) {
        match self {
            Self::Shared { stats, .. } => stats.add(delta),
            Self::Local { stats, .. } => {
                let mut total = stats.get();
                total.accumulate(delta);
                stats.set(total);
            }
        }
    }
}

impl KeyQuery for KeyboardHandle {
    fn contains(&self, plane: Plane, key: KeyId) -> bool {
        match self {
            Self::Shared { store, .. } => store.read_bit(plane, key),
            Self::Local { store, .. } => store.read_bit(plane, key),
        }
    }
}
