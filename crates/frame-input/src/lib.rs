//! Frame-windowed keyboard state for a game loop fed by an event thread.
//!
//! This crate provides:
//! - [`KeyStateStore`]: live, bit-packed key state (held / pressed / released
//!   planes plus last-key latches) over the 256 possible scan codes
//! - [`EventIngest`]: the writer side, applying key and focus events
//! - [`KeyStateStore::sample`]: per-tick snapshots that optionally consume the
//!   frame's edges in the same call
//! - [`KeyQuery`]: `is_key_down` / `is_key_up` on snapshots and the live store
//! - [`InputConfig`] / [`KeyboardHandle`]: atomic or single-thread storage
//!   picked from configuration
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use frame_input::{EventIngest, InputEvent, KeyId, KeyQuery, SharedKeyStore};
//!
//! let store = Arc::new(SharedKeyStore::new());
//! let writer = Arc::clone(&store);
//! thread::spawn(move || {
//!     let mut ingest = EventIngest::new(&*writer);
//!     ingest.apply(InputEvent::key_down(KeyId::new(32)));
//!     ingest.apply(InputEvent::key_up(KeyId::new(32)));
//! })
//! .join()
//! .unwrap();
//!
//! let frame = store.sample(true);
//! assert!(frame.is_key_down(KeyId::new(32), true));
//! assert!(frame.is_key_up(KeyId::new(32), false));
//! ```

mod bitset;
mod config;
mod error;
mod handle;
mod ingest;
mod key;
mod query;
mod sampler;
mod snapshot;
mod store;
mod word;

pub use bitset::{Iter as KeyBitsIter, KeyBits};
pub use config::{InputConfig, OutOfRangePolicy, StorageMode};
pub use error::InputError;
pub use handle::{KeyboardHandle, SharedStats};
pub use ingest::{EventIngest, EventSource, IngestStats, InputEvent, ScriptedEvents};
pub use key::{KEY_COUNT, KeyId, WORDS};
pub use query::KeyQuery;
pub use snapshot::KeyboardState;
pub use store::{KeyStateStore, LocalKeyStore, Plane, SharedKeyStore};
pub use word::WordCell;
