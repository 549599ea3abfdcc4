//! Word storage backends for the live key store.
//!
//! The store never touches memory directly; it goes through [`WordCell`], which
//! has two implementations:
//!
//! - [`AtomicU32`]: every operation is a single sequentially-consistent atomic
//!   instruction, so one writer thread and any number of reader threads can
//!   share the store.
//! - [`Cell<u32>`]: plain unsynchronized storage for deployments where the event
//!   pump and the game loop run on the same thread. `Cell` is `!Sync`, so a
//!   store built on it cannot be shared across threads by mistake.

use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};

/// A 32-bit word supporting the read-modify-write operations the store needs.
///
/// All methods take `&self`: the atomic variant synchronizes internally and the
/// plain variant relies on `Cell`'s interior mutability.
pub trait WordCell: Default {
    fn load(&self) -> u32;

    fn store(&self, value: u32);

    /// OR `mask` into the word, returning the previous value.
    fn fetch_or(&self, mask: u32) -> u32;

    /// AND `mask` into the word, returning the previous value.
    fn fetch_and(&self, mask: u32) -> u32;

    /// Replace the word, returning the previous value.
    fn swap(&self, value: u32) -> u32;
}

impl WordCell for AtomicU32 {
    #[inline]
    fn load(&self) -> u32 {
        AtomicU32::load(self, Ordering::SeqCst)
    }

    #[inline]
    fn store(&self, value: u32) {
        AtomicU32::store(self, value, Ordering::SeqCst);
    }

    #[inline]
    fn fetch_or(&self, mask: u32) -> u32 {
        AtomicU32::fetch_or(self, mask, Ordering::SeqCst)
    }

    #[inline]
    fn fetch_and(&self, mask: u32) -> u32 {
        AtomicU32::fetch_and(self, mask, Ordering::SeqCst)
    }

    #[inline]
    fn swap(&self, value: u32) -> u32 {
        AtomicU32::swap(self, value, Ordering::SeqCst)
    }
}

impl WordCell for Cell<u32> {
    #[inline]
    fn load(&self) -> u32 {
        self.get()
    }

    #[inline]
    fn store(&self, value: u32) {
        self.set(value);
    }

    #[inline]
    fn fetch_or(&self, mask: u32) -> u32 {
        let prev = self.get();
        self.set(prev | mask);
        prev
    }

    #[inline]
    fn fetch_and(&self, mask: u32) -> u32 {
        let prev = self.get();
        self.set(prev & mask);
        prev
    }

    #[inline]
    fn swap(&self, value: u32) -> u32 {
        self.replace(value)
    }
}
