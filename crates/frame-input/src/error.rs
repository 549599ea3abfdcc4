use thiserror::Error;

/// Errors raised at the edges of the tracker, where raw integer key codes
/// enter the closed 0-255 key domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Key code out of range: {code} (expected 0-255)")]
    KeyOutOfRange { code: i64 },
}
