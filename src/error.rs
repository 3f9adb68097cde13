//! Error types for the MESH jump detector

use thiserror::Error;

/// Reasons a notification payload could not be turned into a sample
///
/// Both variants are non-fatal: the caller drops the single frame and
/// waits for the next notification.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload shorter than a sensor frame
    #[error("Truncated sensor frame: expected at least {expected} bytes, got {len}")]
    Truncated { len: usize, expected: usize },

    /// Payload is some other message kind (indicate, button state, ...)
    #[error("Unexpected message type: expected 0x01, got 0x{0:02X}")]
    WrongMessageType(u8),
}

/// Error type for detector operations
#[derive(Error, Debug)]
pub enum JumpDetectorError {
    /// Frame rejected by the decoder
    #[error("Frame decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A thread panicked while holding the detector lock
    #[error("Detector lock poisoned by a panicked thread")]
    LockPoisoned,

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for detector operations
pub type Result<T> = std::result::Result<T, JumpDetectorError>;
