//! Unified error types for the DolphinPet firmware.
//!
//! A single `Error` enum that every fallible subsystem converts into, keeping
//! the top-level loop's error handling uniform. Pet and UI actions are *not*
//! errors: an inapplicable action (feeding a dead pet, waking an awake one)
//! is a policy rejection reported as `false` and treated as a no-op.
//! All variants are `Copy` so they can be passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Saving or loading pet state failed.
    Save(SaveError),
    /// Peripheral or subsystem initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Save(e) => write!(f, "save: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Persistence errors
// ---------------------------------------------------------------------------

/// Errors from the save/load boundary.
///
/// Callers recover from every variant the same way at boot: log it and start
/// a fresh pet. The variants exist so the log tells the difference between
/// "first boot" and "flash ate the save".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveError {
    /// No saved pet exists (first boot or after delete).
    NotFound,
    /// Stored blob carries an unknown save-format version.
    VersionMismatch,
    /// Stored blob failed deserialization.
    Corrupted,
    /// Underlying storage partition is full.
    StorageFull,
    /// Generic I/O error from the storage backend.
    Io,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "no saved pet"),
            Self::VersionMismatch => write!(f, "save version mismatch"),
            Self::Corrupted => write!(f, "save data corrupted"),
            Self::StorageFull => write!(f, "storage full"),
            Self::Io => write!(f, "storage I/O error"),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<SaveError> for Error {
    fn from(e: SaveError) -> Self {
        Self::Save(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
