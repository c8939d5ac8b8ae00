//! Structured application events.
//!
//! Emitted by the [`AppService`](super::service::AppService) through the
//! [`EventSink`](super::ports::EventSink) port. Adapters decide where they
//! go; the default target firmware just logs them.

use crate::game::Screen;

/// Noteworthy application-level happenings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Boot finished; the UI is on `screen`.
    Started { screen: Screen },
    /// The UI moved between screens.
    ScreenChanged { from: Screen, to: Screen },
    /// Offline decay was applied at boot.
    OfflineCatchUp { minutes: u32 },
    /// The pet died at the given age.
    PetDied { age_minutes: u32 },
    /// A mini-game session finished.
    MiniGameFinished { won: bool },
    /// The pet was persisted.
    Saved { age_minutes: u32 },
}
