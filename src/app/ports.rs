//! Port traits — the boundary between the game core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (display, NVS storage, log sinks) implement these traits.
//! The [`AppService`](super::service::AppService) consumes them via
//! generics, so the game core never touches hardware directly and the whole
//! service runs under test with mock adapters.

use crate::error::SaveError;
use crate::game::minigame::MiniGame;
use crate::game::Game;
use crate::pet::Pet;
use crate::save::SaveData;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Render port (domain → display)
// ───────────────────────────────────────────────────────────────

/// Draw one frame from a read-only view of the current state.
///
/// Implementations own all layout and pixel concerns; the core guarantees
/// the three states are mutually consistent for the duration of the call.
pub trait RenderPort {
    fn render(&mut self, pet: &Pet, game: &Game, minigame: &MiniGame);
}

// ───────────────────────────────────────────────────────────────
// Save port (domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Persistent pet storage.
///
/// `now_secs` is whatever monotonic-ish wall clock the platform has; the
/// port stores it alongside the snapshot so [`offline_minutes`] can report
/// how long the device was off.
///
/// Write operations must be atomic — a power loss mid-save leaves the
/// previous snapshot intact, never a torn one.
///
/// [`offline_minutes`]: SavePort::offline_minutes
pub trait SavePort {
    /// Load the stored snapshot.
    fn load(&self) -> Result<SaveData, SaveError>;

    /// Persist a snapshot together with the current timestamp.
    fn save(&mut self, data: &SaveData, now_secs: u32) -> Result<(), SaveError>;

    /// Whether a snapshot exists without decoding it.
    fn exists(&self) -> bool;

    /// Remove the snapshot (new game from Settings, or tests).
    fn delete(&mut self) -> Result<(), SaveError>;

    /// Whole minutes elapsed between the stored save timestamp and
    /// `now_secs`. Zero when unknown (no RTC, clock went backwards, or no
    /// save).
    fn offline_minutes(&self, now_secs: u32) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port. Adapters
/// decide where they go (serial log, future BLE characteristic, tests).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
