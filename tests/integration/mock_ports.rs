//! Mock port adapters for integration tests.
//!
//! Records every save and emitted event so tests can assert on the full
//! history without touching NVS or a display.

use dolphinpet::app::events::AppEvent;
use dolphinpet::app::ports::{EventSink, RenderPort, SavePort};
use dolphinpet::error::SaveError;
use dolphinpet::game::minigame::MiniGame;
use dolphinpet::game::Game;
use dolphinpet::pet::Pet;
use dolphinpet::save::SaveData;

// ── MockStore ─────────────────────────────────────────────────

/// In-memory [`SavePort`] with a recorded timestamp and save counter.
#[derive(Default)]
pub struct MockStore {
    pub blob: Option<(SaveData, u32)>,
    pub saves: u32,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store as if a previous session saved at `saved_secs`.
    pub fn with_pet(pet: &Pet, saved_secs: u32) -> Self {
        Self {
            blob: Some((SaveData::capture(pet), saved_secs)),
            saves: 0,
        }
    }
}

impl SavePort for MockStore {
    fn load(&self) -> Result<SaveData, SaveError> {
        self.blob
            .as_ref()
            .map(|(data, _)| data.clone())
            .ok_or(SaveError::NotFound)
    }

    fn save(&mut self, data: &SaveData, now_secs: u32) -> Result<(), SaveError> {
        self.blob = Some((data.clone(), now_secs));
        self.saves += 1;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.blob.is_some()
    }

    fn delete(&mut self) -> Result<(), SaveError> {
        self.blob = None;
        Ok(())
    }

    fn offline_minutes(&self, now_secs: u32) -> u32 {
        match &self.blob {
            Some((_, saved)) => now_secs.saturating_sub(*saved) / 60,
            None => 0,
        }
    }
}

// ── NullDisplay ───────────────────────────────────────────────

pub struct NullDisplay;

impl RenderPort for NullDisplay {
    fn render(&mut self, _pet: &Pet, _game: &Game, _minigame: &MiniGame) {}
}

// ── RecordingSink ─────────────────────────────────────────────

/// [`EventSink`] that keeps every event for later assertion.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }

    pub fn count_where(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
