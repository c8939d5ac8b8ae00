//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the pet simulation, the screen state machine, the
//! mini-game and the RNG. It exposes a clean, hardware-agnostic API. All
//! I/O flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  buttons ──▶ ┌────────────────────────┐ ──▶ RenderPort
//!              │       AppService        │ ──▶ EventSink
//!  SavePort ◀──│  Pet · Game · MiniGame  │
//!              └────────────────────────┘
//! ```

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::drivers::button::{ButtonEvent, ButtonId};
use crate::error::SaveError;
use crate::game::minigame::MiniGame;
use crate::game::{Game, Screen};
use crate::pet::Pet;
use crate::save::SaveData;

use super::events::AppEvent;
use super::ports::{EventSink, RenderPort, SavePort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: GameConfig,
    pet: Pet,
    game: Game,
    minigame: MiniGame,
    rng: SmallRng,
    frame_count: u64,
    /// Wall-clock second of the last successful save.
    last_save_secs: u32,
}

impl AppService {
    /// Construct the service with a fresh egg and the splash screen.
    ///
    /// `seed` feeds the RNG behind waste rolls and mini-game wave speeds;
    /// the firmware seeds it from the hardware RNG, tests pass a constant.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            pet: Pet::new(0),
            game: Game::new(),
            minigame: MiniGame::new(),
            rng: SmallRng::seed_from_u64(seed),
            frame_count: 0,
            last_save_secs: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Restore the saved pet (if any), apply offline decay, and land on
    /// the screen matching its state.
    ///
    /// With no usable save the splash screen stays up and the first button
    /// press starts a new game.
    pub fn boot(&mut self, storage: &impl SavePort, now_secs: u32, sink: &mut impl EventSink) {
        match storage.load().and_then(|data| data.restore()) {
            Ok(pet) => {
                self.pet = pet;
                let away = self.config.max_offline_minutes.min(storage.offline_minutes(now_secs));
                if away > 0 {
                    info!("Applying {} offline minutes", away);
                    self.pet.apply_offline_time(&self.config, away, &mut self.rng);
                    sink.emit(&AppEvent::OfflineCatchUp { minutes: away });
                }
                self.game.resume(&self.pet);
                self.last_save_secs = now_secs;
            }
            Err(SaveError::NotFound) => info!("No save found, waiting on splash"),
            Err(err) => warn!("Save unusable ({}), waiting on splash", err),
        }
        sink.emit(&AppEvent::Started {
            screen: self.game.screen,
        });
        info!("AppService started on {:?}", self.game.screen);
    }

    // ── Input ─────────────────────────────────────────────────

    /// Route one debounced button event to the current screen.
    pub fn handle_button(
        &mut self,
        storage: &mut impl SavePort,
        button: ButtonId,
        event: ButtonEvent,
        now_secs: u32,
        sink: &mut impl EventSink,
    ) {
        let from = self.game.screen;
        let was_fresh = matches!(from, Screen::Splash | Screen::Death | Screen::NewGame);

        self.game.handle_input(
            &self.config,
            &mut self.pet,
            &mut self.minigame,
            &mut self.rng,
            now_secs,
            button,
            event,
        );

        let to = self.game.screen;
        if to != from {
            sink.emit(&AppEvent::ScreenChanged { from, to });

            // Landing on Main from a pre-game screen persists the current
            // pet right away, so a fresh egg survives an immediate power
            // cycle. Stale blobs from before a confirm are dropped first.
            if was_fresh && to == Screen::Main {
                let _ = storage.delete();
                self.save_now(storage, now_secs, sink);
            }
        }
    }

    // ── Per-frame orchestration ───────────────────────────────

    /// Run one frame: advance the simulation, then render.
    pub fn frame(
        &mut self,
        delta_ms: u32,
        display: &mut impl RenderPort,
        sink: &mut impl EventSink,
    ) {
        self.frame_count += 1;
        let prev_screen = self.game.screen;
        let was_alive = self.pet.is_alive();

        self.game.update(
            &self.config,
            &mut self.pet,
            &mut self.minigame,
            &mut self.rng,
            delta_ms,
        );

        let screen = self.game.screen;
        if screen != prev_screen {
            sink.emit(&AppEvent::ScreenChanged {
                from: prev_screen,
                to: screen,
            });
            if prev_screen == Screen::Play {
                sink.emit(&AppEvent::MiniGameFinished {
                    won: self.minigame.is_win(),
                });
            }
        }
        if was_alive && !self.pet.is_alive() {
            warn!("Pet died at age {} minutes", self.pet.age_minutes);
            sink.emit(&AppEvent::PetDied {
                age_minutes: self.pet.age_minutes,
            });
        }

        display.render(&self.pet, &self.game, &self.minigame);
    }

    // ── Persistence ───────────────────────────────────────────

    /// Save if the autosave interval has elapsed on a quiet screen.
    pub fn maybe_autosave(
        &mut self,
        storage: &mut impl SavePort,
        now_secs: u32,
        sink: &mut impl EventSink,
    ) {
        if !self.game.is_running() || !self.pet.is_alive() {
            return;
        }
        if now_secs.wrapping_sub(self.last_save_secs) >= self.config.autosave_interval_secs {
            self.save_now(storage, now_secs, sink);
        }
    }

    /// Persist the pet unconditionally.
    pub fn save_now(
        &mut self,
        storage: &mut impl SavePort,
        now_secs: u32,
        sink: &mut impl EventSink,
    ) {
        let data = SaveData::capture(&self.pet);
        match storage.save(&data, now_secs) {
            Ok(()) => {
                self.last_save_secs = now_secs;
                sink.emit(&AppEvent::Saved {
                    age_minutes: self.pet.age_minutes,
                });
                info!("Pet saved (age {} min)", self.pet.age_minutes);
            }
            Err(err) => warn!("Save failed: {}", err),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn minigame(&self) -> &MiniGame {
        &self.minigame
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Total frames executed since startup.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
