//! "Jump the Wave" reaction mini-game.
//!
//! A wave scrolls right-to-left toward a dolphin fixed at the left of the
//! screen. A well-timed button press jumps the dolphin over it. Best of
//! three rounds; each round draws a fresh wave speed.
//!
//! Physics advances one fixed tick per [`MiniGame::update`] call (the outer
//! loop runs at the frame rate), while the between-round result display is
//! timed in wall milliseconds from the `delta_ms` argument.

use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::drivers::button::{ButtonEvent, ButtonId};

// ---------------------------------------------------------------------------
// Playfield geometry (pixels, 240x135 landscape)
// ---------------------------------------------------------------------------

pub const SCREEN_W: i32 = 240;
pub const SCREEN_H: i32 = 135;

pub const DOLPHIN_X: i32 = 60;
pub const DOLPHIN_W: i32 = 32;
pub const DOLPHIN_H: i32 = 24;
/// Resting position of the dolphin's bottom edge. `dolphin_y` tracks the
/// bottom edge, so the renderer draws the sprite at `dolphin_y - DOLPHIN_H`.
pub const DOLPHIN_GROUND_Y: i32 = 90;

pub const WAVE_START_X: i32 = SCREEN_W + 20;
pub const WAVE_W: i32 = 32;
pub const WAVE_H: i32 = 16;
/// Bottom edge of the wave; its collision box spans upward by `WAVE_H`.
pub const WAVE_GROUND_Y: i32 = 95;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Mini-game lifecycle.
///
/// `Success`/`Fail` are the per-round result display phases (the outcome
/// overlay stays up for `result_display_ms` before the next round starts);
/// `Results` is terminal and means all rounds are played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Playing,
    Success,
    Fail,
    Results,
}

/// One mini-game session. Created fresh per play, discarded afterwards.
#[derive(Debug, Clone)]
pub struct MiniGame {
    pub phase: Phase,
    /// Current round, 1-based.
    pub round: u8,
    pub rounds_total: u8,
    pub successes: u8,
    pub failures: u8,

    /// Wave left edge; moves left by `wave_speed` per tick.
    pub wave_x: i32,
    pub wave_speed: i32,

    /// Dolphin bottom edge (smaller = higher up).
    pub dolphin_y: i32,
    pub dolphin_vy: i32,
    pub is_jumping: bool,

    /// Milliseconds spent in the current result display phase.
    result_elapsed_ms: u32,
}

impl Default for MiniGame {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame {
    /// An idle session; call [`start`](Self::start) to begin round 1.
    pub fn new() -> Self {
        Self {
            phase: Phase::Ready,
            round: 0,
            rounds_total: 0,
            successes: 0,
            failures: 0,
            wave_x: WAVE_START_X,
            wave_speed: 0,
            dolphin_y: DOLPHIN_GROUND_Y,
            dolphin_vy: 0,
            is_jumping: false,
            result_elapsed_ms: 0,
        }
    }

    /// Begin a fresh session.
    pub fn start(&mut self, cfg: &GameConfig, rng: &mut impl Rng) {
        info!("Starting mini-game ({} rounds)", cfg.minigame_rounds);
        *self = Self::new();
        self.round = 1;
        self.rounds_total = cfg.minigame_rounds;
        self.start_round(cfg, rng);
    }

    fn start_round(&mut self, cfg: &GameConfig, rng: &mut impl Rng) {
        self.phase = Phase::Playing;
        self.wave_x = WAVE_START_X;
        self.wave_speed = rng.gen_range(cfg.wave_speed_min..=cfg.wave_speed_max);
        self.dolphin_y = DOLPHIN_GROUND_Y;
        self.dolphin_vy = 0;
        self.is_jumping = false;
        self.result_elapsed_ms = 0;
        info!("Round {} started, wave speed: {}", self.round, self.wave_speed);
    }

    /// Jump on a click while grounded. All other input is ignored; either
    /// button works, this is a reaction game, not a dexterity test.
    pub fn handle_input(&mut self, cfg: &GameConfig, _button: ButtonId, event: ButtonEvent) {
        if event != ButtonEvent::Click {
            return;
        }
        if self.phase == Phase::Playing && !self.is_jumping {
            self.is_jumping = true;
            self.dolphin_vy = cfg.jump_velocity;
            debug!("Jump!");
        }
    }

    /// Advance one tick. Returns `false` once the session is over and the
    /// caller should read [`is_win`](Self::is_win) and tear the session down.
    pub fn update(&mut self, cfg: &GameConfig, delta_ms: u32, rng: &mut impl Rng) -> bool {
        match self.phase {
            Phase::Ready => true,
            Phase::Results => false,
            Phase::Success | Phase::Fail => {
                self.result_elapsed_ms = self.result_elapsed_ms.saturating_add(delta_ms);
                if self.result_elapsed_ms >= cfg.result_display_ms {
                    if self.round >= self.rounds_total {
                        self.phase = Phase::Results;
                        info!(
                            "Mini-game over: {} up, {} wiped out",
                            self.successes, self.failures
                        );
                        return false;
                    }
                    self.round += 1;
                    self.start_round(cfg, rng);
                }
                true
            }
            Phase::Playing => {
                self.tick_physics(cfg);
                true
            }
        }
    }

    fn tick_physics(&mut self, cfg: &GameConfig) {
        // Dolphin: position before gravity, so the first airborne tick gets
        // the full launch velocity.
        if self.is_jumping {
            self.dolphin_y += self.dolphin_vy;
            self.dolphin_vy += cfg.gravity;

            if self.dolphin_y >= DOLPHIN_GROUND_Y {
                self.dolphin_y = DOLPHIN_GROUND_Y;
                self.dolphin_vy = 0;
                self.is_jumping = false;
            }
        }

        self.wave_x -= self.wave_speed;

        if self.check_collision() {
            self.phase = Phase::Fail;
            self.failures += 1;
            self.result_elapsed_ms = 0;
            info!("Round {}: FAIL", self.round);
            return;
        }

        // Trailing edge cleared the dolphin's leading edge: round survived.
        if self.wave_x + WAVE_W < DOLPHIN_X {
            self.phase = Phase::Success;
            self.successes += 1;
            self.result_elapsed_ms = 0;
            info!("Round {}: SUCCESS", self.round);
        }
    }

    /// Axis-aligned box overlap between dolphin and wave.
    fn check_collision(&self) -> bool {
        let dolphin_left = DOLPHIN_X;
        let dolphin_right = DOLPHIN_X + DOLPHIN_W;
        let dolphin_top = self.dolphin_y - DOLPHIN_H;
        let dolphin_bottom = self.dolphin_y;

        let wave_left = self.wave_x;
        let wave_right = self.wave_x + WAVE_W;
        let wave_top = WAVE_GROUND_Y - WAVE_H;
        let wave_bottom = WAVE_GROUND_Y;

        dolphin_right > wave_left
            && dolphin_left < wave_right
            && dolphin_bottom > wave_top
            && dolphin_top < wave_bottom
    }

    /// Overall outcome: strictly more clean jumps than wipeouts.
    pub fn is_win(&self) -> bool {
        self.successes > self.failures
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Results
    }
}
