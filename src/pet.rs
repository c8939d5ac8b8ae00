//! Pet simulation — stats, life stages, care actions.
//!
//! Owns everything about one dolphin: stat decay over simulated time, mood
//! and health derivation, waste events, sickness, life-stage progression and
//! death. Pure logic with no I/O; time arrives as millisecond deltas from the
//! caller and randomness is injected, so the whole module runs deterministic
//! on the host.
//!
//! A `Pet` is a plain owned value: the [`AppService`](crate::app::service)
//! holds exactly one and threads it through update and render. Nothing here
//! is static.

use log::{error, info, warn};
use rand::Rng;

use crate::config::GameConfig;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Life stages, forward-only. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Stage {
    Egg = 0,
    Baby = 1,
    Child = 2,
    Teen = 3,
    Adult = 4,
    Dead = 5,
}

impl Stage {
    /// Decode a persisted stage byte. `None` for out-of-range values
    /// (corrupt save).
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Egg),
            1 => Some(Self::Baby),
            2 => Some(Self::Child),
            3 => Some(Self::Teen),
            4 => Some(Self::Adult),
            5 => Some(Self::Dead),
            _ => None,
        }
    }

    /// Display name for the stats screen.
    pub fn name(self) -> &'static str {
        match self {
            Self::Egg => "Egg",
            Self::Baby => "Baby",
            Self::Child => "Child",
            Self::Teen => "Teen",
            Self::Adult => "Adult",
            Self::Dead => "Dead",
        }
    }
}

/// Derived, display-only mood. Recomputed from raw stats every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Normal,
    Sad,
    Hungry,
    Sleepy,
    Sick,
    Sleeping,
}

impl Mood {
    pub fn name(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Normal => "Normal",
            Self::Sad => "Sad",
            Self::Hungry => "Hungry",
            Self::Sleepy => "Sleepy",
            Self::Sick => "Sick",
            Self::Sleeping => "Sleeping",
        }
    }
}

/// Current activity, used by the renderer to pick an animation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Eating,
    Playing,
    Sleeping,
    Sick,
    Celebrating,
    Hatching,
}

/// Food types the pet can be fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    /// Main meal: big hunger gain, weight gain.
    Fish,
    /// Treat: small hunger gain plus a happiness boost.
    Shrimp,
}

// ---------------------------------------------------------------------------
// Clamp helpers
// ---------------------------------------------------------------------------

const STAT_MIN: i32 = 0;
const STAT_MAX: i32 = 100;

fn clamp_stat(value: i32) -> u8 {
    value.clamp(STAT_MIN, STAT_MAX) as u8
}

fn clamp_weight(value: i32) -> u8 {
    value.clamp(1, 99) as u8
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// Complete pet state.
///
/// Fields are public for the renderer and persistence layer (read-only by
/// convention); all mutation goes through the methods below so the [0,100]
/// clamp invariant holds after every change.
#[derive(Debug, Clone)]
pub struct Pet {
    // Core stats (0-100)
    pub hunger: u8,
    pub happiness: u8,
    pub health: u8,
    pub energy: u8,

    // Secondary stats
    /// 1-99, affects the sprite variant.
    pub weight: u8,
    /// 0-100. Tracked and persisted but not consumed by any rule yet;
    /// reserved for a future scolding/praise mechanic.
    pub discipline: u8,

    // Life tracking
    pub stage: Stage,
    /// Total age in whole simulated minutes.
    pub age_minutes: u32,
    /// Unix-ish timestamp of birth (whatever clock the caller supplies).
    pub birth_secs: u32,

    // Derived state, recomputed every update
    pub mood: Mood,
    pub activity: Activity,
    pub attention_needed: bool,

    // Care flags
    pub is_sick: bool,
    pub has_waste: bool,
    pub waste_count: u8,
    pub is_sleeping: bool,

    // Internal millisecond clock, advanced by `advance`. All "time since"
    // markers below are positions on this clock.
    clock_ms: u64,
    pub last_fed_ms: u64,
    pub last_played_ms: u64,
    pub last_waste_ms: u64,
    pub sleep_start_ms: u64,

    // Care counters (monotonic until a new pet)
    pub games_won: u16,
    pub games_played: u16,
    pub times_fed: u16,
    pub times_played: u16,
    pub times_cleaned: u16,
    pub times_medicated: u16,
}

impl Pet {
    /// Create a fresh egg with the starting stats.
    pub fn new(now_secs: u32) -> Self {
        info!("Creating new pet (egg)");
        Self {
            hunger: 50,
            happiness: 50,
            health: 100,
            energy: 100,
            weight: 20,
            discipline: 0,
            stage: Stage::Egg,
            age_minutes: 0,
            birth_secs: now_secs,
            mood: Mood::Normal,
            activity: Activity::Hatching,
            attention_needed: false,
            is_sick: false,
            has_waste: false,
            waste_count: 0,
            is_sleeping: false,
            clock_ms: 0,
            last_fed_ms: 0,
            last_played_ms: 0,
            last_waste_ms: 0,
            sleep_start_ms: 0,
            games_won: 0,
            games_played: 0,
            times_fed: 0,
            times_played: 0,
            times_cleaned: 0,
            times_medicated: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Core update
    // -----------------------------------------------------------------------

    /// Advance the simulation by `delta_ms` of real time.
    ///
    /// Decay applies per whole elapsed minute; sub-minute remainders are
    /// dropped, not carried into the next call. Frame-rate callers (33 ms
    /// deltas) therefore contribute no decay on their own — only offline
    /// catch-up and long stalls do. This matches the shipped tick-granularity
    /// behaviour; a caller that wants per-minute decay during play must batch
    /// elapsed time itself. Mood and the attention flag are recomputed on
    /// every call regardless, including `delta_ms == 0`.
    pub fn advance(&mut self, cfg: &GameConfig, delta_ms: u64, rng: &mut impl Rng) {
        if self.stage == Stage::Dead {
            return;
        }

        self.clock_ms += delta_ms;
        let elapsed_min = (delta_ms / 60_000) as u32;

        if elapsed_min > 0 {
            self.age_minutes = self.age_minutes.saturating_add(elapsed_min);

            // Stat decay only once hatched
            if self.stage != Stage::Egg {
                let mut hunger_decay = elapsed_min as i32 * cfg.hunger_decay_per_min as i32;
                if self.is_sick {
                    hunger_decay *= cfg.sick_decay_multiplier as i32;
                }
                self.hunger = clamp_stat(self.hunger as i32 - hunger_decay);

                let happy_decay = elapsed_min as i32 * cfg.happiness_decay_per_min as i32;
                self.happiness = clamp_stat(self.happiness as i32 - happy_decay);

                if self.is_sleeping {
                    let restore = elapsed_min as i32 * cfg.energy_restore_per_min as i32;
                    self.energy = clamp_stat(self.energy as i32 + restore);

                    // Fully rested: wake up on its own. The early-wake
                    // penalty inside `wake` can't fire at 100 energy.
                    if self.energy >= 100 {
                        let _ = self.wake(cfg);
                    }
                } else {
                    let drain = elapsed_min as i32 * cfg.energy_decay_per_min as i32;
                    self.energy = clamp_stat(self.energy as i32 - drain);
                }

                self.roll_waste(cfg, rng);

                if self.has_waste {
                    let penalty = self.waste_count as i32 * cfg.waste_health_penalty as i32;
                    self.health = clamp_stat(self.health as i32 - penalty);
                }

                self.pull_health_toward_target(cfg);

                if self.health < cfg.sick_threshold && !self.is_sick {
                    self.is_sick = true;
                    warn!("Pet got sick! Health: {}", self.health);
                }

                if self.health == 0 {
                    self.stage = Stage::Dead;
                    self.activity = Activity::Idle;
                    error!("Pet died! Age: {} minutes", self.age_minutes);
                }
            }

            self.update_life_stage(cfg);
        }

        self.update_mood();
        self.update_attention(cfg);
    }

    /// Catch up on decay for time spent powered off, capped so very long
    /// absences don't punish unboundedly.
    pub fn apply_offline_time(&mut self, cfg: &GameConfig, away_minutes: u32, rng: &mut impl Rng) {
        if away_minutes == 0 {
            return;
        }
        let minutes = away_minutes.min(cfg.max_offline_minutes);
        info!("Applying {} minutes of offline time", minutes);
        self.advance(cfg, minutes as u64 * 60_000, rng);
    }

    // -----------------------------------------------------------------------
    // Actions — `false` means the action is inapplicable right now (no-op)
    // -----------------------------------------------------------------------

    pub fn feed(&mut self, cfg: &GameConfig, food: FoodKind) -> bool {
        if self.stage == Stage::Dead || self.stage == Stage::Egg || self.is_sleeping {
            return false;
        }

        // Overfeed is judged on hunger *before* the gain lands.
        let overfed = self.hunger >= cfg.overfeed_threshold;

        match food {
            FoodKind::Fish => {
                self.hunger = clamp_stat(self.hunger as i32 + cfg.fish_hunger_gain as i32);
                self.weight = clamp_weight(self.weight as i32 + cfg.fish_weight_gain as i32);
                info!("Fed fish. Hunger: {}, Weight: {}", self.hunger, self.weight);
            }
            FoodKind::Shrimp => {
                self.hunger = clamp_stat(self.hunger as i32 + cfg.shrimp_hunger_gain as i32);
                self.happiness =
                    clamp_stat(self.happiness as i32 + cfg.shrimp_happiness_gain as i32);
                self.weight = clamp_weight(self.weight as i32 + cfg.shrimp_weight_gain as i32);
                info!("Fed shrimp. Hunger: {}, Happy: {}", self.hunger, self.happiness);
            }
        }

        if overfed {
            self.health = clamp_stat(self.health as i32 - cfg.overfeed_penalty as i32);
            warn!("Overfed! Health penalty applied: {}", self.health);
        }

        self.activity = Activity::Eating;
        self.last_fed_ms = self.clock_ms;
        self.times_fed += 1;
        true
    }

    pub fn play_start(&mut self, cfg: &GameConfig) -> bool {
        if self.stage == Stage::Dead || self.stage == Stage::Egg || self.is_sleeping {
            return false;
        }
        if self.energy < cfg.play_min_energy {
            return false;
        }

        self.activity = Activity::Playing;
        self.last_played_ms = self.clock_ms;
        self.games_played += 1;
        true
    }

    /// Report the mini-game outcome. Only called after a successful
    /// [`play_start`](Self::play_start), so there is no state guard here.
    pub fn play_complete(&mut self, cfg: &GameConfig, won: bool) {
        if won {
            self.happiness = clamp_stat(self.happiness as i32 + cfg.play_win_happiness as i32);
            self.energy = clamp_stat(self.energy as i32 - cfg.play_win_energy_cost as i32);
            self.games_won += 1;
            info!("Game won! Happy: {}, Energy: {}", self.happiness, self.energy);
        } else {
            self.happiness = clamp_stat(self.happiness as i32 + cfg.play_lose_happiness as i32);
            self.energy = clamp_stat(self.energy as i32 - cfg.play_lose_energy_cost as i32);
            info!("Game lost. Happy: {}, Energy: {}", self.happiness, self.energy);
        }

        self.times_played += 1;
        self.activity = Activity::Idle;
    }

    pub fn sleep(&mut self) -> bool {
        if self.stage == Stage::Dead || self.stage == Stage::Egg || self.is_sleeping {
            return false;
        }

        self.is_sleeping = true;
        self.sleep_start_ms = self.clock_ms;
        self.activity = Activity::Sleeping;
        info!("Pet went to sleep. Energy: {}", self.energy);
        true
    }

    /// Wake the pet. Waking before it is rested costs happiness — waiting
    /// for a natural wake is free.
    pub fn wake(&mut self, cfg: &GameConfig) -> bool {
        if !self.is_sleeping {
            return false;
        }

        if self.energy < cfg.rested_energy_threshold {
            self.happiness =
                clamp_stat(self.happiness as i32 - cfg.wake_early_happiness_penalty as i32);
            warn!("Woken early! Happiness penalty.");
        }

        self.is_sleeping = false;
        self.sleep_start_ms = 0;
        self.activity = Activity::Idle;
        info!("Pet woke up. Energy: {}", self.energy);
        true
    }

    pub fn toggle_sleep(&mut self, cfg: &GameConfig) {
        if self.is_sleeping {
            let _ = self.wake(cfg);
        } else {
            let _ = self.sleep();
        }
    }

    /// Clean up all outstanding waste in one go.
    pub fn clean(&mut self) -> bool {
        if !self.has_waste {
            return false;
        }

        self.has_waste = false;
        self.waste_count = 0;
        self.times_cleaned += 1;
        info!("Cleaned up!");
        true
    }

    pub fn give_medicine(&mut self, cfg: &GameConfig) -> bool {
        if !self.is_sick {
            return false;
        }

        self.health = clamp_stat(self.health as i32 + cfg.medicine_health_restore as i32);
        self.is_sick = false;
        self.times_medicated += 1;
        info!("Gave medicine. Health: {}", self.health);
        true
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn is_alive(&self) -> bool {
        self.stage != Stage::Dead
    }

    pub fn needs_attention(&self) -> bool {
        self.attention_needed
    }

    pub fn can_play(&self, cfg: &GameConfig) -> bool {
        self.energy >= cfg.play_min_energy
            && self.stage != Stage::Dead
            && self.stage != Stage::Egg
            && !self.is_sleeping
    }

    /// Age in whole days (0 = first day).
    pub fn age_days(&self) -> u32 {
        self.age_minutes / (24 * 60)
    }

    /// Combined well-being score 0-100, a fixed weighted average of the four
    /// core stats.
    pub fn overall_happiness(&self) -> u8 {
        ((self.hunger as u32 * 25
            + self.happiness as u32 * 35
            + self.health as u32 * 25
            + self.energy as u32 * 15)
            / 100) as u8
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    /// Probabilistic waste event. Chance ramps linearly from 0% at the
    /// minimum dwell time to 100% at the maximum; the pet never fouls the
    /// water in its sleep.
    fn roll_waste(&mut self, cfg: &GameConfig, rng: &mut impl Rng) {
        let since_waste_min = ((self.clock_ms - self.last_waste_ms) / 60_000) as u32;
        if since_waste_min < cfg.waste_dwell_min_minutes || self.is_sleeping {
            return;
        }

        let window = cfg.waste_dwell_max_minutes - cfg.waste_dwell_min_minutes;
        let chance = (since_waste_min - cfg.waste_dwell_min_minutes) * 100 / window;
        if rng.gen_range(0..=100u32) < chance {
            self.has_waste = true;
            self.waste_count = self.waste_count.saturating_add(1);
            self.last_waste_ms = self.clock_ms;
            info!("Pet made a mess! Total: {}", self.waste_count);
        }
    }

    /// Pull health one point per update toward a target computed from the
    /// other stats. Health never recovers while sick.
    fn pull_health_toward_target(&mut self, cfg: &GameConfig) {
        let mut target: i32 = 100;

        if self.hunger < 50 {
            target -= (50 - self.hunger as i32) / 2;
        }
        if self.happiness < 40 {
            target -= (40 - self.happiness as i32) / 3;
        }
        target -= self.waste_count as i32 * 10;
        if self.is_sick {
            target -= 20;
        }

        if (self.health as i32) > target {
            self.health = clamp_stat(self.health as i32 - 1);
        } else if (self.health as i32) < target && !self.is_sick {
            self.health = clamp_stat(self.health as i32 + 1);
        }
    }

    /// Stage promotion, one step at a time from the current stage: a
    /// long-neglected egg still passes through Baby/Child/Teen on successive
    /// updates instead of jumping straight to Adult.
    fn update_life_stage(&mut self, cfg: &GameConfig) {
        if self.stage == Stage::Dead {
            return;
        }

        let age = self.age_minutes;
        let child_at = cfg.baby_duration_minutes;
        let teen_at = child_at + cfg.child_duration_minutes;
        let adult_at = teen_at + cfg.teen_duration_minutes;

        match self.stage {
            Stage::Egg if age >= cfg.egg_hatch_minutes => {
                self.stage = Stage::Baby;
                info!("Pet hatched! Now a baby dolphin.");
            }
            Stage::Baby if age >= child_at => {
                self.stage = Stage::Child;
                info!("Pet grew! Now a child dolphin.");
            }
            Stage::Child if age >= teen_at => {
                self.stage = Stage::Teen;
                info!("Pet grew! Now a teen dolphin.");
            }
            Stage::Teen if age >= adult_at => {
                self.stage = Stage::Adult;
                info!("Pet is fully grown! Now an adult dolphin.");
            }
            _ => {}
        }
    }

    /// Mood by priority: sleeping and sickness trump everything, then the
    /// most pressing low stat, then genuine happiness, else normal.
    fn update_mood(&mut self) {
        const CRITICAL: u8 = 20;

        self.mood = if self.is_sleeping {
            Mood::Sleeping
        } else if self.is_sick {
            Mood::Sick
        } else if self.hunger < CRITICAL {
            Mood::Hungry
        } else if self.energy < CRITICAL {
            Mood::Sleepy
        } else if self.happiness < CRITICAL {
            Mood::Sad
        } else if self.happiness >= 80 && self.hunger >= 60 && self.health >= 70 {
            Mood::Happy
        } else {
            Mood::Normal
        };
    }

    fn update_attention(&mut self, cfg: &GameConfig) {
        let crit = cfg.critical_threshold;
        self.attention_needed = self.hunger < crit
            || self.happiness < crit
            || self.health < crit
            || self.energy < crit
            || self.has_waste
            || self.is_sick;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
