//! Game configuration parameters
//!
//! All tunable parameters for the DolphinPet simulation.
//! Values can be overridden from NVS or by tests; the defaults are the
//! shipped game balance.

use serde::{Deserialize, Serialize};

/// Core game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    // --- Stat decay (points per simulated minute) ---
    /// Hunger lost per minute
    pub hunger_decay_per_min: u8,
    /// Happiness lost per minute
    pub happiness_decay_per_min: u8,
    /// Energy lost per minute while awake
    pub energy_decay_per_min: u8,
    /// Energy regained per minute while sleeping
    pub energy_restore_per_min: u8,
    /// Hunger decay multiplier while sick
    pub sick_decay_multiplier: u8,

    // --- Feeding ---
    /// Hunger restored by a fish (main meal)
    pub fish_hunger_gain: u8,
    /// Weight gained per fish
    pub fish_weight_gain: u8,
    /// Hunger restored by a shrimp (treat)
    pub shrimp_hunger_gain: u8,
    /// Happiness gained per shrimp
    pub shrimp_happiness_gain: u8,
    /// Weight gained per shrimp
    pub shrimp_weight_gain: u8,
    /// Feeding at/above this hunger level costs health
    pub overfeed_threshold: u8,
    /// Flat health cost for overfeeding
    pub overfeed_penalty: u8,

    // --- Play ---
    /// Happiness gained for winning the mini-game
    pub play_win_happiness: u8,
    /// Energy spent winning the mini-game
    pub play_win_energy_cost: u8,
    /// Happiness gained for losing the mini-game
    pub play_lose_happiness: u8,
    /// Energy spent losing the mini-game
    pub play_lose_energy_cost: u8,
    /// Minimum energy required to start playing
    pub play_min_energy: u8,

    // --- Sleep ---
    /// Waking below this energy level upsets the pet
    pub rested_energy_threshold: u8,
    /// Happiness lost when woken early
    pub wake_early_happiness_penalty: u8,

    // --- Care ---
    /// Health restored by medicine
    pub medicine_health_restore: u8,
    /// Health below this level makes the pet sick
    pub sick_threshold: u8,
    /// Stats below this level are critical (attention indicator)
    pub critical_threshold: u8,

    // --- Waste ---
    /// Minimum minutes between waste events
    pub waste_dwell_min_minutes: u32,
    /// Dwell time at which a waste event becomes certain
    pub waste_dwell_max_minutes: u32,
    /// Health lost per uncleaned waste unit per update
    pub waste_health_penalty: u8,

    // --- Life stages (cumulative age thresholds, minutes) ---
    /// Egg hatches after this many minutes
    pub egg_hatch_minutes: u32,
    /// Baby stage length
    pub baby_duration_minutes: u32,
    /// Child stage length
    pub child_duration_minutes: u32,
    /// Teen stage length (adult afterwards)
    pub teen_duration_minutes: u32,

    // --- Offline catch-up ---
    /// Cap on simulated time applied after a power-off gap
    pub max_offline_minutes: u32,

    // --- Mini-game physics ---
    /// Initial vertical velocity of a jump (negative = up)
    pub jump_velocity: i32,
    /// Per-tick gravity acceleration
    pub gravity: i32,
    /// Slowest wave speed (pixels per tick)
    pub wave_speed_min: i32,
    /// Fastest wave speed (pixels per tick)
    pub wave_speed_max: i32,
    /// Rounds per play session
    pub minigame_rounds: u8,
    /// How long the round result stays on screen (milliseconds)
    pub result_display_ms: u32,

    // --- UI timing ---
    /// Pet animation frame period (milliseconds)
    pub animation_frame_ms: u32,
    /// Attention indicator blink period (milliseconds)
    pub attention_flash_ms: u32,
    /// Menu items visible at once in the scrolling bar
    pub menu_visible_items: u8,

    // --- Persistence ---
    /// Auto-save interval (seconds)
    pub autosave_interval_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Decay
            hunger_decay_per_min: 2,
            happiness_decay_per_min: 1,
            energy_decay_per_min: 1,
            energy_restore_per_min: 5,
            sick_decay_multiplier: 2,

            // Feeding
            fish_hunger_gain: 20,
            fish_weight_gain: 3,
            shrimp_hunger_gain: 8,
            shrimp_happiness_gain: 10,
            shrimp_weight_gain: 1,
            overfeed_threshold: 90,
            overfeed_penalty: 5,

            // Play
            play_win_happiness: 15,
            play_win_energy_cost: 10,
            play_lose_happiness: 5,
            play_lose_energy_cost: 5,
            play_min_energy: 20,

            // Sleep
            rested_energy_threshold: 80,
            wake_early_happiness_penalty: 10,

            // Care
            medicine_health_restore: 40,
            sick_threshold: 30,
            critical_threshold: 20,

            // Waste
            waste_dwell_min_minutes: 30,
            waste_dwell_max_minutes: 90,
            waste_health_penalty: 1,

            // Life stages
            egg_hatch_minutes: 2,
            baby_duration_minutes: 2 * 24 * 60,  // days 1-2
            child_duration_minutes: 4 * 24 * 60, // days 3-6
            teen_duration_minutes: 7 * 24 * 60,  // days 7-13, adult at 14+

            // Offline
            max_offline_minutes: 48 * 60,

            // Mini-game
            jump_velocity: -12,
            gravity: 1,
            wave_speed_min: 3,
            wave_speed_max: 5,
            minigame_rounds: 3,
            result_display_ms: 1500,

            // UI timing
            animation_frame_ms: 200, // 5 FPS idle animation
            attention_flash_ms: 500,
            menu_visible_items: 4,

            // Persistence
            autosave_interval_secs: 5 * 60,
        }
    }
}
