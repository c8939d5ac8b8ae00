//! Game/UI state machine.
//!
//! Owns the current screen, menu and food cursors, and the shared animation
//! timers, and maps button events onto pet and mini-game actions. The
//! renderer reads this state each frame; nothing here draws.
//!
//! Button mapping (TTGO T-Display, portrait):
//! - Left:  click = next item, long press = back
//! - Right: click = previous item, long press = confirm / open menu

pub mod minigame;

use log::info;
use rand::Rng;

use crate::config::GameConfig;
use crate::drivers::button::{ButtonEvent, ButtonId};
use crate::pet::{FoodKind, Pet};
use minigame::MiniGame;

/// UI screens. `Splash` is the boot state; `Death` loops back into a fresh
/// pet on any input, so no screen is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Main,
    Menu,
    Feed,
    Play,
    Stats,
    Settings,
    Sleep,
    Death,
    /// "Start over?" confirmation reached from Settings.
    NewGame,
}

/// Main menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Feed,
    Play,
    Sleep,
    Clean,
    Medicine,
    Stats,
    Settings,
}

impl MenuItem {
    pub const ALL: [Self; 7] = [
        Self::Feed,
        Self::Play,
        Self::Sleep,
        Self::Clean,
        Self::Medicine,
        Self::Stats,
        Self::Settings,
    ];

    /// Abbreviated label for the 33px-wide menu slots.
    pub fn label(self) -> &'static str {
        match self {
            Self::Feed => "FEED",
            Self::Play => "PLAY",
            Self::Sleep => "ZZZ",
            Self::Clean => "CLEAN",
            Self::Medicine => "MED",
            Self::Stats => "STAT",
            Self::Settings => "SET",
        }
    }
}

/// Food submenu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodMenuItem {
    Fish,
    Shrimp,
    Back,
}

impl FoodMenuItem {
    pub const ALL: [Self; 3] = [Self::Fish, Self::Shrimp, Self::Back];

    pub fn label(self) -> &'static str {
        match self {
            Self::Fish => "FISH",
            Self::Shrimp => "SHRMP",
            Self::Back => "BACK",
        }
    }
}

/// UI state. One instance per running game, owned by the application
/// service alongside the pet and mini-game it drives.
#[derive(Debug, Clone)]
pub struct Game {
    pub screen: Screen,
    /// Cursor into [`MenuItem::ALL`]. Deliberately preserved across menu
    /// visits; only a new game resets it.
    pub menu_cursor: usize,
    /// First visible item of the scrolling menu viewport.
    pub menu_scroll: usize,
    /// Cursor into [`FoodMenuItem::ALL`]; reset on each Feed entry.
    pub food_cursor: usize,
    /// Whether the menu bar shows a highlight (menu open).
    pub menu_active: bool,

    /// Idle animation frame, 0..4.
    pub anim_frame: u32,
    anim_timer_ms: u32,
    /// Blink phase for the "needs attention" indicator.
    pub attention_flash: bool,
    flash_timer_ms: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            screen: Screen::Splash,
            menu_cursor: 0,
            menu_scroll: 0,
            food_cursor: 0,
            menu_active: false,
            anim_frame: 0,
            anim_timer_ms: 0,
            attention_flash: false,
            flash_timer_ms: 0,
        }
    }

    /// Replace the pet with a fresh egg and return to the main screen.
    pub fn start_new_game(&mut self, pet: &mut Pet, now_secs: u32) {
        info!("Starting new game");
        *pet = Pet::new(now_secs);
        self.menu_cursor = 0;
        self.menu_scroll = 0;
        self.food_cursor = 0;
        self.change_screen(Screen::Main);
    }

    /// Skip the splash and land on the screen matching a restored pet's
    /// state. Used at boot after a successful load; the pet itself is left
    /// untouched.
    pub fn resume(&mut self, pet: &Pet) {
        let to = if !pet.is_alive() {
            Screen::Death
        } else if pet.is_sleeping {
            Screen::Sleep
        } else {
            Screen::Main
        };
        self.change_screen(to);
    }

    fn change_screen(&mut self, to: Screen) {
        info!("Screen change: {:?} -> {:?}", self.screen, to);
        self.screen = to;
        match to {
            Screen::Menu => self.menu_active = true,
            Screen::Main => self.menu_active = false,
            _ => {}
        }
    }

    /// Autosave only runs on the quiet screens; saving mid-menu or
    /// mid-mini-game would snapshot a transient.
    pub fn is_running(&self) -> bool {
        matches!(self.screen, Screen::Main | Screen::Sleep)
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Route one button event to the current screen.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_input(
        &mut self,
        cfg: &GameConfig,
        pet: &mut Pet,
        minigame: &mut MiniGame,
        rng: &mut impl Rng,
        now_secs: u32,
        button: ButtonId,
        event: ButtonEvent,
    ) {
        // Press/release edges and repeats drive nothing in the UI.
        if event != ButtonEvent::Click && event != ButtonEvent::LongPress {
            return;
        }

        match self.screen {
            // Any button leaves the splash or buries the old pet.
            Screen::Splash | Screen::Death => self.start_new_game(pet, now_secs),

            Screen::Main => {
                if button == ButtonId::Right {
                    self.change_screen(Screen::Menu);
                }
            }

            Screen::Menu => self.handle_menu_input(cfg, pet, minigame, rng, button, event),

            Screen::Feed => self.handle_feed_input(cfg, pet, button, event),

            Screen::Play => minigame.handle_input(cfg, button, event),

            // Any button exits the stats page.
            Screen::Stats => self.change_screen(Screen::Main),

            Screen::Settings => {
                if button == ButtonId::Right && event == ButtonEvent::LongPress {
                    self.change_screen(Screen::NewGame);
                } else {
                    self.change_screen(Screen::Main);
                }
            }

            Screen::NewGame => {
                if button == ButtonId::Right && event == ButtonEvent::LongPress {
                    self.start_new_game(pet, now_secs);
                } else if button == ButtonId::Left {
                    self.change_screen(Screen::Main);
                }
            }

            Screen::Sleep => {
                if button == ButtonId::Right {
                    let _ = pet.wake(cfg);
                    self.change_screen(Screen::Main);
                }
            }
        }
    }

    fn handle_menu_input(
        &mut self,
        cfg: &GameConfig,
        pet: &mut Pet,
        minigame: &mut MiniGame,
        rng: &mut impl Rng,
        button: ButtonId,
        event: ButtonEvent,
    ) {
        let count = MenuItem::ALL.len();

        if event == ButtonEvent::Click {
            match button {
                ButtonId::Left => self.menu_cursor = (self.menu_cursor + 1) % count,
                ButtonId::Right => {
                    self.menu_cursor = self.menu_cursor.checked_sub(1).unwrap_or(count - 1);
                }
            }
            self.scroll_menu_to_cursor(cfg);
            return;
        }

        // Long presses: right confirms, left backs out.
        match button {
            ButtonId::Right => match MenuItem::ALL[self.menu_cursor] {
                MenuItem::Feed => {
                    self.food_cursor = 0;
                    self.change_screen(Screen::Feed);
                }
                MenuItem::Play => {
                    // Refusal (too tired, asleep, egg) leaves the menu open.
                    if pet.play_start(cfg) {
                        minigame.start(cfg, rng);
                        self.change_screen(Screen::Play);
                    }
                }
                MenuItem::Sleep => {
                    pet.toggle_sleep(cfg);
                    self.change_screen(if pet.is_sleeping {
                        Screen::Sleep
                    } else {
                        Screen::Main
                    });
                }
                MenuItem::Clean => {
                    let _ = pet.clean();
                    self.change_screen(Screen::Main);
                }
                MenuItem::Medicine => {
                    let _ = pet.give_medicine(cfg);
                    self.change_screen(Screen::Main);
                }
                MenuItem::Stats => self.change_screen(Screen::Stats),
                MenuItem::Settings => self.change_screen(Screen::Settings),
            },
            ButtonId::Left => self.change_screen(Screen::Main),
        }
    }

    fn handle_feed_input(
        &mut self,
        cfg: &GameConfig,
        pet: &mut Pet,
        button: ButtonId,
        event: ButtonEvent,
    ) {
        let count = FoodMenuItem::ALL.len();

        if event == ButtonEvent::Click {
            match button {
                ButtonId::Left => self.food_cursor = (self.food_cursor + 1) % count,
                ButtonId::Right => {
                    self.food_cursor = self.food_cursor.checked_sub(1).unwrap_or(count - 1);
                }
            }
            return;
        }

        match button {
            ButtonId::Right => match FoodMenuItem::ALL[self.food_cursor] {
                FoodMenuItem::Fish => {
                    let _ = pet.feed(cfg, FoodKind::Fish);
                    self.change_screen(Screen::Main);
                }
                FoodMenuItem::Shrimp => {
                    let _ = pet.feed(cfg, FoodKind::Shrimp);
                    self.change_screen(Screen::Main);
                }
                FoodMenuItem::Back => self.change_screen(Screen::Menu),
            },
            ButtonId::Left => self.change_screen(Screen::Menu),
        }
    }

    /// Keep the cursor inside the visible menu window.
    fn scroll_menu_to_cursor(&mut self, cfg: &GameConfig) {
        let visible = cfg.menu_visible_items as usize;
        if self.menu_cursor < self.menu_scroll {
            self.menu_scroll = self.menu_cursor;
        } else if self.menu_cursor >= self.menu_scroll + visible {
            self.menu_scroll = self.menu_cursor + 1 - visible;
        }
    }

    // -----------------------------------------------------------------------
    // Per-frame update
    // -----------------------------------------------------------------------

    /// Advance timers and the screen-specific simulation by one frame.
    pub fn update(
        &mut self,
        cfg: &GameConfig,
        pet: &mut Pet,
        minigame: &mut MiniGame,
        rng: &mut impl Rng,
        delta_ms: u32,
    ) {
        self.anim_timer_ms += delta_ms;
        if self.anim_timer_ms >= cfg.animation_frame_ms {
            self.anim_timer_ms = 0;
            self.anim_frame = (self.anim_frame + 1) % 4;
        }

        self.flash_timer_ms += delta_ms;
        if self.flash_timer_ms >= cfg.attention_flash_ms {
            self.flash_timer_ms = 0;
            self.attention_flash = !self.attention_flash;
        }

        match self.screen {
            Screen::Main
            | Screen::Menu
            | Screen::Feed
            | Screen::Stats
            | Screen::Settings
            | Screen::NewGame => {
                pet.advance(cfg, delta_ms as u64, rng);
                if !pet.is_alive() {
                    self.change_screen(Screen::Death);
                }
            }

            Screen::Play => {
                if !minigame.update(cfg, delta_ms, rng) {
                    let won = minigame.is_win();
                    pet.play_complete(cfg, won);
                    self.change_screen(Screen::Main);
                }
            }

            Screen::Sleep => {
                pet.advance(cfg, delta_ms as u64, rng);
                if !pet.is_alive() {
                    // Sickness or lingering waste can finish a sleeping pet.
                    self.change_screen(Screen::Death);
                } else if !pet.is_sleeping {
                    self.change_screen(Screen::Main);
                }
            }

            Screen::Splash | Screen::Death => {}
        }
    }
}
