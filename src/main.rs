//! DolphinPet Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed-rate frame loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  NvsAdapter    LogEventSink    Esp32TimeAdapter          │
//! │  (SavePort)    (EventSink)     (monotonic clock)         │
//! │  ConsoleRenderer (RenderPort)                            │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ─────────────         │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)             │      │
//! │  │  Pet · Game · MiniGame                         │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  ButtonDriver ×2 → SPSC event queue → AppService         │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{debug, info, warn};

use esp_idf_svc::sys::*;

use dolphinpet::adapters::log_sink::LogEventSink;
use dolphinpet::adapters::nvs::NvsAdapter;
use dolphinpet::adapters::time::Esp32TimeAdapter;
use dolphinpet::app::ports::RenderPort;
use dolphinpet::app::service::AppService;
use dolphinpet::config::GameConfig;
use dolphinpet::drivers::button::{ButtonDriver, ButtonId};
use dolphinpet::events::{drain_button_events, push_button_event};
use dolphinpet::game::minigame::MiniGame;
use dolphinpet::game::{Game, Screen};
use dolphinpet::pet::Pet;
use dolphinpet::pins;

/// Target frame period (~30 FPS).
const FRAME_MS: u32 = 33;

// ── Console renderer ──────────────────────────────────────────
//
// Stand-in for the LCD adapter: summarises the frame to the serial
// console at 1 Hz so the pet is observable over UART. The display
// driver implements the same RenderPort when the panel is wired up.

struct ConsoleRenderer {
    frame: u32,
}

impl ConsoleRenderer {
    fn new() -> Self {
        Self { frame: 0 }
    }
}

impl RenderPort for ConsoleRenderer {
    fn render(&mut self, pet: &Pet, game: &Game, minigame: &MiniGame) {
        self.frame = self.frame.wrapping_add(1);
        if self.frame % 30 != 0 {
            return;
        }
        match game.screen {
            Screen::Play => debug!(
                "PLAY | round {}/{} | dolphin_y={} wave_x={}",
                minigame.round, minigame.rounds_total, minigame.dolphin_y, minigame.wave_x
            ),
            _ => debug!(
                "{:?} | {} {:?} | hun={} hap={} hea={} ene={} | age={}min{}",
                game.screen,
                pet.stage.name(),
                pet.mood,
                pet.hunger,
                pet.happiness,
                pet.health,
                pet.energy,
                pet.age_minutes,
                if pet.has_waste { " | waste!" } else { "" },
            ),
        }
    }
}

// ── GPIO helpers ──────────────────────────────────────────────

fn init_button_gpio(pin: i32, pull_up: bool) -> Result<()> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: if pull_up {
            gpio_pullup_t_GPIO_PULLUP_ENABLE
        } else {
            gpio_pullup_t_GPIO_PULLUP_DISABLE
        },
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: gpio_config is called once per pin from the main task
    // before the frame loop starts.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK {
        anyhow::bail!("gpio_config failed for pin {pin}: {ret}");
    }
    Ok(())
}

/// Buttons are active LOW (pull-up, switch to ground).
fn button_pressed(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access.
    (unsafe { gpio_get_level(pin) }) == 0
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("DolphinPet v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    init_button_gpio(pins::BUTTON_LEFT_GPIO, true)?;
    // GPIO 35 is input-only with no internal pull-up; the board's
    // external pull-up holds the line high.
    init_button_gpio(pins::BUTTON_RIGHT_GPIO, false)?;
    let mut btn_left = ButtonDriver::new(ButtonId::Left);
    let mut btn_right = ButtonDriver::new(ButtonId::Right);

    // ── 3. Adapters ───────────────────────────────────────────
    let mut nvs = NvsAdapter::new()?;
    let time = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();
    let mut renderer = ConsoleRenderer::new();

    // ── 4. App service ────────────────────────────────────────
    // SAFETY: esp_random reads the hardware RNG register.
    let seed =
        ((unsafe { esp_random() } as u64) << 32) | (unsafe { esp_random() } as u64);
    let mut service = AppService::new(GameConfig::default(), seed);
    service.boot(&nvs, time.uptime_secs(), &mut sink);

    info!("System ready. Entering frame loop.");

    // ── 5. Frame loop ─────────────────────────────────────────
    let mut last_ms = time.uptime_ms();
    loop {
        esp_idf_hal::delay::FreeRtos::delay_ms(FRAME_MS);

        let now_ms = time.uptime_ms();
        let delta_ms = (now_ms - last_ms) as u32;
        last_ms = now_ms;
        let now_ms32 = now_ms as u32;

        // Poll buttons into the event queue.
        btn_left.poll(
            button_pressed(pins::BUTTON_LEFT_GPIO),
            now_ms32,
            |button, event| {
                if !push_button_event(button, event) {
                    warn!("Button queue full, dropped {:?} {:?}", button, event);
                }
            },
        );
        btn_right.poll(
            button_pressed(pins::BUTTON_RIGHT_GPIO),
            now_ms32,
            |button, event| {
                if !push_button_event(button, event) {
                    warn!("Button queue full, dropped {:?} {:?}", button, event);
                }
            },
        );

        // Feed queued gestures to the service.
        let now_secs = time.uptime_secs();
        drain_button_events(|button, event| {
            service.handle_button(&mut nvs, button, event, now_secs, &mut sink);
        });

        // Simulate and render one frame.
        service.frame(delta_ms, &mut renderer, &mut sink);

        // Periodic persistence.
        service.maybe_autosave(&mut nvs, now_secs, &mut sink);
    }
}
