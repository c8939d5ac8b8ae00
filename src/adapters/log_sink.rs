//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future BLE telemetry adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { screen } => {
                info!("START | screen={:?}", screen);
            }
            AppEvent::ScreenChanged { from, to } => {
                info!("SCREEN | {:?} -> {:?}", from, to);
            }
            AppEvent::OfflineCatchUp { minutes } => {
                info!("OFFLINE | caught up {} min", minutes);
            }
            AppEvent::PetDied { age_minutes } => {
                info!(
                    "DEATH | age={}d {}h",
                    age_minutes / (24 * 60),
                    (age_minutes / 60) % 24
                );
            }
            AppEvent::MiniGameFinished { won } => {
                info!("GAME | {}", if *won { "won" } else { "lost" });
            }
            AppEvent::Saved { age_minutes } => {
                info!("SAVE | age={} min", age_minutes);
            }
        }
    }
}
