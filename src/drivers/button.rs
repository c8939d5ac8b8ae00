//! Debounced button driver with click, long-press and repeat detection.
//!
//! ## Hardware
//!
//! Two active-low momentary switches (TTGO T-Display: GPIO 0 and GPIO 35,
//! external pull-ups). The driver is level-polled: the main loop reads the
//! raw GPIO level each frame and feeds it to `poll()` together with the
//! monotonic time, so the whole state machine runs unchanged on the host.
//!
//! ## Gesture detection
//!
//! | Gesture    | Condition                             | Event       |
//! |------------|---------------------------------------|-------------|
//! | Press edge | Debounced level goes low              | `Pressed`   |
//! | Click      | Release before the long-press fires   | `Click`     |
//! | Release    | Debounced level goes high             | `Released`  |
//! | Long press | Held >= 2s (fires once)               | `LongPress` |
//! | Repeat     | Every 150ms while held after `LongPress` | `Repeat` |

const DEBOUNCE_MS: u32 = 50;
const LONG_PRESS_MS: u32 = 2000;
const REPEAT_RATE_MS: u32 = 150;

/// The two physical buttons, in screen order (left of the display, right of
/// the display).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonId {
    Left = 0,
    Right = 1,
}

impl ButtonId {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Button events emitted after debounce + gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonEvent {
    /// Debounced press edge.
    Pressed = 0,
    /// Debounced release edge (always follows a press, after any `Click`).
    Released = 1,
    /// Press released before the long-press threshold.
    Click = 2,
    /// Held past the long-press threshold; fires once per hold.
    LongPress = 3,
    /// Auto-repeat while still held after `LongPress`.
    Repeat = 4,
}

impl ButtonEvent {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Pressed),
            1 => Some(Self::Released),
            2 => Some(Self::Click),
            3 => Some(Self::LongPress),
            4 => Some(Self::Repeat),
            _ => None,
        }
    }
}

/// Debounce + gesture state for one button.
pub struct ButtonDriver {
    id: ButtonId,
    /// Debounced level (true = pressed).
    is_pressed: bool,
    /// Raw level candidate waiting out the debounce window.
    candidate: bool,
    candidate_since_ms: u32,
    press_start_ms: u32,
    /// Timestamp of the last emitted LongPress/Repeat, for repeat pacing.
    last_hold_event_ms: u32,
    long_press_fired: bool,
}

impl ButtonDriver {
    pub fn new(id: ButtonId) -> Self {
        Self {
            id,
            is_pressed: false,
            candidate: false,
            candidate_since_ms: 0,
            press_start_ms: 0,
            last_hold_event_ms: 0,
            long_press_fired: false,
        }
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    /// Feed one raw level sample (true = pressed). Call every frame with the
    /// current monotonic time; classified events are handed to `emit` in
    /// order (a release tick emits `Click` before `Released`).
    pub fn poll(&mut self, raw_pressed: bool, now_ms: u32, mut emit: impl FnMut(ButtonId, ButtonEvent)) {
        let was_pressed = self.is_pressed;

        // Level must hold steady for the debounce window before it counts.
        if raw_pressed != self.candidate {
            self.candidate = raw_pressed;
            self.candidate_since_ms = now_ms;
        } else if now_ms.wrapping_sub(self.candidate_since_ms) >= DEBOUNCE_MS {
            self.is_pressed = raw_pressed;
        }

        if self.is_pressed && !was_pressed {
            self.press_start_ms = now_ms;
            self.last_hold_event_ms = now_ms;
            self.long_press_fired = false;
            emit(self.id, ButtonEvent::Pressed);
        }

        if !self.is_pressed && was_pressed {
            if !self.long_press_fired {
                emit(self.id, ButtonEvent::Click);
            }
            emit(self.id, ButtonEvent::Released);
        }

        if self.is_pressed && !self.long_press_fired {
            let held_ms = now_ms.wrapping_sub(self.press_start_ms);
            if held_ms >= LONG_PRESS_MS {
                self.long_press_fired = true;
                self.last_hold_event_ms = now_ms;
                emit(self.id, ButtonEvent::LongPress);
            }
        }

        if self.is_pressed && self.long_press_fired {
            let since_ms = now_ms.wrapping_sub(self.last_hold_event_ms);
            if since_ms >= REPEAT_RATE_MS {
                self.last_hold_event_ms = now_ms;
                emit(self.id, ButtonEvent::Repeat);
            }
        }
    }
}
