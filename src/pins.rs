//! GPIO pin assignments for the DolphinPet board (TTGO T-Display).
//!
//! Single source of truth — the entry point references this module rather
//! than hard-coding pin numbers.

/// Left button — digital input, active LOW. Shares the BOOT strap pin;
/// the board carries an external pull-up.
/// Cycles menu selections; long-press backs out.
pub const BUTTON_LEFT_GPIO: i32 = 0;

/// Right button — digital input, active LOW. GPIO 35 is input-only with no
/// internal pull-up; the board's external pull-up holds it high.
/// Opens the menu; long-press confirms.
pub const BUTTON_RIGHT_GPIO: i32 = 35;
