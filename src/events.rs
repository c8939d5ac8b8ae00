//! Lock-free input event queue.
//!
//! Button events are produced by the input poll (which may run from a timer
//! task on target) and consumed by the main game loop, one frame at a time:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Button poll  │────▶│  Event Queue │────▶│  Game loop   │
//! │ (timer task) │     │  (lock-free) │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Each entry packs `(ButtonId, ButtonEvent)` into one byte: button in the
//! high nibble, event in the low nibble. The queue lives in a static so the
//! producer side can run from callback context without sharing a handle.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::drivers::button::{ButtonEvent, ButtonId};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 32;

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// One producer (input poll), one consumer (game loop).
// Uses atomic head/tail indices.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: EVENT_BUFFER is accessed under SPSC discipline only.
// Producer (push_button_event): input poll context — one writer.
// Consumer (pop_button_event): game-loop task — one reader.
// The acquire/release pairs on head/tail order the buffer accesses.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

fn encode(button: ButtonId, event: ButtonEvent) -> u8 {
    ((button as u8) << 4) | (event as u8)
}

fn decode(raw: u8) -> Option<(ButtonId, ButtonEvent)> {
    let button = ButtonId::from_u8(raw >> 4)?;
    let event = ButtonEvent::from_u8(raw & 0x0F)?;
    Some((button, event))
}

/// Push a button event into the queue.
/// Safe to call from callback context (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_button_event(button: ButtonId, event: ButtonEvent) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: single producer; the Release store below publishes the write.
    unsafe {
        EVENT_BUFFER[head as usize] = encode(button, event);
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next pending event.
/// Called from the game loop (single consumer).
pub fn pop_button_event() -> Option<(ButtonId, ButtonEvent)> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    decode(raw)
}

/// Drain all pending events into a handler, FIFO order.
pub fn drain_button_events(mut handler: impl FnMut(ButtonId, ButtonEvent)) {
    while let Some((button, event)) = pop_button_event() {
        handler(button, event);
    }
}

/// Number of pending events.
pub fn queue_len() -> usize {
    let head = EVENT_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EVENT_TAIL.load(Ordering::Relaxed) as usize;
    (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
}
