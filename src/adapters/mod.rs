//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to              |
//! |------------|------------|--------------------------|
//! | `nvs`      | SavePort   | NVS / in-memory store    |
//! | `log_sink` | EventSink  | Serial log output        |
//! | `time`     | —          | ESP32 system timer       |

pub mod log_sink;
pub mod nvs;
pub mod time;
