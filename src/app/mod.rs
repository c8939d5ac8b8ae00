//! Application layer: service orchestration, ports, and events.

pub mod events;
pub mod ports;
pub mod service;
