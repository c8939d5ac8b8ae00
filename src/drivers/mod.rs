//! Hardware-facing drivers with host-testable logic cores.

pub mod button;
