//! Adapters - concrete implementations of ports (traits)

pub mod simulated;

#[cfg(test)]
pub mod faulty;

// Re-export for convenience
pub use simulated::{SimulatedConnector, SimulatedElement, SimulatorConfig};
