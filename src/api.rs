//! Convenience entry points over the simulated element

use crate::adapters::{SimulatedConnector, SimulatorConfig};
use crate::config::ElementConfig;
use crate::domain::Se05x;
use crate::error::Se05xResult;

pub use crate::model::*;

/// Open a session on a fresh simulated element with default configuration.
pub fn connect_simulated() -> Se05xResult<Se05x<SimulatedConnector>> {
    connect_simulated_with(ElementConfig::default(), SimulatorConfig::default())
}

pub fn connect_simulated_with(
    config: ElementConfig,
    simulator: SimulatorConfig,
) -> Se05xResult<Se05x<SimulatedConnector>> {
    let mut element = Se05x::with_config(SimulatedConnector::new(simulator), config);
    element.begin()?;
    Ok(element)
}
