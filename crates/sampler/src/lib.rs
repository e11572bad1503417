//! Synthetic reading pipeline: generator, bounded history, trend estimator
//! and the periodic driver task that runs them.

pub mod driver;
pub mod generator;
pub mod history;
pub mod pipeline;
pub mod trend;

pub use driver::{spawn_driver, DriverCommand, DriverHandle, MAX_INTERVAL, MIN_INTERVAL};
pub use generator::{round_to, ReadingGenerator, ValueRange};
pub use history::HistoryBuffer;
pub use pipeline::Pipeline;
pub use trend::estimate;

use polar_config::PolarConfig;
use polar_core::{Refresh, Result};
use tokio::sync::mpsc;

/// Build a pipeline from `config` and start driving it at
/// `config.refresh.interval_secs`.
///
/// Must be called from within a Tokio runtime.
pub fn spawn(config: &PolarConfig) -> Result<(DriverHandle, mpsc::Receiver<Refresh>)> {
    config.validate()?;
    let pipeline = Pipeline::from_config(config)?;
    Ok(spawn_driver(pipeline, config.refresh.interval()))
}
