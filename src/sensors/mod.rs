// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Sensor module - temperature feeds

mod traits;
mod seeded;
mod simulator;

pub use traits::{Reading, TemperatureFeed};
pub use seeded::{SeededFeed, DEFAULT_SEED_DATA};
pub use simulator::SimulatedFeed;

use anyhow::Result;
use tracing::info;

use crate::config::{SamplingConfig, SourceKind};

/// Build the feed selected by the sampling configuration
pub fn feed_from_config(config: &SamplingConfig) -> Result<Box<dyn TemperatureFeed>> {
    let feed: Box<dyn TemperatureFeed> = match config.source {
        SourceKind::Seeded => Box::new(SeededFeed::new("seeded", config.seed_data.clone())),
        SourceKind::Simulated => Box::new(SimulatedFeed::new("simulated", &config.simulated)?),
    };
    info!("Using temperature feed: {}", feed.id());
    Ok(feed)
}
