// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Temperature simulator for demo/testing

use async_trait::async_trait;
use anyhow::{anyhow, Result};
use rand::prelude::*;
use rand_distr::Normal;

use super::{Reading, TemperatureFeed};
use crate::config::SimulationConfig;

/// Random-walk temperature source with a fixed number of samples
pub struct SimulatedFeed {
    id: String,
    rng: rand::rngs::StdRng,
    step: Normal<f64>,

    // Simulation state
    temperature: f64,
    drift: f64,
    remaining: usize,
}

impl SimulatedFeed {
    /// Fails when the step deviation is negative or not finite
    pub fn new(id: &str, config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let step = Normal::new(0.0, config.step_std_dev)
            .map_err(|e| anyhow!("invalid step deviation {}: {}", config.step_std_dev, e))?;
        let rng = match config.seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };

        Ok(Self {
            id: id.to_string(),
            rng,
            step,
            temperature: config.start,
            drift: config.drift,
            remaining: config.samples,
        })
    }
}

#[async_trait]
impl TemperatureFeed for SimulatedFeed {
    fn id(&self) -> &str { &self.id }

    async fn next_reading(&mut self) -> Result<Option<Reading>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let reading = Reading::now(self.temperature);
        self.temperature += self.drift + self.rng.sample(self.step);
        Ok(Some(reading))
    }
}
