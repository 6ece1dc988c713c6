// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Sensor traits and common types

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use anyhow::Result;

/// A single temperature sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Degrees, same unit as the thresholds
    pub temperature: f64,
    /// When the sample was taken
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    /// Reading with an explicit timestamp
    pub fn new(temperature: f64, timestamp: DateTime<Utc>) -> Self {
        Self { temperature, timestamp }
    }

    /// Reading stamped with the current time
    pub fn now(temperature: f64) -> Self {
        Self::new(temperature, Utc::now())
    }
}

/// Ordered source of temperature readings
///
/// A feed is finite: `Ok(None)` means it is exhausted and the run ends
/// normally.
#[async_trait]
pub trait TemperatureFeed: Send {
    /// Feed identifier used in logs
    fn id(&self) -> &str;

    /// Pull the next reading
    async fn next_reading(&mut self) -> Result<Option<Reading>>;
}
