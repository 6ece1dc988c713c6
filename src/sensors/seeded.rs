// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Replays a fixed temperature sequence

use async_trait::async_trait;
use anyhow::Result;

use super::{Reading, TemperatureFeed};

/// Canned sequence the demo device ships with
pub const DEFAULT_SEED_DATA: [f64; 16] = [
    16.0, 17.0, 16.5, 18.0, 19.0, 22.0, 24.0, 26.75, 28.7, 27.6, 26.0, 24.0, 22.0, 45.0, 68.0, 86.45,
];

/// Feed backed by a fixed list of temperatures
///
/// Each reading is timestamped when it is pulled.
pub struct SeededFeed {
    id: String,
    data: Vec<f64>,
    position: usize,
}

impl SeededFeed {
    /// Feed that replays `data` once
    pub fn new(id: &str, data: Vec<f64>) -> Self {
        Self {
            id: id.to_string(),
            data,
            position: 0,
        }
    }

    /// Samples not yet pulled
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl Default for SeededFeed {
    fn default() -> Self {
        Self::new("seeded", DEFAULT_SEED_DATA.to_vec())
    }
}

#[async_trait]
impl TemperatureFeed for SeededFeed {
    fn id(&self) -> &str { &self.id }

    async fn next_reading(&mut self) -> Result<Option<Reading>> {
        let Some(&temperature) = self.data.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        Ok(Some(Reading::now(temperature)))
    }
}
