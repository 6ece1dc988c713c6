// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Threshold state machine - turns readings into alert events

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Event, EventKind};
use crate::error::{Result, ThermostatError};
use crate::sensors::Reading;

/// Warning and emergency levels, `warning < emergency`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    warning: f64,
    emergency: f64,
}

impl Thresholds {
    /// Validate and build; fails with `InvalidConfiguration`
    pub fn new(warning: f64, emergency: f64) -> Result<Self> {
        // Negated so NaN levels are rejected too
        if !(warning.is_finite() && emergency.is_finite() && warning < emergency) {
            return Err(ThermostatError::InvalidConfiguration { warning, emergency });
        }
        Ok(Self { warning, emergency })
    }

    /// Lower bound of the warning band
    pub fn warning(&self) -> f64 { self.warning }
    /// Lower bound of the emergency band
    pub fn emergency(&self) -> f64 { self.emergency }
}

/// Band the last ingested reading fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SensorState {
    /// Below the warning level
    #[default]
    Normal,
    /// Inside the warning band
    Warning,
    /// At or above the emergency level
    Emergency,
}

/// Decides which event, if any, a reading raises.
///
/// Emergency and warning readings fire on every sample inside their band.
/// Recovery is edge-triggered: `FellBelowWarning` fires once, on the first
/// reading below the warning level after a warning, guarded by a one-bit
/// latch. Emergency readings neither set nor clear that latch.
#[derive(Debug, Clone)]
pub struct ThresholdStateMachine {
    thresholds: Thresholds,
    state: SensorState,
    has_reached_warning: bool,
}

impl ThresholdStateMachine {
    /// Start in `Normal` with the latch cleared
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            state: SensorState::Normal,
            has_reached_warning: false,
        }
    }

    /// Levels the machine was built with
    pub fn thresholds(&self) -> Thresholds { self.thresholds }
    /// Band of the last accepted reading
    pub fn state(&self) -> SensorState { self.state }
    /// Whether a recovery event is still pending
    pub fn has_reached_warning(&self) -> bool { self.has_reached_warning }

    /// Return to `Normal` with the latch cleared
    pub fn reset(&mut self) {
        self.state = SensorState::Normal;
        self.has_reached_warning = false;
    }

    /// Feed the next reading through the machine
    pub fn ingest(&mut self, reading: Reading) -> Option<Event> {
        let temperature = reading.temperature;
        if temperature.is_nan() {
            warn!("Ignoring NaN temperature reading at {}", reading.timestamp);
            return None;
        }

        if temperature >= self.thresholds.emergency {
            self.state = SensorState::Emergency;
            Some(Event::new(EventKind::ReachedEmergency, reading))
        } else if temperature >= self.thresholds.warning {
            self.state = SensorState::Warning;
            self.has_reached_warning = true;
            Some(Event::new(EventKind::ReachedWarning, reading))
        } else {
            self.state = SensorState::Normal;
            if self.has_reached_warning {
                self.has_reached_warning = false;
                Some(Event::new(EventKind::FellBelowWarning, reading))
            } else {
                None
            }
        }
    }
}
