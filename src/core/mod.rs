// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Core module - threshold state machine, event dispatch and sampling loop

mod engine;
mod event_bus;
mod state_machine;

pub use engine::SensorDriver;
pub use event_bus::{
    DispatchReport, Event, EventDispatcher, EventHandler, EventKind, SubscriptionHandle,
};
pub use state_machine::{SensorState, ThresholdStateMachine, Thresholds};

use serde::{Deserialize, Serialize};

/// Why a sensor run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Termination {
    /// Feed ran out of readings
    #[default]
    Exhausted,
    /// Stopped between samples by the cancellation token
    Cancelled,
}

/// Counters for one sensor run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Readings pulled from the feed
    pub samples: u64,
    /// Events published
    pub events: u64,
    /// Handler errors across all publishes
    pub handler_failures: usize,
    /// How the run ended
    pub termination: Termination,
}
