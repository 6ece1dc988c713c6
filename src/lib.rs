// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Thermowatch - Event-Driven Thermostat Simulator
//!
//! Watches a temperature feed and raises warning, emergency and recovery
//! events to independently registered subscribers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   Reading   ┌───────────────────────┐
//! │ Temperature │ ──────────→ │ ThresholdStateMachine │
//! │    Feed     │             └───────────────────────┘
//! └─────────────┘                         │ Option<Event>
//!        ↑                                ↓
//! ┌─────────────┐             ┌───────────────────────┐
//! │   Sensor    │ ──publish─→ │    EventDispatcher    │
//! │   Driver    │             └───────────────────────┘
//! └─────────────┘                         │ fan-out
//!                                         ↓
//!                             ┌───────────────────────┐
//!                             │ Thermostat handlers   │
//!                             │ (cooling, shutdown)   │
//!                             └───────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod core;
pub mod sensors;
pub mod device;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use config::Config;
pub use core::{
    Event, EventDispatcher, EventHandler, EventKind, RunSummary, SensorDriver, SensorState,
    SubscriptionHandle, Termination, ThresholdStateMachine, Thresholds,
};
pub use sensors::{Reading, SeededFeed, SimulatedFeed, TemperatureFeed};
pub use device::{CoolingFan, CoolingMechanism, Device, MonitoredDevice, Thermostat};
pub use error::ThermostatError;

/// Thermowatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Thermowatch name
pub const NAME: &str = "Thermowatch";
