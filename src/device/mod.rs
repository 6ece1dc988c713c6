// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Device module - consumers that act on thermostat events

mod thermostat;

pub use thermostat::{alert_message, Thermostat};

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

use crate::core::Thresholds;

/// Something that can cool the device down
pub trait CoolingMechanism: Send + Sync {
    /// Start cooling
    fn on(&self);
    /// Stop cooling
    fn off(&self);
}

/// The monitored device
pub trait Device: Send + Sync {
    /// Temperature where the warning band starts
    fn warning_level(&self) -> f64;
    /// Temperature where the emergency band starts
    fn emergency_level(&self) -> f64;

    /// Start the emergency shutdown sequence
    fn handle_emergency(&self);
}

/// Fan that remembers whether it is running
#[derive(Debug, Default)]
pub struct CoolingFan {
    running: AtomicBool,
}

impl CoolingFan {
    /// Fan that starts switched off
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the fan was last switched on
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl CoolingMechanism for CoolingFan {
    fn on(&self) {
        self.running.store(true, Ordering::SeqCst);
        info!("Cooling mechanism is on...");
    }

    fn off(&self) {
        self.running.store(false, Ordering::SeqCst);
        info!("Switching cooling mechanism off...");
    }
}

/// Device whose levels mirror the thresholds of its state machine
#[derive(Debug)]
pub struct MonitoredDevice {
    thresholds: Thresholds,
    shut_down: AtomicBool,
}

impl MonitoredDevice {
    /// Running device with the given levels
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            shut_down: AtomicBool::new(false),
        }
    }

    /// Whether the emergency shutdown has happened
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    fn shut_down(&self) {
        error!("Shutting down device...");
        self.shut_down.store(true, Ordering::SeqCst);
    }
}

impl Device for MonitoredDevice {
    fn warning_level(&self) -> f64 { self.thresholds.warning() }
    fn emergency_level(&self) -> f64 { self.thresholds.emergency() }

    fn handle_emergency(&self) {
        error!("Sending out notifications to emergency services personnel...");
        self.shut_down();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_tracks_state() {
        let fan = CoolingFan::new();
        assert!(!fan.is_running());
        fan.on();
        assert!(fan.is_running());
        fan.off();
        assert!(!fan.is_running());
    }

    #[test]
    fn test_device_mirrors_thresholds() {
        let device = MonitoredDevice::new(Thresholds::new(27.0, 75.0).unwrap());
        assert_eq!(device.warning_level(), 27.0);
        assert_eq!(device.emergency_level(), 75.0);

        device.handle_emergency();
        assert!(device.is_shut_down());
    }
}
