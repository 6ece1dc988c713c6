// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Thermostat - wires device consumers to the event dispatcher

use std::sync::Arc;
use anyhow::Result;
use tracing::{error, info, warn};

use super::{CoolingMechanism, Device};
use crate::core::{Event, EventDispatcher, EventKind, SubscriptionHandle};

/// Console alert text for an event kind
pub fn alert_message(kind: EventKind, device: &dyn Device) -> String {
    let warning = device.warning_level();
    let emergency = device.emergency_level();
    match kind {
        EventKind::ReachedWarning => format!(
            "{} Alert!! (Warning level is between {} and {})",
            kind.label(), warning, emergency
        ),
        EventKind::FellBelowWarning => format!(
            "{} Alert!! Temperature falls below warning level (Warning level is between {} and {})",
            kind.label(), warning, emergency
        ),
        EventKind::ReachedEmergency => format!(
            "{} Alert!! (Emergency level is {} and above)",
            kind.label(), emergency
        ),
    }
}

/// Reacts to sensor events by driving the cooling mechanism and device
pub struct Thermostat {
    device: Arc<dyn Device>,
    cooling: Arc<dyn CoolingMechanism>,
}

impl Thermostat {
    /// Thermostat acting on `device` and `cooling`
    pub fn new(device: Arc<dyn Device>, cooling: Arc<dyn CoolingMechanism>) -> Self {
        Self { device, cooling }
    }

    /// Subscribe one handler per event kind
    pub fn wire(&self, dispatcher: &mut EventDispatcher) -> Vec<SubscriptionHandle> {
        info!("Thermostat is running...");

        let device = Arc::clone(&self.device);
        let cooling = Arc::clone(&self.cooling);
        let on_warning = dispatcher.subscribe(
            EventKind::ReachedWarning,
            Arc::new(move |e: &Event| -> Result<()> {
                warn!("{}", alert_message(e.kind, device.as_ref()));
                cooling.on();
                Ok(())
            }),
        );

        let device = Arc::clone(&self.device);
        let cooling = Arc::clone(&self.cooling);
        let on_recovery = dispatcher.subscribe(
            EventKind::FellBelowWarning,
            Arc::new(move |e: &Event| -> Result<()> {
                info!("{}", alert_message(e.kind, device.as_ref()));
                cooling.off();
                Ok(())
            }),
        );

        let device = Arc::clone(&self.device);
        let on_emergency = dispatcher.subscribe(
            EventKind::ReachedEmergency,
            Arc::new(move |e: &Event| -> Result<()> {
                error!("{}", alert_message(e.kind, device.as_ref()));
                device.handle_emergency();
                Ok(())
            }),
        );

        vec![on_warning, on_recovery, on_emergency]
    }
}
