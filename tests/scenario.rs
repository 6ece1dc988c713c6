// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! End-to-end run of the demo device over the canned temperature sequence

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use thermowatch::sensors::DEFAULT_SEED_DATA;
use thermowatch::{
    CoolingFan, Event, EventDispatcher, EventKind, MonitoredDevice, SeededFeed, SensorDriver,
    Termination, Thermostat, ThresholdStateMachine, Thresholds,
};

fn recorder(dispatcher: &mut EventDispatcher) -> Arc<Mutex<Vec<(EventKind, f64)>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for kind in [EventKind::ReachedWarning, EventKind::FellBelowWarning, EventKind::ReachedEmergency] {
        let log = Arc::clone(&log);
        dispatcher.subscribe(kind, Arc::new(move |e: &Event| -> Result<()> {
            log.lock().push((e.kind, e.reading.temperature));
            Ok(())
        }));
    }
    log
}

#[tokio::test]
async fn test_canned_sequence_event_order() {
    let thresholds = Thresholds::new(27.0, 75.0).unwrap();
    let mut dispatcher = EventDispatcher::new();
    let log = recorder(&mut dispatcher);

    let mut driver = SensorDriver::new(ThresholdStateMachine::new(thresholds), dispatcher, Duration::ZERO);
    let mut feed = SeededFeed::new("canned", DEFAULT_SEED_DATA.to_vec());

    let summary = driver.run(&mut feed, &CancellationToken::new()).await.unwrap();

    assert_eq!(summary.termination, Termination::Exhausted);
    assert_eq!(summary.samples, 16);
    assert_eq!(
        *log.lock(),
        vec![
            (EventKind::ReachedWarning, 28.7),
            (EventKind::ReachedWarning, 27.6),
            (EventKind::FellBelowWarning, 26.0),
            (EventKind::ReachedWarning, 45.0),
            (EventKind::ReachedWarning, 68.0),
            (EventKind::ReachedEmergency, 86.45),
        ]
    );
}

#[tokio::test]
async fn test_demo_device_ends_shut_down_with_cooling_on() {
    let thresholds = Thresholds::new(27.0, 75.0).unwrap();
    let device = Arc::new(MonitoredDevice::new(thresholds));
    let cooling = Arc::new(CoolingFan::new());

    let mut dispatcher = EventDispatcher::new();
    Thermostat::new(device.clone(), cooling.clone()).wire(&mut dispatcher);
    // A broken extra subscriber must not stop the thermostat's own handlers
    dispatcher.subscribe(
        EventKind::ReachedEmergency,
        Arc::new(|_: &Event| -> Result<()> { anyhow::bail!("pager offline") }),
    );

    let mut driver = SensorDriver::new(ThresholdStateMachine::new(thresholds), dispatcher, Duration::ZERO);
    let summary = driver
        .run(&mut SeededFeed::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.events, 6);
    assert_eq!(summary.handler_failures, 1);
    assert!(cooling.is_running());
    assert!(device.is_shut_down());
}
