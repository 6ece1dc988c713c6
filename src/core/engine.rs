// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Sensor driver - the sampling loop

use std::time::Duration;
use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{EventDispatcher, RunSummary, Termination, ThresholdStateMachine};
use crate::sensors::TemperatureFeed;

/// Pulls readings, runs them through the state machine and publishes events.
///
/// Owns the state machine and dispatcher for the duration of a run. Each
/// reading is fully dispatched before the next one is pulled.
pub struct SensorDriver {
    machine: ThresholdStateMachine,
    dispatcher: EventDispatcher,
    inter_sample_delay: Duration,
}

impl SensorDriver {
    /// Driver waiting `inter_sample_delay` between samples
    pub fn new(machine: ThresholdStateMachine, dispatcher: EventDispatcher, inter_sample_delay: Duration) -> Self {
        Self {
            machine,
            dispatcher,
            inter_sample_delay,
        }
    }

    /// State machine driven by this loop
    pub fn machine(&self) -> &ThresholdStateMachine { &self.machine }
    /// Dispatcher events are published on
    pub fn dispatcher(&self) -> &EventDispatcher { &self.dispatcher }

    /// Hand back the state machine and dispatcher after a run
    pub fn into_parts(self) -> (ThresholdStateMachine, EventDispatcher) {
        (self.machine, self.dispatcher)
    }

    /// Run until the feed is exhausted or `cancel` fires.
    ///
    /// Cancellation is only observed between samples. Feed errors end the run.
    pub async fn run(&mut self, feed: &mut dyn TemperatureFeed, cancel: &CancellationToken) -> Result<RunSummary> {
        info!("Heat sensor is running on feed {}...", feed.id());
        let mut summary = RunSummary::default();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                reading = feed.next_reading() => Some(reading?),
            };

            let reading = match next {
                None => {
                    summary.termination = Termination::Cancelled;
                    break;
                }
                Some(None) => {
                    summary.termination = Termination::Exhausted;
                    break;
                }
                Some(Some(reading)) => reading,
            };

            summary.samples += 1;
            info!("DateTime: {}, Temperature: {}", reading.timestamp.to_rfc3339(), reading.temperature);

            if let Some(event) = self.machine.ingest(reading) {
                let report = self.dispatcher.publish(&event);
                debug!("{} delivered to {} handler(s), {} failed", event.kind, report.delivered, report.failed);
                summary.events += 1;
                summary.handler_failures += report.failed;
            }

            if !self.inter_sample_delay.is_zero() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(self.inter_sample_delay) => {}
                }
            }
        }

        info!(
            "Heat sensor stopped ({:?}): {} samples, {} events, {} handler failures",
            summary.termination, summary.samples, summary.events, summary.handler_failures
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use anyhow::bail;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::core::{Event, EventKind, Thresholds};
    use crate::sensors::{Reading, SeededFeed};

    fn driver(delay: Duration) -> SensorDriver {
        let machine = ThresholdStateMachine::new(Thresholds::new(27.0, 75.0).unwrap());
        SensorDriver::new(machine, EventDispatcher::new(), delay)
    }

    fn record_all(dispatcher: &mut EventDispatcher) -> Arc<Mutex<Vec<Event>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        for kind in [EventKind::ReachedWarning, EventKind::FellBelowWarning, EventKind::ReachedEmergency] {
            let log = Arc::clone(&log);
            dispatcher.subscribe(kind, Arc::new(move |e: &Event| -> Result<()> {
                log.lock().push(*e);
                Ok(())
            }));
        }
        log
    }

    #[tokio::test]
    async fn test_runs_to_exhaustion() {
        let machine = ThresholdStateMachine::new(Thresholds::new(27.0, 75.0).unwrap());
        let mut dispatcher = EventDispatcher::new();
        let log = record_all(&mut dispatcher);
        let mut driver = SensorDriver::new(machine, dispatcher, Duration::ZERO);
        let mut feed = SeededFeed::new("t", vec![20.0, 30.0, 80.0, 10.0]);

        let summary = driver.run(&mut feed, &CancellationToken::new()).await.unwrap();

        assert_eq!(summary.termination, Termination::Exhausted);
        assert_eq!(summary.samples, 4);
        assert_eq!(summary.events, 3);
        let kinds: Vec<_> = log.lock().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::ReachedWarning, EventKind::ReachedEmergency, EventKind::FellBelowWarning]
        );
    }

    #[tokio::test]
    async fn test_cancelled_before_first_sample() {
        let mut driver = driver(Duration::ZERO);
        let mut feed = SeededFeed::new("t", vec![30.0]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let summary = driver.run(&mut feed, &cancel).await.unwrap();

        assert_eq!(summary.termination, Termination::Cancelled);
        assert_eq!(summary.samples, 0);
        assert_eq!(feed.remaining(), 1);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_delay() {
        let mut driver = driver(Duration::from_secs(3600));
        let log = record_all(&mut driver.dispatcher);
        let mut feed = SeededFeed::new("t", vec![30.0, 31.0, 32.0]);
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let summary = driver.run(&mut feed, &cancel).await.unwrap();

        assert_eq!(summary.termination, Termination::Cancelled);
        assert_eq!(summary.samples, 1);
        assert_eq!(log.lock().len(), 1);
        assert_eq!(feed.remaining(), 2);
    }

    #[tokio::test]
    async fn test_handler_failures_are_counted() {
        let mut driver = driver(Duration::ZERO);
        driver.dispatcher.subscribe(
            EventKind::ReachedWarning,
            Arc::new(|_: &Event| -> Result<()> { bail!("fan jammed") }),
        );
        let mut feed = SeededFeed::new("t", vec![28.0, 29.0]);

        let summary = driver.run(&mut feed, &CancellationToken::new()).await.unwrap();

        assert_eq!(summary.events, 2);
        assert_eq!(summary.handler_failures, 2);
    }

    struct BrokenFeed;

    #[async_trait]
    impl TemperatureFeed for BrokenFeed {
        fn id(&self) -> &str { "broken" }

        async fn next_reading(&mut self) -> Result<Option<Reading>> {
            bail!("sensor unplugged")
        }
    }

    #[tokio::test]
    async fn test_feed_error_ends_run() {
        let mut driver = driver(Duration::ZERO);
        let err = driver.run(&mut BrokenFeed, &CancellationToken::new()).await.unwrap_err();
        assert!(err.to_string().contains("unplugged"));
    }
}
