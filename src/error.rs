// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/thermowatch

//! Error types

use thiserror::Error;

use crate::core::EventKind;

/// Errors raised by the thermostat core
#[derive(Debug, Error)]
pub enum ThermostatError {
    /// Thresholds do not satisfy `warning < emergency`
    #[error("invalid threshold configuration: warning {warning} must be below emergency {emergency}")]
    InvalidConfiguration {
        /// Requested warning level
        warning: f64,
        /// Requested emergency level
        emergency: f64,
    },

    /// A subscriber failed while handling an event
    #[error("handler for {kind} failed")]
    HandlerFailure {
        /// Kind of the event being dispatched
        kind: EventKind,
        /// Error returned by the handler
        #[source]
        source: anyhow::Error,
    },

    /// Configuration file is unusable
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias for thermostat core operations
pub type Result<T> = std::result::Result<T, ThermostatError>;
