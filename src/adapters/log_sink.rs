//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production). When no logger is
//! installed the `log` macros are no-ops, so the phase tasks are never
//! held up by the console.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::PhaseStarted(phase) => {
                info!("PHASE | {} started", phase);
            }
            AppEvent::Sample { index, lux } => {
                info!("Sample {}: {} lux", index, lux);
            }
            AppEvent::BusFault { index, error } => {
                warn!("I2C bus fault | sample={} | {}", index, error);
            }
            AppEvent::CycleComplete(s) => {
                info!(
                    "PHASE | {} done | recorded={} faults={}",
                    s.phase, s.recorded, s.faults
                );
            }
            AppEvent::InterruptsReenabled => {
                info!("TRIGGER | buttons re-enabled");
            }
        }
    }
}
