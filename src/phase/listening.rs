//! Listening phase: light the green indicator for the listen window.
//!
//! The radio/audio side of listening lives outside this firmware; this
//! body only marks the window so the operator can see the phase is live.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{info, warn};

use super::PhaseBody;
use crate::app::events::CycleSummary;
use crate::app::ports::EventSink;
use crate::trigger::Phase;

pub struct ListeningPhase<L, D> {
    indicator: L,
    delay: D,
    window_ms: u32,
    cycles: u32,
}

impl<L: OutputPin, D: DelayNs> ListeningPhase<L, D> {
    pub fn new(indicator: L, delay: D, window_ms: u32) -> Self {
        Self {
            indicator,
            delay,
            window_ms,
            cycles: 0,
        }
    }

    /// Completed listening windows since boot.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }
}

impl<L: OutputPin, D: DelayNs> PhaseBody for ListeningPhase<L, D> {
    fn phase(&self) -> Phase {
        Phase::Listening
    }

    fn run_cycle<S: EventSink>(&mut self, _sink: &mut S) -> CycleSummary {
        info!("listening: window open for {} ms", self.window_ms);
        if self.indicator.set_high().is_err() {
            warn!("listening: indicator on failed");
        }
        self.delay.delay_ms(self.window_ms);
        if self.indicator.set_low().is_err() {
            warn!("listening: indicator off failed");
        }
        self.cycles += 1;

        CycleSummary {
            phase: Phase::Listening,
            recorded: 0,
            faults: 0,
        }
    }
}
