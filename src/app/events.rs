//! Outbound application events.
//!
//! Phase bodies emit these through the [`EventSink`](super::ports::EventSink)
//! port. The shipped adapter writes them to the console via `log`.

use crate::error::BusError;
use crate::trigger::Phase;

/// Structured events emitted by the phase tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A phase task woke on its trigger and is starting a cycle.
    PhaseStarted(Phase),

    /// One decoded light sample was stored.
    Sample { index: usize, lux: u32 },

    /// A bus transaction failed; the sample at `index` was skipped.
    BusFault { index: usize, error: BusError },

    /// The cycle body finished.
    CycleComplete(CycleSummary),

    /// Edge detection was handed back to both lines.
    InterruptsReenabled,
}

/// What one phase cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub phase: Phase,
    /// Samples stored this cycle (0 for the listening phase).
    pub recorded: usize,
    /// Samples skipped on bus faults.
    pub faults: usize,
}
