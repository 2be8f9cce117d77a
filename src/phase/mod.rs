//! Phase tasks: wait on a trigger, run one cycle, hand edge detection back.
//!
//! Each task owns exactly one [`PhaseBody`]. The body never sees the
//! trigger coordinator; the serve functions below do the wait/re-enable
//! bracketing so both phases follow the same contract.

pub mod listening;
pub mod reading;

use embassy_sync::blocking_mutex::raw::RawMutex;
use futures_lite::future::block_on;
use log::info;

use crate::app::events::{AppEvent, CycleSummary};
use crate::app::ports::{EventSink, LinePort};
use crate::trigger::coordinator::TriggerCoordinator;
use crate::trigger::Phase;

pub use listening::ListeningPhase;
pub use reading::ReadingPhase;

/// The work a phase task does once per trigger.
pub trait PhaseBody {
    fn phase(&self) -> Phase;

    /// Run one full cycle to completion.
    fn run_cycle<S: EventSink>(&mut self, sink: &mut S) -> CycleSummary;
}

/// Block until the body's trigger is released, then run one cycle.
pub fn serve_one<M, B, L, S>(
    coord: &TriggerCoordinator<M>,
    body: &mut B,
    lines: &mut L,
    sink: &mut S,
) -> CycleSummary
where
    M: RawMutex,
    B: PhaseBody,
    L: LinePort,
    S: EventSink,
{
    block_on(coord.consume_trigger(body.phase()));
    run_and_reenable(coord, body, lines, sink)
}

/// Run one cycle only if a release is already pending.
pub fn serve_pending<M, B, L, S>(
    coord: &TriggerCoordinator<M>,
    body: &mut B,
    lines: &mut L,
    sink: &mut S,
) -> Option<CycleSummary>
where
    M: RawMutex,
    B: PhaseBody,
    L: LinePort,
    S: EventSink,
{
    if !coord.try_consume_trigger(body.phase()) {
        return None;
    }
    Some(run_and_reenable(coord, body, lines, sink))
}

/// Task entry point. Never returns.
pub fn run_phase_task<M, B, L, S>(
    coord: &'static TriggerCoordinator<M>,
    mut body: B,
    mut lines: L,
    mut sink: S,
) -> !
where
    M: RawMutex,
    B: PhaseBody,
    L: LinePort,
    S: EventSink,
{
    info!("phase: {} task waiting for trigger", body.phase());
    loop {
        serve_one(coord, &mut body, &mut lines, &mut sink);
    }
}

fn run_and_reenable<M, B, L, S>(
    coord: &TriggerCoordinator<M>,
    body: &mut B,
    lines: &mut L,
    sink: &mut S,
) -> CycleSummary
where
    M: RawMutex,
    B: PhaseBody,
    L: LinePort,
    S: EventSink,
{
    sink.emit(&AppEvent::PhaseStarted(body.phase()));
    let summary = body.run_cycle(sink);
    sink.emit(&AppEvent::CycleComplete(summary));

    // Both lines, whichever one released this phase.
    if coord.reenable(lines) {
        sink.emit(&AppEvent::InterruptsReenabled);
    }
    summary
}
