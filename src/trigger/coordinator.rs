//! Shared trigger state and the four entry points that mutate it.
//!
//! | Caller            | Context          | Entry point              |
//! |-------------------|------------------|--------------------------|
//! | GPIO ISR          | interrupt        | [`TriggerCoordinator::capture_edge`] |
//! | debounce timer    | esp_timer task   | [`TriggerCoordinator::validate_and_trigger`] |
//! | phase task        | RTOS thread      | [`TriggerCoordinator::consume_trigger`] |
//! | phase task        | RTOS thread      | [`TriggerCoordinator::reenable`] |
//!
//! The debounce state, logical interrupt mask and counters sit behind one
//! blocking mutex whose raw lock `M` is chosen by the owner. Because
//! [`TriggerCoordinator::capture_edge`] takes it from the GPIO ISR, `M` must
//! be enterable from interrupt context on target (see
//! `drivers::isr_lock`); host builds use [`CriticalSectionRawMutex`].
//! Transitions are computed under the lock with [`step`]; the resulting
//! effects are applied to hardware and to the phase signals after the lock
//! is released. The logical mask is updated under the lock, so an edge
//! racing the hardware write is still dropped.
//!
//! The phase signals stay on [`CriticalSectionRawMutex`]. They are only
//! touched from the timer task and the phase tasks, never from the ISR.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::signal::Signal;
use log::debug;

use super::debounce::{
    step, DebounceEvent, DebounceParams, DebounceState, Effect, Effects,
};
use super::{InterruptMask, Line, Phase};
use crate::app::ports::{DebounceTimerPort, LinePort};

/// Counters kept by the coordinator. Never reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerStats {
    /// Edges that opened a debounce window.
    pub edges_captured: u32,
    /// Edges on a masked line. Every edge inside an open window lands
    /// here, since capture masks both lines.
    pub edges_dropped: u32,
    /// Windows that closed with the line back at idle.
    pub spurious_edges: u32,
    /// Trigger releases, indexed by [`Phase::index`].
    pub releases: [u32; Phase::COUNT],
    /// Releases taken by the owning task, indexed by [`Phase::index`].
    pub consumed: [u32; Phase::COUNT],
    /// Transitions of the mask back to fully enabled.
    pub unmask_transitions: u32,
    pub reenable_calls: u32,
}

impl TriggerStats {
    pub fn released(&self, phase: Phase) -> u32 {
        self.releases[phase.index()]
    }

    pub fn total_releases(&self) -> u32 {
        self.releases.iter().sum()
    }
}

/// Outcome of [`TriggerCoordinator::capture_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// The edge opened a debounce window.
    Armed,
    /// The line was masked.
    Dropped,
}

/// Outcome of [`TriggerCoordinator::validate_and_trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Released(Phase),
    Spurious(Line),
    NothingPending,
}

struct Shared {
    state: DebounceState,
    mask: InterruptMask,
    params: DebounceParams,
    stats: TriggerStats,
}

impl Shared {
    /// Record mask effects against the logical mask and update counters.
    fn account(&mut self, fx: &Effects) {
        for effect in fx {
            match *effect {
                Effect::MaskAll => self.mask = InterruptMask::MASKED,
                Effect::UnmaskAll => {
                    if !self.mask.all_enabled() {
                        self.stats.unmask_transitions += 1;
                    }
                    self.mask = InterruptMask::UNMASKED;
                }
                Effect::Release(phase) => self.stats.releases[phase.index()] += 1,
                Effect::Discard(_) => self.stats.spurious_edges += 1,
                Effect::ArmTimer { .. } | Effect::StopTimer => {}
            }
        }
    }
}

pub struct TriggerCoordinator<M: RawMutex = CriticalSectionRawMutex> {
    shared: Mutex<M, RefCell<Shared>>,
    triggers: [Signal<CriticalSectionRawMutex, ()>; Phase::COUNT],
}

impl TriggerCoordinator {
    pub const fn new() -> Self {
        Self::with_params(DebounceParams::DEFAULT)
    }

    pub const fn with_params(params: DebounceParams) -> Self {
        TriggerCoordinator::with_mutex(params)
    }
}

impl<M: RawMutex> TriggerCoordinator<M> {
    /// Construct with the state lock `M` picked by the caller.
    pub const fn with_mutex(params: DebounceParams) -> Self {
        Self {
            shared: Mutex::new(RefCell::new(Shared {
                state: DebounceState::Idle,
                mask: InterruptMask::UNMASKED,
                params,
                stats: TriggerStats {
                    edges_captured: 0,
                    edges_dropped: 0,
                    spurious_edges: 0,
                    releases: [0; Phase::COUNT],
                    consumed: [0; Phase::COUNT],
                    unmask_transitions: 0,
                    reenable_calls: 0,
                },
            })),
            triggers: [Signal::new(), Signal::new()],
        }
    }

    /// Replace the debounce parameters. Call before interrupts are enabled.
    pub fn configure(&self, params: DebounceParams) {
        self.shared.lock(|s| s.borrow_mut().params = params);
    }

    pub fn params(&self) -> DebounceParams {
        self.shared.lock(|s| s.borrow().params)
    }

    // -----------------------------------------------------------------
    // Edge dispatcher
    // -----------------------------------------------------------------

    /// Record a falling edge on `line`. Interrupt-safe as long as `M` is:
    /// takes the state lock once, never touches the phase signals, and
    /// never logs.
    pub fn capture_edge<H>(&self, line: Line, hw: &mut H) -> Capture
    where
        H: LinePort + DebounceTimerPort,
    {
        let (capture, fx) = self.shared.lock(|cell| {
            let mut s = cell.borrow_mut();
            if !s.mask.is_enabled(line) {
                s.stats.edges_dropped += 1;
                return (Capture::Dropped, Effects::new());
            }

            // An enabled line implies no open window.
            debug_assert_eq!(s.state, DebounceState::Idle);
            let (next, fx) = step(s.state, DebounceEvent::Edge(line), &s.params);
            s.stats.edges_captured += 1;
            s.state = next;
            s.account(&fx);
            (Capture::Armed, fx)
        });

        self.apply(&fx, hw);
        capture
    }

    // -----------------------------------------------------------------
    // Debounce timer
    // -----------------------------------------------------------------

    /// Timer-expiry handler: re-read the pending line and either release
    /// its phase or discard the edge.
    pub fn validate_and_trigger<H>(&self, hw: &mut H) -> Validation
    where
        H: LinePort + DebounceTimerPort,
    {
        let (outcome, fx) = self.shared.lock(|cell| {
            let mut s = cell.borrow_mut();
            let asserted = match s.state {
                DebounceState::Armed(line) => hw.is_asserted(line),
                DebounceState::Idle => false,
            };

            let (next, fx) = step(s.state, DebounceEvent::Expired { asserted }, &s.params);
            s.state = next;
            s.account(&fx);

            let outcome = fx
                .iter()
                .find_map(|e| match *e {
                    Effect::Release(phase) => Some(Validation::Released(phase)),
                    Effect::Discard(line) => Some(Validation::Spurious(line)),
                    _ => None,
                })
                .unwrap_or(Validation::NothingPending);
            (outcome, fx)
        });

        self.apply(&fx, hw);

        match outcome {
            Validation::Released(phase) => debug!("trigger: {} released", phase),
            Validation::Spurious(line) => debug!("trigger: spurious edge on {:?}", line),
            Validation::NothingPending => debug!("trigger: expiry with nothing pending"),
        }
        outcome
    }

    // -----------------------------------------------------------------
    // Phase side
    // -----------------------------------------------------------------

    /// Wait for one release of `phase`. Several releases before the wait
    /// collapse into one.
    pub async fn consume_trigger(&self, phase: Phase) {
        self.triggers[phase.index()].wait().await;
        self.note_consumed(phase);
    }

    /// Non-blocking variant of [`Self::consume_trigger`].
    pub fn try_consume_trigger(&self, phase: Phase) -> bool {
        if self.triggers[phase.index()].try_take().is_some() {
            self.note_consumed(phase);
            true
        } else {
            false
        }
    }

    pub fn is_trigger_pending(&self, phase: Phase) -> bool {
        self.triggers[phase.index()].signaled()
    }

    /// Re-enable edge detection on every line. Idempotent: returns `true`
    /// only when the mask actually went back to fully enabled.
    pub fn reenable<L: LinePort>(&self, lines: &mut L) -> bool {
        let transitioned = self.shared.lock(|cell| {
            let mut s = cell.borrow_mut();
            s.stats.reenable_calls += 1;
            if s.mask.all_enabled() {
                return false;
            }
            s.mask = InterruptMask::UNMASKED;
            s.stats.unmask_transitions += 1;
            true
        });

        if transitioned {
            lines.apply_mask(InterruptMask::UNMASKED);
        }
        transitioned
    }

    // -----------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------

    pub fn mask(&self) -> InterruptMask {
        self.shared.lock(|s| s.borrow().mask)
    }

    /// Line whose debounce window is open, if any.
    pub fn pending(&self) -> Option<Line> {
        match self.shared.lock(|s| s.borrow().state) {
            DebounceState::Armed(line) => Some(line),
            DebounceState::Idle => None,
        }
    }

    pub fn stats(&self) -> TriggerStats {
        self.shared.lock(|s| s.borrow().stats)
    }

    fn note_consumed(&self, phase: Phase) {
        self.shared
            .lock(|s| s.borrow_mut().stats.consumed[phase.index()] += 1);
    }

    fn apply<H>(&self, fx: &Effects, hw: &mut H)
    where
        H: LinePort + DebounceTimerPort,
    {
        for effect in fx {
            match *effect {
                Effect::MaskAll => hw.apply_mask(InterruptMask::MASKED),
                Effect::UnmaskAll => hw.apply_mask(InterruptMask::UNMASKED),
                Effect::ArmTimer { delay_ms } => hw.arm(delay_ms),
                Effect::StopTimer => hw.stop(),
                Effect::Release(phase) => self.triggers[phase.index()].signal(()),
                Effect::Discard(_) => {}
            }
        }
    }
}

impl Default for TriggerCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
