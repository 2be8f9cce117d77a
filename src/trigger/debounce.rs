//! Debounce state machine as a pure transition function.
//!
//! [`step`] takes the current state and one event and returns the next
//! state plus the side effects to apply. It never touches hardware, so the
//! whole edge/expiry sequence can be exercised without a timer or GPIO.
//!
//! ```text
//!            Edge(line)                    Expired { asserted }
//!   Idle ──────────────▶ Armed(line) ─────────────────────────────▶ Idle
//!                          │  ▲
//!                          └──┘ Edge(_)   (absorbed, no effects)
//! ```

use heapless::Vec;
use serde::{Deserialize, Serialize};

use super::{Line, Phase};

/// When edge detection is handed back after a genuine trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaskPolicy {
    /// Keep both lines masked until the released phase calls `reenable`.
    /// The phases cannot overlap and presses during a cycle are dropped.
    HoldUntilPhaseDone,
    /// Unmask both lines as soon as the timer commits the trigger.
    ReleaseAtExpiry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceParams {
    pub delay_ms: u32,
    pub policy: MaskPolicy,
}

impl DebounceParams {
    pub const DEFAULT: Self = Self {
        delay_ms: 50,
        policy: MaskPolicy::HoldUntilPhaseDone,
    };
}

impl Default for DebounceParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebounceState {
    #[default]
    Idle,
    /// Timer running; the line is the pending edge.
    Armed(Line),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceEvent {
    /// Falling edge seen on an enabled line.
    Edge(Line),
    /// Timer fired; `asserted` is the pending line's level at expiry.
    Expired { asserted: bool },
}

/// Side effect requested by a transition, applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    MaskAll,
    UnmaskAll,
    ArmTimer { delay_ms: u32 },
    StopTimer,
    /// Set the phase's trigger.
    Release(Phase),
    /// Edge failed re-validation.
    Discard(Line),
}

pub type Effects = Vec<Effect, 4>;

/// Advance the debounce machine by one event.
pub fn step(
    state: DebounceState,
    event: DebounceEvent,
    params: &DebounceParams,
) -> (DebounceState, Effects) {
    let mut fx = Effects::new();
    // Capacity is 4 and no arm pushes more than 3.
    let mut push = |e: Effect| {
        let _ = fx.push(e);
    };

    let next = match (state, event) {
        (DebounceState::Idle, DebounceEvent::Edge(line)) => {
            push(Effect::MaskAll);
            push(Effect::ArmTimer {
                delay_ms: params.delay_ms,
            });
            DebounceState::Armed(line)
        }

        // Bounce while the window is open: already pending, do not queue.
        (armed @ DebounceState::Armed(_), DebounceEvent::Edge(_)) => armed,

        (DebounceState::Armed(line), DebounceEvent::Expired { asserted: true }) => {
            push(Effect::StopTimer);
            push(Effect::Release(line.phase()));
            if params.policy == MaskPolicy::ReleaseAtExpiry {
                push(Effect::UnmaskAll);
            }
            DebounceState::Idle
        }

        (DebounceState::Armed(line), DebounceEvent::Expired { asserted: false }) => {
            push(Effect::StopTimer);
            push(Effect::Discard(line));
            push(Effect::UnmaskAll);
            DebounceState::Idle
        }

        // Late expiry with nothing pending.
        (DebounceState::Idle, DebounceEvent::Expired { .. }) => DebounceState::Idle,
    };

    (next, fx)
}
