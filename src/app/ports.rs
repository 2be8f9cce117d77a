//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TriggerCoordinator / phase bodies
//! ```
//!
//! The sensor bus, indicator pins and cooperative delays use the
//! `embedded-hal` 1.0 traits directly (`I2c`, `OutputPin`, `DelayNs`);
//! the ports below cover what `embedded-hal` has no vocabulary for.

use crate::trigger::{InterruptMask, Line};

// ───────────────────────────────────────────────────────────────
// Line port (driven adapter: GPIO ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Level read and edge-detection control for the trigger inputs.
///
/// Both methods may be called from interrupt or timer-callback context
/// and must not block.
pub trait LinePort {
    /// `true` while the line is held in its active (pressed) state.
    fn is_asserted(&mut self, line: Line) -> bool;

    /// Enable falling-edge detection on exactly the lines set in `mask`.
    /// Must take effect before the next interrupt can fire.
    fn apply_mask(&mut self, mask: InterruptMask);
}

// ───────────────────────────────────────────────────────────────
// Debounce timer port
// ───────────────────────────────────────────────────────────────

/// One-shot timer with at most one pending expiry.
pub trait DebounceTimerPort {
    /// (Re)start the timer; a pending expiry is replaced.
    fn arm(&mut self, delay_ms: u32);

    /// Cancel a pending expiry. No-op if none is pending.
    fn stop(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// Phase bodies emit structured [`AppEvent`](super::events::AppEvent)s
/// through this port. A missing or failing sink never blocks the core.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Sink that drops everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::AppEvent) {}
}
