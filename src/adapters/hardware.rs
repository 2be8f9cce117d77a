//! Hardware adapter — bridges the board GPIO and debounce timer to the
//! trigger ports.
//!
//! [`BoardLines`] is zero-sized: all state lives in the peripherals
//! themselves, so the ISR, the timer callback and each phase task can
//! construct their own copy. On non-espidf targets the underlying drivers
//! use cfg-gated simulation stubs.

use crate::app::ports::{DebounceTimerPort, LinePort};
use crate::drivers::{hw_init, hw_timer};
use crate::trigger::{InterruptMask, Line};

#[derive(Debug, Clone, Copy, Default)]
pub struct BoardLines;

// ── LinePort implementation ───────────────────────────────────

impl LinePort for BoardLines {
    fn is_asserted(&mut self, line: Line) -> bool {
        // Active-low with pull-up.
        !hw_init::gpio_read(line.gpio())
    }

    fn apply_mask(&mut self, mask: InterruptMask) {
        for line in Line::ALL {
            hw_init::gpio_set_edge(line.gpio(), mask.is_enabled(line));
        }
    }
}

// ── DebounceTimerPort implementation ──────────────────────────

impl DebounceTimerPort for BoardLines {
    fn arm(&mut self, delay_ms: u32) {
        hw_timer::arm_debounce(delay_ms);
    }

    fn stop(&mut self) {
        hw_timer::stop_debounce();
    }
}
