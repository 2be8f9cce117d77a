//! Phase-select buttons: the process-wide coordinator and its two
//! platform entry points.
//!
//! ## Hardware
//!
//! Two active-low momentary switches with internal pull-ups. Each GPIO
//! fires on the falling edge; the ISR trampoline in `hw_init` passes the
//! line index here. Debounce and routing are done by
//! [`TriggerCoordinator`].

use crate::adapters::hardware::BoardLines;
use crate::trigger::coordinator::{Capture, TriggerCoordinator, Validation};
use crate::trigger::debounce::DebounceParams;
use crate::trigger::Line;

/// State lock of [`COORDINATOR`]; entered from the GPIO ISR on target.
#[cfg(target_os = "espidf")]
pub type BoardMutex = crate::drivers::isr_lock::IsrRawMutex;
#[cfg(not(target_os = "espidf"))]
pub type BoardMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Shared by the GPIO ISR, the debounce timer callback and both phase tasks.
pub static COORDINATOR: TriggerCoordinator<BoardMutex> =
    TriggerCoordinator::with_mutex(DebounceParams::DEFAULT);

/// ISR handler: record a falling edge. Interrupt-safe.
pub fn button_isr_handler(line: Line) -> Capture {
    COORDINATOR.capture_edge(line, &mut BoardLines)
}

/// Debounce timer callback: re-validate and release the phase.
pub fn debounce_expired_handler() -> Validation {
    COORDINATOR.validate_and_trigger(&mut BoardLines)
}
