//! Lock for state shared with the GPIO ISR.
//!
//! The `critical-section` implementation esp-idf-hal provides takes a
//! FreeRTOS recursive mutex, which must not be entered from an interrupt
//! handler. [`IsrRawMutex`] enters esp-idf-hal's ISR critical section
//! instead: a port spinlock with interrupts masked on the calling core,
//! usable from ISR, timer-task and thread context alike. Nothing run
//! under it may block or log.

use embassy_sync::blocking_mutex::raw::RawMutex;

pub struct IsrRawMutex(());

// SAFETY: `interrupt::free` masks interrupts on this core and holds a
// cross-core spinlock for the duration of the closure, so at most one
// closure runs at a time.
unsafe impl RawMutex for IsrRawMutex {
    const INIT: Self = Self(());

    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        esp_idf_hal::interrupt::free(f)
    }
}
