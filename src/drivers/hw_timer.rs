//! One-shot debounce timer on ESP-IDF's esp_timer API.
//!
//! Armed from the GPIO ISR, fires once after the debounce window and hands
//! control to [`debounce_expired_handler`](crate::drivers::button::debounce_expired_handler).
//! The callback runs in the esp_timer task (not ISR), so it may log.
//!
//! On simulation targets the timer does not exist; host tests drive
//! expiry explicitly through the coordinator.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::InitError;

#[cfg(target_os = "espidf")]
static mut DEBOUNCE_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: DEBOUNCE_TIMER is written once in `create_debounce_timer()`
/// before the ISR service is installed, and only read afterwards.
#[cfg(target_os = "espidf")]
unsafe fn debounce_timer() -> esp_timer_handle_t { unsafe { DEBOUNCE_TIMER } }

#[cfg(target_os = "espidf")]
unsafe extern "C" fn debounce_cb(_arg: *mut core::ffi::c_void) {
    crate::drivers::button::debounce_expired_handler();
}

/// Create (but do not start) the debounce timer.
#[cfg(target_os = "espidf")]
pub fn create_debounce_timer() -> Result<(), InitError> {
    // SAFETY: DEBOUNCE_TIMER is written here once at boot from the main
    // task, before any interrupt can arm it.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(debounce_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"debounce\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut DEBOUNCE_TIMER);
        if ret != ESP_OK {
            return Err(InitError::TimerCreateFailed(ret));
        }
    }
    info!("hw_timer: debounce timer created");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn create_debounce_timer() -> Result<(), InitError> {
    log::info!("hw_timer(sim): debounce timer not created (expiry driven by caller)");
    Ok(())
}

/// (Re)start the one-shot timer. A pending expiry is replaced.
#[cfg(target_os = "espidf")]
pub fn arm_debounce(delay_ms: u32) {
    // SAFETY: debounce_timer() contract. esp_timer_stop on an idle timer
    // returns ESP_ERR_INVALID_STATE, which is expected here.
    unsafe {
        let t = debounce_timer();
        if t.is_null() { return; }
        esp_timer_stop(t);
        esp_timer_start_once(t, u64::from(delay_ms) * 1_000);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn arm_debounce(_delay_ms: u32) {}

/// Cancel a pending expiry, if any.
#[cfg(target_os = "espidf")]
pub fn stop_debounce() {
    // SAFETY: debounce_timer() contract; null-check covers a failed create.
    unsafe {
        let t = debounce_timer();
        if !t.is_null() { esp_timer_stop(t); }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_debounce() {}
