//! One-shot GPIO bring-up and the per-pin ISR service.
//!
//! Configures the two phase-select buttons as pulled-up falling-edge
//! inputs and the two indicator LEDs as outputs, using raw ESP-IDF sys
//! calls. Called once from `main()` before the phase tasks start.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::InitError;
#[cfg(target_os = "espidf")]
use crate::pins;
#[cfg(target_os = "espidf")]
use crate::trigger::{Line, LINE_BINDINGS};

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), InitError> {
    // SAFETY: Called once from main() before any task or ISR exists.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), InitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), InitError> {
    for b in &LINE_BINDINGS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << b.gpio,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(InitError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: button inputs configured (listen={}, read={})",
        pins::LISTEN_BUTTON_GPIO, pins::READ_BUTTON_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe from ISR and timer context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulated inputs idle high (pull-up, button released).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

/// Enable or disable the falling-edge interrupt on one input.
#[cfg(target_os = "espidf")]
pub fn gpio_set_edge(pin: i32, enabled: bool) {
    // SAFETY: gpio_intr_enable/disable only touch the pin's interrupt
    // enable bit; both are placed in IRAM and are ISR-safe.
    unsafe {
        if enabled {
            gpio_intr_enable(pin);
        } else {
            gpio_intr_disable(pin);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set_edge(_pin: i32, _enabled: bool) {}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), InitError> {
    let output_pins = [pins::LED_RED_GPIO, pins::LED_GREEN_GPIO];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(InitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: indicator outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::drivers::button::button_isr_handler;

/// `arg` carries the [`Line`] index the handler was registered with.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_gpio_isr(arg: *mut core::ffi::c_void) {
    if let Some(line) = Line::from_index(arg as usize) {
        button_isr_handler(line);
    }
}

/// Install the per-pin GPIO ISR service and register both buttons.
/// Call after init_peripherals() and after the debounce timer exists.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), InitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The registered handler
    // only enters the coordinator's ISR-safe state lock (`isr_lock`).
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(InitError::IsrInstallFailed(ret));
        }

        for b in &LINE_BINDINGS {
            gpio_set_intr_type(b.gpio, gpio_int_type_t_GPIO_INTR_NEGEDGE);
            let ret = gpio_isr_handler_add(
                b.gpio,
                Some(button_gpio_isr),
                b.line.index() as *mut core::ffi::c_void,
            );
            if ret != ESP_OK {
                return Err(InitError::IsrInstallFailed(ret));
            }
            gpio_intr_enable(b.gpio);
        }

        info!("hw_init: ISR service installed (listen, read)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), InitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
