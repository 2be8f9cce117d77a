//! System configuration parameters
//!
//! All tunable parameters for the luxphase controller. There is no
//! persistent store: the firmware boots with [`SystemConfig::default()`]
//! and validates it before any peripheral is touched.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::pins;
use crate::sensors::max44009::REG_LUX_HIGH;
use crate::sensors::MAX_SAMPLES;
use crate::trigger::debounce::{DebounceParams, MaskPolicy};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Debounce ---
    /// One-shot debounce window after a falling edge (milliseconds)
    pub debounce_ms: u32,
    /// When edge detection is handed back after a genuine trigger
    pub mask_policy: MaskPolicy,

    // --- Reading phase ---
    /// Samples taken per reading cycle (1..=20)
    pub samples_per_cycle: u8,
    /// Red indicator on-time after each sample (milliseconds)
    pub indicator_on_ms: u32,
    /// Red indicator off-time after each sample (milliseconds)
    pub indicator_off_ms: u32,

    // --- Listening phase ---
    /// How long the listening phase holds the green indicator (milliseconds)
    pub listen_window_ms: u32,

    // --- Sensor bus ---
    /// 7-bit sensor address
    pub sensor_address: u8,
    /// Register pointer written before the repeated-start read
    pub lux_register: u8,
    /// I²C clock (Hz)
    pub i2c_baudrate_hz: u32,

    // --- Tasks ---
    /// RTOS priority of the listening task
    pub listen_task_priority: u8,
    /// RTOS priority of the reading task
    pub read_task_priority: u8,
    /// Stack size per phase task (KiB)
    pub task_stack_kb: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Debounce
            debounce_ms: 50,
            mask_policy: MaskPolicy::HoldUntilPhaseDone,

            // Reading phase
            samples_per_cycle: MAX_SAMPLES as u8,
            indicator_on_ms: 1000,
            indicator_off_ms: 1000,

            // Listening phase
            listen_window_ms: 5000,

            // Sensor bus
            sensor_address: pins::MAX44009_ADDR,
            lux_register: REG_LUX_HIGH,
            i2c_baudrate_hz: 100_000,

            // Tasks
            listen_task_priority: 1,
            read_task_priority: 2,
            task_stack_kb: 4,
        }
    }
}

impl SystemConfig {
    /// Reject values the phase tasks cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.debounce_ms == 0 {
            return Err(Error::Config("debounce_ms must be non-zero"));
        }
        if self.samples_per_cycle == 0 || self.samples_per_cycle as usize > MAX_SAMPLES {
            return Err(Error::Config("samples_per_cycle must be 1..=20"));
        }
        if self.sensor_address > 0x7F {
            return Err(Error::Config("sensor_address must be a 7-bit address"));
        }
        if self.i2c_baudrate_hz == 0 {
            return Err(Error::Config("i2c_baudrate_hz must be non-zero"));
        }
        if self.listen_task_priority == self.read_task_priority {
            return Err(Error::Config("phase tasks need distinct priorities"));
        }
        if self.task_stack_kb == 0 {
            return Err(Error::Config("task_stack_kb must be non-zero"));
        }
        Ok(())
    }

    /// Debounce settings handed to the trigger coordinator at boot.
    pub fn debounce_params(&self) -> DebounceParams {
        DebounceParams {
            delay_ms: self.debounce_ms,
            policy: self.mask_policy,
        }
    }
}
