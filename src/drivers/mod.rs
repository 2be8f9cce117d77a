//! Platform drivers: GPIO bring-up, debounce timer, indicators, task spawning.

pub mod button;
pub mod hw_init;
pub mod hw_timer;
pub mod indicator;
#[cfg(target_os = "espidf")]
pub mod isr_lock;
pub mod task_pin;
