//! Single-colour indicator LEDs.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives a plain GPIO output through hw_init.
//! On host/test: tracks state in-memory only.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::drivers::hw_init;
use crate::pins;

pub struct Indicator {
    gpio: i32,
    on: bool,
}

impl Indicator {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    /// Red LED, blinked once per sample.
    pub fn red() -> Self {
        Self::new(pins::LED_RED_GPIO)
    }

    /// Green LED, lit while listening.
    pub fn green() -> Self {
        Self::new(pins::LED_GREEN_GPIO)
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl ErrorType for Indicator {
    type Error = Infallible;
}

impl OutputPin for Indicator {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, true);
        self.on = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, false);
        self.on = false;
        Ok(())
    }
}
