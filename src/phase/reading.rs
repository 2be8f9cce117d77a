//! Reading phase: sample the light sensor a fixed number of times.
//!
//! Each iteration performs one transaction, then blinks the red indicator
//! (on for the first half of the interval, off for the second). A failed
//! transaction skips its index and the cycle carries on.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use log::warn;

use super::PhaseBody;
use crate::app::events::{AppEvent, CycleSummary};
use crate::app::ports::EventSink;
use crate::config::SystemConfig;
use crate::sensors::max44009::LuxSensor;
use crate::sensors::{MAX_SAMPLES, SensorReading};
use crate::trigger::Phase;

/// Timing of one reading cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTiming {
    pub samples: usize,
    pub indicator_on_ms: u32,
    pub indicator_off_ms: u32,
}

impl ReadingTiming {
    pub fn from_config(cfg: &SystemConfig) -> Self {
        Self {
            samples: (cfg.samples_per_cycle as usize).min(MAX_SAMPLES),
            indicator_on_ms: cfg.indicator_on_ms,
            indicator_off_ms: cfg.indicator_off_ms,
        }
    }
}

impl Default for ReadingTiming {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

pub struct ReadingPhase<I2C, L, D> {
    sensor: LuxSensor<I2C>,
    indicator: L,
    delay: D,
    timing: ReadingTiming,
    reading: SensorReading,
}

impl<I2C, L, D> ReadingPhase<I2C, L, D>
where
    I2C: I2c,
    L: OutputPin,
    D: DelayNs,
{
    pub fn new(sensor: LuxSensor<I2C>, indicator: L, delay: D, timing: ReadingTiming) -> Self {
        Self {
            sensor,
            indicator,
            delay,
            timing: ReadingTiming {
                samples: timing.samples.min(MAX_SAMPLES),
                ..timing
            },
            reading: SensorReading::new(),
        }
    }

    /// Samples from the latest cycle.
    pub fn reading(&self) -> &SensorReading {
        &self.reading
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    fn blink(&mut self) {
        if self.indicator.set_high().is_err() {
            warn!("reading: indicator on failed");
        }
        self.delay.delay_ms(self.timing.indicator_on_ms);
        if self.indicator.set_low().is_err() {
            warn!("reading: indicator off failed");
        }
        self.delay.delay_ms(self.timing.indicator_off_ms);
    }
}

impl<I2C, L, D> PhaseBody for ReadingPhase<I2C, L, D>
where
    I2C: I2c,
    L: OutputPin,
    D: DelayNs,
{
    fn phase(&self) -> Phase {
        Phase::Reading
    }

    fn run_cycle<S: EventSink>(&mut self, sink: &mut S) -> CycleSummary {
        let mut recorded = 0;
        let mut faults = 0;

        for index in 0..self.timing.samples {
            match self.sensor.read_sample() {
                Ok(lux) => {
                    self.reading.set(index, lux);
                    recorded += 1;
                    sink.emit(&AppEvent::Sample { index, lux });
                }
                Err(error) => {
                    faults += 1;
                    sink.emit(&AppEvent::BusFault { index, error });
                }
            }
            self.blink();
        }

        CycleSummary {
            phase: Phase::Reading,
            recorded,
            faults,
        }
    }
}
