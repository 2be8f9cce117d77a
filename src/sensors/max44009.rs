//! MAX44009 ambient-light sensor over I²C.
//!
//! ## Register encoding
//!
//! ```text
//!   0x03  LUX HIGH   E3 E2 E1 E0 M7 M6 M5 M4
//!   0x04  LUX LOW    -  -  -  -  M3 M2 M1 M0
//! ```
//!
//! `lux = 2^E × M × 0.045`. One sample is a pointer write to 0x03 followed
//! by a 2-byte read under a repeated start. The second byte is OR-ed whole
//! into the mantissa low nibble; its upper bits are expected to read zero.
//!
//! Decoding runs in integer milli-lux and truncates to whole lux, so no
//! float formatting is needed on target.

use embedded_hal::i2c::{Error as _, I2c};

use crate::error::BusError;

/// Lux high-byte register (exponent + mantissa high nibble).
pub const REG_LUX_HIGH: u8 = 0x03;
/// Lux low-byte register (mantissa low nibble).
pub const REG_LUX_LOW: u8 = 0x04;

/// Milli-lux per mantissa count at exponent 0.
const MILLILUX_PER_COUNT: u32 = 45;

/// The two raw bytes of one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRegisterPair {
    pub high: u8,
    pub low: u8,
}

impl RawRegisterPair {
    pub const fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }

    pub const fn exponent(self) -> u8 {
        (self.high >> 4) & 0x0F
    }

    pub const fn mantissa(self) -> u8 {
        ((self.high & 0x0F) << 4) | self.low
    }

    /// Light level in milli-lux. Cannot overflow: the largest value is
    /// `255 << 15` counts × 45 ≈ 3.8e8.
    pub const fn millilux(self) -> u32 {
        ((self.mantissa() as u32) << self.exponent()) * MILLILUX_PER_COUNT
    }

    /// Whole lux, truncated toward zero.
    pub const fn lux(self) -> u32 {
        self.millilux() / 1000
    }

    /// Alternative `exponent << 8 | mantissa` packing, for diagnostics.
    pub const fn packed(self) -> u16 {
        ((self.exponent() as u16) << 8) | self.mantissa() as u16
    }
}

/// Decode a high/low register pair to whole lux.
pub const fn decode(high: u8, low: u8) -> u32 {
    RawRegisterPair::new(high, low).lux()
}

/// Sensor transaction engine. Owns the bus for as long as it lives.
pub struct LuxSensor<I2C> {
    i2c: I2C,
    address: u8,
    register: u8,
}

impl<I2C: I2c> LuxSensor<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self::with_register(i2c, address, REG_LUX_HIGH)
    }

    pub fn with_register(i2c: I2C, address: u8, register: u8) -> Self {
        Self {
            i2c,
            address,
            register,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Pointer write then 2-byte read in one transaction.
    pub fn read_raw(&mut self) -> Result<RawRegisterPair, BusError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[self.register], &mut buf)
            .map_err(|e| BusError::from(e.kind()))?;
        Ok(RawRegisterPair::new(buf[0], buf[1]))
    }

    /// One decoded sample in whole lux.
    pub fn read_sample(&mut self) -> Result<u32, BusError> {
        self.read_raw().map(RawRegisterPair::lux)
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}
