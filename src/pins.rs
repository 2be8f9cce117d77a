//! GPIO / bus assignments for the luxphase controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Phase-select buttons (active-low, internal pull-up, falling-edge IRQ)
// ---------------------------------------------------------------------------

/// Button that requests the listening phase.
pub const LISTEN_BUTTON_GPIO: i32 = 4;
/// Button that requests the sensor-reading phase.
pub const READ_BUTTON_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Indicator LEDs
// ---------------------------------------------------------------------------

/// Red LED, toggled once per sample during a reading cycle.
pub const LED_RED_GPIO: i32 = 11;
/// Green LED, lit while the listening phase is active.
pub const LED_GREEN_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// I²C bus (MAX44009 ambient-light sensor)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;

/// 7-bit MAX44009 address with A0 tied to GND (0x4B with A0 to VCC).
pub const MAX44009_ADDR: u8 = 0x4A;
