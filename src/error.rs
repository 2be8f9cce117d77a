//! Unified error types for the luxphase firmware.
//!
//! A single `Error` enum that every subsystem can convert into. All
//! variants are `Copy` so they can be handed from a phase task to the
//! event sink without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor bus transaction failed (transient, recoverable).
    Bus(BusError),
    /// A required peripheral could not be brought up (fatal).
    Init(InitError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Bus errors
// ---------------------------------------------------------------------------

/// Transient fault from one write-then-read transaction on the sensor bus.
///
/// The reading cycle skips the affected sample and keeps going; nothing
/// above the phase task ever sees one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The device did not acknowledge its address or a data byte.
    Nack,
    /// Another controller won arbitration.
    ArbitrationLoss,
    /// Misplaced START/STOP or other electrical bus error.
    Bus,
    /// The controller's receive FIFO overran.
    Overrun,
    /// Anything the HAL could not classify.
    Other,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nack => write!(f, "no acknowledge"),
            Self::ArbitrationLoss => write!(f, "arbitration lost"),
            Self::Bus => write!(f, "bus error"),
            Self::Overrun => write!(f, "receive overrun"),
            Self::Other => write!(f, "transfer failed"),
        }
    }
}

impl From<embedded_hal::i2c::ErrorKind> for BusError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;
        match kind {
            ErrorKind::NoAcknowledge(_) => Self::Nack,
            ErrorKind::ArbitrationLoss => Self::ArbitrationLoss,
            ErrorKind::Bus => Self::Bus,
            ErrorKind::Overrun => Self::Overrun,
            _ => Self::Other,
        }
    }
}

impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Self::Bus(e)
    }
}

// ---------------------------------------------------------------------------
// Initialisation errors
// ---------------------------------------------------------------------------

/// Peripheral bring-up failures. Any of these halts the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// GPIO configuration for a button or indicator pin failed.
    GpioConfigFailed(i32),
    /// Per-pin GPIO ISR service could not be installed.
    IsrInstallFailed(i32),
    /// The one-shot debounce timer could not be created.
    TimerCreateFailed(i32),
    /// The sensor bus could not be opened.
    BusOpenFailed,
    /// A phase task thread could not be spawned.
    TaskSpawnFailed,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={rc})"),
            Self::TimerCreateFailed(rc) => write!(f, "debounce timer create failed (rc={rc})"),
            Self::BusOpenFailed => write!(f, "sensor bus open failed"),
            Self::TaskSpawnFailed => write!(f, "phase task spawn failed"),
        }
    }
}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
