//! Trigger path: edge capture, debounce validation, and phase release.
//!
//! ```text
//!   falling edge ─▶ capture_edge ─▶ (mask both, arm 50 ms timer)
//!                                          │
//!   timer expiry ─▶ validate_and_trigger ──┴▶ level still low? ─▶ Signal(phase)
//!                                                                    │
//!   phase task  ─▶ consume_trigger ◀─────────────────────────────────┘
//!                  run cycle ─▶ reenable (unmask both)
//! ```
//!
//! Line identities and their phase routing live in [`LINE_BINDINGS`]. The
//! pure debounce transition function is in [`debounce`]; the shared state
//! and the platform-facing entry points are in [`coordinator`].

pub mod coordinator;
pub mod debounce;

use crate::pins;

// ---------------------------------------------------------------------------
// Line / phase identities
// ---------------------------------------------------------------------------

/// One of the physical trigger inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Line {
    /// Requests the listening phase.
    Listen = 0,
    /// Requests the sensor-reading phase.
    Read = 1,
}

impl Line {
    pub const COUNT: usize = 2;
    pub const ALL: [Line; Self::COUNT] = [Line::Listen, Line::Read];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit position of this line inside an [`InterruptMask`].
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Inverse of [`Line::index`]; used by the ISR trampoline, which only
    /// gets an opaque integer argument.
    pub const fn from_index(idx: usize) -> Option<Line> {
        match idx {
            0 => Some(Line::Listen),
            1 => Some(Line::Read),
            _ => None,
        }
    }

    /// Phase this line releases.
    pub const fn phase(self) -> Phase {
        binding(self).phase
    }

    /// GPIO number the line is wired to.
    pub const fn gpio(self) -> i32 {
        binding(self).gpio
    }
}

/// The two mutually exclusive top-level behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    Listening = 0,
    Reading = 1,
}

impl Phase {
    pub const COUNT: usize = 2;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Phase::Listening => "listening",
            Phase::Reading => "reading",
        }
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Binding table
// ---------------------------------------------------------------------------

/// Routes one input line to its GPIO and the phase it releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBinding {
    pub line: Line,
    pub gpio: i32,
    pub phase: Phase,
}

/// Indexed by [`Line::index`].
pub const LINE_BINDINGS: [LineBinding; Line::COUNT] = [
    LineBinding {
        line: Line::Listen,
        gpio: pins::LISTEN_BUTTON_GPIO,
        phase: Phase::Listening,
    },
    LineBinding {
        line: Line::Read,
        gpio: pins::READ_BUTTON_GPIO,
        phase: Phase::Reading,
    },
];

pub const fn binding(line: Line) -> LineBinding {
    LINE_BINDINGS[line.index()]
}

// ---------------------------------------------------------------------------
// Interrupt mask
// ---------------------------------------------------------------------------

/// Which lines currently have falling-edge detection enabled.
///
/// A set bit means the line is enabled (unmasked).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptMask(u8);

impl InterruptMask {
    const ALL_BITS: u8 = (1 << Line::COUNT) - 1;

    /// Every line enabled; the idle state.
    pub const UNMASKED: Self = Self(Self::ALL_BITS);
    /// Every line disabled; held from capture until the phase re-enables.
    pub const MASKED: Self = Self(0);

    pub const fn is_enabled(self, line: Line) -> bool {
        self.0 & line.bit() != 0
    }

    pub const fn all_enabled(self) -> bool {
        self.0 == Self::ALL_BITS
    }

    pub const fn all_masked(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn with_enabled(self, line: Line) -> Self {
        Self(self.0 | line.bit())
    }

    #[must_use]
    pub const fn with_masked(self, line: Line) -> Self {
        Self(self.0 & !line.bit())
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl Default for InterruptMask {
    fn default() -> Self {
        Self::UNMASKED
    }
}
