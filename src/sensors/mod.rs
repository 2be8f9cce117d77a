//! Ambient-light sampling: the MAX44009 transaction engine and the
//! per-cycle sample buffer.

pub mod max44009;

/// Samples taken per reading cycle, and the buffer capacity.
pub const MAX_SAMPLES: usize = 20;

/// Decoded lux values from the most recent reading cycle.
///
/// Overwritten in place; an index whose transaction failed keeps whatever
/// it held before (zero until first written).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    samples: [u32; MAX_SAMPLES],
}

impl SensorReading {
    pub const fn new() -> Self {
        Self {
            samples: [0; MAX_SAMPLES],
        }
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.samples.get(index).copied()
    }

    /// Store `lux` at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, lux: u32) {
        if let Some(slot) = self.samples.get_mut(index) {
            *slot = lux;
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.samples
    }
}

impl Default for SensorReading {
    fn default() -> Self {
        Self::new()
    }
}
