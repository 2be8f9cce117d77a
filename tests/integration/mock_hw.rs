//! Mock hardware for integration tests.
//!
//! `SimBoard` stands in for the GPIO lines and the one-shot debounce
//! timer, driven by a millisecond virtual clock. Everything else records
//! calls so tests can assert on the full history.

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use luxphase::app::events::AppEvent;
use luxphase::app::ports::{DebounceTimerPort, EventSink, LinePort};
use luxphase::trigger::coordinator::{Capture, TriggerCoordinator, Validation};
use luxphase::trigger::debounce::DebounceParams;
use luxphase::trigger::{InterruptMask, Line};

// ── SimBoard ──────────────────────────────────────────────────

/// Two buttons plus the debounce timer, on a virtual clock.
#[derive(Debug, Default)]
pub struct SimBoard {
    pub now_ms: u32,
    pressed: [bool; Line::COUNT],
    deadline: Option<u32>,
    pub mask_writes: Vec<InterruptMask>,
    pub arms: u32,
    pub stops: u32,
}

#[allow(dead_code)]
impl SimBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unmask_writes(&self) -> usize {
        self.mask_writes
            .iter()
            .filter(|m| **m == InterruptMask::UNMASKED)
            .count()
    }

    pub fn timer_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl LinePort for SimBoard {
    fn is_asserted(&mut self, line: Line) -> bool {
        self.pressed[line.index()]
    }

    fn apply_mask(&mut self, mask: InterruptMask) {
        self.mask_writes.push(mask);
    }
}

impl DebounceTimerPort for SimBoard {
    fn arm(&mut self, delay_ms: u32) {
        self.arms += 1;
        self.deadline = Some(self.now_ms + delay_ms);
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.deadline = None;
    }
}

// ── Rig: coordinator + board ──────────────────────────────────

/// Wires a coordinator to a [`SimBoard`] and plays button gestures.
pub struct Rig {
    pub coord: TriggerCoordinator,
    pub board: SimBoard,
    pub captures: Vec<Capture>,
    pub validations: Vec<Validation>,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_params(DebounceParams::DEFAULT)
    }

    pub fn with_params(params: DebounceParams) -> Self {
        Self {
            coord: TriggerCoordinator::with_params(params),
            board: SimBoard::new(),
            captures: Vec::new(),
            validations: Vec::new(),
        }
    }

    /// Line goes low: a falling edge reaches the dispatcher.
    pub fn press(&mut self, line: Line) -> Capture {
        self.board.pressed[line.index()] = true;
        let c = self.coord.capture_edge(line, &mut self.board);
        self.captures.push(c);
        c
    }

    /// Line goes high. Rising edges do not interrupt.
    pub fn release(&mut self, line: Line) {
        self.board.pressed[line.index()] = false;
    }

    /// Advance the clock one millisecond at a time, firing the timer.
    pub fn advance(&mut self, ms: u32) {
        for _ in 0..ms {
            self.board.now_ms += 1;
            if self.board.deadline.is_some_and(|d| d <= self.board.now_ms) {
                self.board.deadline = None;
                let v = self.coord.validate_and_trigger(&mut self.board);
                self.validations.push(v);
            }
        }
    }

    /// Press, hold for `held_ms`, release, then let any timer run out.
    pub fn tap(&mut self, line: Line, held_ms: u32) {
        self.press(line);
        self.advance(held_ms);
        self.release(line);
        self.advance(100);
    }
}

// ── Scripted I²C bus ──────────────────────────────────────────

/// Answers each transaction from a queue of canned replies; an empty
/// queue answers zeros.
#[derive(Debug, Default)]
pub struct MockI2c {
    replies: VecDeque<Result<[u8; 2], ErrorKind>>,
    pub transactions: Vec<(u8, Vec<u8>)>,
}

#[allow(dead_code)]
impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&mut self, high: u8, low: u8) -> &mut Self {
        self.replies.push_back(Ok([high, low]));
        self
    }

    pub fn nack(&mut self) -> &mut Self {
        self.replies
            .push_back(Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)));
        self
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        let reply = self.replies.pop_front().unwrap_or(Ok([0, 0]));
        for op in operations {
            match op {
                Operation::Write(bytes) => self.transactions.push((address, bytes.to_vec())),
                Operation::Read(buf) => buf.copy_from_slice(&reply?),
            }
        }
        Ok(())
    }
}

// ── Output pin ────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockPin {
    pub levels: Vec<bool>,
}

impl PinErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.push(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.push(false);
        Ok(())
    }
}

// ── Virtual delay ─────────────────────────────────────────────

/// Accumulates requested sleep instead of sleeping.
#[derive(Debug, Default)]
pub struct VirtualDelay {
    pub elapsed_ns: u64,
    pub calls: u32,
}

impl DelayNs for VirtualDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
        self.calls += 1;
    }
}

// ── Recording sink ────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
