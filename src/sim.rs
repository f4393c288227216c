//! Simulated encoder hardware for host tests.
//!
//! A [`Bench`] owns the simulated time and the three line levels. Pins,
//! clock and delay are cheap handles onto the same bench, so a test can
//! move the shaft or press the button while the encoder owns its pins.
//! Delays advance simulated time instead of sleeping.

use core::cell::{Cell, RefCell};
use core::ops::Range;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin, PinState};

use crate::clock::Clock;
use crate::encoder::EncoderPins;

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Read error injected by [`Bench::fail_reads`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimFault;

impl Error for SimFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Debug, Clone, Copy)]
enum Line {
    A,
    B,
    Switch,
}

#[derive(Default)]
struct BenchState {
    now_ns: Cell<u64>,
    a: Cell<bool>,
    b: Cell<bool>,
    /// Absolute millisecond ranges during which the switch is held.
    presses: RefCell<Vec<Range<u64>>>,
    failing: Cell<bool>,
    reads: Cell<u32>,
}

/// Shared simulated hardware.
#[derive(Clone)]
pub struct Bench(Rc<BenchState>);

impl Bench {
    /// Both quadrature lines high (detent, contacts open), switch released,
    /// time zero.
    pub fn new() -> Self {
        let state = BenchState::default();
        state.a.set(true);
        state.b.set(true);
        Self(Rc::new(state))
    }

    pub fn now_ms(&self) -> u64 {
        self.0.now_ns.get() / NANOS_PER_MILLI
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_ns(ms * NANOS_PER_MILLI);
    }

    fn advance_ns(&self, ns: u64) {
        self.0.now_ns.set(self.0.now_ns.get() + ns);
    }

    pub fn set_lines(&self, a: PinState, b: PinState) {
        self.0.a.set(a == PinState::High);
        self.0.b.set(b == PinState::High);
    }

    pub fn lines(&self) -> (PinState, PinState) {
        (PinState::from(self.0.a.get()), PinState::from(self.0.b.get()))
    }

    /// Hold the switch during `range`, in milliseconds relative to now.
    pub fn press(&self, range: Range<u64>) {
        let now = self.now_ms();
        self.0
            .presses
            .borrow_mut()
            .push(now + range.start..now + range.end);
    }

    pub fn fail_reads(&self, failing: bool) {
        self.0.failing.set(failing);
    }

    /// Number of successful line reads so far.
    pub fn reads(&self) -> u32 {
        self.0.reads.get()
    }

    fn is_high(&self, line: Line) -> Result<bool, SimFault> {
        if self.0.failing.get() {
            return Err(SimFault);
        }
        self.0.reads.set(self.0.reads.get() + 1);

        Ok(match line {
            Line::A => self.0.a.get(),
            Line::B => self.0.b.get(),
            Line::Switch => {
                let now = self.now_ms();
                !self.0.presses.borrow().iter().any(|r| r.contains(&now))
            }
        })
    }

    pub fn pins(&self) -> EncoderPins<SimPin, SimPin, SimPin> {
        EncoderPins {
            a: SimPin::new(self, Line::A),
            b: SimPin::new(self, Line::B),
            switch: SimPin::new(self, Line::Switch),
        }
    }

    pub fn clock(&self) -> SimClock {
        SimClock(self.clone())
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay(self.clone())
    }
}

pub struct SimPin {
    bench: Bench,
    line: Line,
}

impl SimPin {
    fn new(bench: &Bench, line: Line) -> Self {
        Self {
            bench: bench.clone(),
            line,
        }
    }
}

impl ErrorType for SimPin {
    type Error = SimFault;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, SimFault> {
        self.bench.is_high(self.line)
    }

    fn is_low(&mut self) -> Result<bool, SimFault> {
        self.bench.is_high(self.line).map(|high| !high)
    }
}

pub struct SimClock(Bench);

impl Clock for SimClock {
    fn now_ms(&mut self) -> u64 {
        self.0.now_ms()
    }
}

pub struct SimDelay(Bench);

impl embedded_hal::delay::DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance_ns(u64::from(ns));
    }
}

impl embedded_hal_async::delay::DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.advance_ns(u64::from(ns));
    }
}
