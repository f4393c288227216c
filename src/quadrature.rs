//! Quadrature decoding at ×1, ×2 and ×4 resolution.
//!
//! The decoder is stateless per call: it looks at the edge seen on each
//! channel since the previous sample and at the level the *other* channel
//! has right now. All history lives in the previous sample pair kept by
//! [`RotaryEncoder`](crate::RotaryEncoder).
//!
//! ```text
//!          ┌───┐   ┌───┐          clockwise: A leads B
//!   A  ────┘   └───┘   └───
//!            ┌───┐   ┌───┐
//!   B  ──────┘   └───┘   └─
//! ```

use embedded_hal::digital::PinState;
use heapless::Vec;

use crate::edge::Edge;

/// Maximum number of steps a single sample pair can produce (×4 mode,
/// both channels changed).
pub const MAX_STEPS_PER_SAMPLE: usize = 2;

/// Steps decoded from one sample pair, in channel order (A first).
pub type Steps = Vec<Direction, MAX_STEPS_PER_SAMPLE>;

/// Rotation direction of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    fn from_clockwise(clockwise: bool) -> Self {
        if clockwise {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    pub fn is_clockwise(self) -> bool {
        self == Direction::Clockwise
    }

    /// `+1` for clockwise, `-1` for counter-clockwise.
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Number of steps reported per full electrical cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeMode {
    /// Rising edges of A only.
    X1,
    /// Both edges of A.
    #[default]
    X2,
    /// Both edges of A and of B.
    X4,
}

impl DecodeMode {
    /// Steps produced by one full cycle of the A/B signal.
    pub fn steps_per_cycle(self) -> u8 {
        match self {
            DecodeMode::X1 => 1,
            DecodeMode::X2 => 2,
            DecodeMode::X4 => 4,
        }
    }

    /// Decode one sample pair.
    ///
    /// # Arguments
    /// * `edge_a`, `edge_b` — transitions since the previous sample
    /// * `a`, `b` — current levels of both channels
    ///
    /// Returns an empty list when neither channel changed.
    pub fn decode(self, edge_a: Edge, edge_b: Edge, a: PinState, b: PinState) -> Steps {
        let mut steps = Steps::new();

        match self {
            DecodeMode::X1 => {
                if edge_a == Edge::Rising {
                    push(&mut steps, b == PinState::Low);
                }
            }
            DecodeMode::X2 => {
                if let Some(cw) = channel_a_step(edge_a, b) {
                    push(&mut steps, cw);
                }
            }
            DecodeMode::X4 => {
                if let Some(cw) = channel_a_step(edge_a, b) {
                    push(&mut steps, cw);
                }
                if let Some(cw) = channel_b_step(edge_b, a) {
                    push(&mut steps, cw);
                }
            }
        }

        steps
    }
}

/// An edge on A is clockwise when B sits at the opposite level of the
/// level A just reached.
fn channel_a_step(edge_a: Edge, b: PinState) -> Option<bool> {
    match edge_a {
        Edge::Rising => Some(b == PinState::Low),
        Edge::Falling => Some(b == PinState::High),
        Edge::NoChange => None,
    }
}

/// An edge on B is clockwise when A already sits at the level B just
/// reached.
fn channel_b_step(edge_b: Edge, a: PinState) -> Option<bool> {
    match edge_b {
        Edge::Rising => Some(a == PinState::High),
        Edge::Falling => Some(a == PinState::Low),
        Edge::NoChange => None,
    }
}

fn push(steps: &mut Steps, clockwise: bool) {
    // At most one step per channel, so capacity is never exceeded.
    let _ = steps.push(Direction::from_clockwise(clockwise));
}

// ── Unit Tests ───────────────────────────────────────────────────────
