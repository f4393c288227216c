//! Edge classification between two successive samples of one line.

use embedded_hal::digital::PinState;

/// What happened on a line between the previous and the current sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Both samples are at the same level.
    NoChange,
    /// Low before, high now.
    Rising,
    /// High before, low now.
    Falling,
}

impl Edge {
    /// Classify the transition from `previous` to `current`.
    pub fn classify(previous: PinState, current: PinState) -> Self {
        match (previous, current) {
            (PinState::Low, PinState::High) => Edge::Rising,
            (PinState::High, PinState::Low) => Edge::Falling,
            _ => Edge::NoChange,
        }
    }

    /// Returns `true` for [`Rising`](Edge::Rising) and
    /// [`Falling`](Edge::Falling).
    pub fn is_edge(self) -> bool {
        self != Edge::NoChange
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
