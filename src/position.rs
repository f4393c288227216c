//! Bounded, wrapping position counter with optional velocity scaling.
//!
//! The counter always lies in `[min_position, max_position]`. Stepping past
//! either bound wraps to the other one, so the knob behaves like a circular
//! selector. In [`Dynamic`](PositionMode::Dynamic) mode fast successive
//! steps move the counter further, which makes large ranges usable from a
//! detented knob.

use crate::quadrature::Direction;
use crate::timing::{DYNAMIC_DIVISOR, DYNAMIC_WINDOW_MS};

/// How far one decoded step moves the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PositionMode {
    /// Every step moves the position by exactly 1.
    #[default]
    Linear,
    /// Steps arriving within [`DYNAMIC_WINDOW_MS`] of the previous one move
    /// the position by more than 1.
    Dynamic,
}

/// Magnitude of a step that arrived `elapsed_ms` after the previous one.
///
/// `max(1, (DYNAMIC_WINDOW_MS - elapsed_ms) / DYNAMIC_DIVISOR)`, with the
/// subtraction saturating at zero. Non-increasing in `elapsed_ms` and never
/// below 1.
pub fn dynamic_magnitude(elapsed_ms: u64) -> u32 {
    let boost = DYNAMIC_WINDOW_MS.saturating_sub(elapsed_ms) / DYNAMIC_DIVISOR;
    boost.max(1) as u32
}

/// Move `position` by `delta` inside `[min, max]`, wrapping around.
///
/// Correct for any `delta`, including ones that overshoot the range by
/// several full spans.
///
/// # Precondition
///
/// `max >= min`. A reversed range is a caller bug: `max == min - 1` panics
/// on the modulo, other reversed ranges return meaningless values.
///
/// # Example
///
/// ```
/// use quadrature_knob::wrap_position;
///
/// assert_eq!(wrap_position(3, 1, 0, 3), 0);
/// assert_eq!(wrap_position(0, -1, 0, 3), 3);
/// assert_eq!(wrap_position(10, 25, 10, 19), 15);
/// ```
pub fn wrap_position(position: i32, delta: i64, min: i32, max: i32) -> i32 {
    debug_assert!(max >= min, "max_position must not be below min_position");

    let min = i64::from(min);
    let range = 1 + i64::from(max) - min;
    let offset = (i64::from(position) - min + delta).rem_euclid(range);

    // `offset < range`, so the result lies in `[min, max]` and fits in i32.
    (min + offset) as i32
}

/// Runtime position state for one encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionTracker {
    position: i32,
    /// Clock reading of the last accepted step; `None` before the first one.
    last_step_ms: Option<u64>,
}

impl PositionTracker {
    /// Start at `position` with no step history.
    pub fn new(position: i32) -> Self {
        Self {
            position,
            last_step_ms: None,
        }
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    /// Reset to `position` and forget the step history.
    pub fn reset(&mut self, position: i32) {
        *self = Self::new(position);
    }

    /// Step magnitude for a step taken at `now_ms`, without recording it.
    pub fn magnitude(&self, mode: PositionMode, now_ms: u64) -> u32 {
        match (mode, self.last_step_ms) {
            (PositionMode::Linear, _) | (PositionMode::Dynamic, None) => 1,
            (PositionMode::Dynamic, Some(last)) => dynamic_magnitude(now_ms.saturating_sub(last)),
        }
    }

    /// Apply one decoded step and return the new position.
    ///
    /// The step timestamp is recorded in every mode, so switching to
    /// [`Dynamic`](PositionMode::Dynamic) mid-session scales from the real
    /// previous step.
    pub fn step(
        &mut self,
        direction: Direction,
        mode: PositionMode,
        min: i32,
        max: i32,
        now_ms: u64,
    ) -> i32 {
        let magnitude = self.magnitude(mode, now_ms);
        self.last_step_ms = Some(now_ms);
        self.position = wrap_position(
            self.position,
            direction.sign() * i64::from(magnitude),
            min,
            max,
        );

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "step {} x{} -> position {}",
            direction,
            magnitude,
            self.position
        );

        self.position
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::Direction::{Clockwise, CounterClockwise};

    // ── Wrapping ─────────────────────────────────────────────────────

    #[test]
    fn wraps_forward_and_backward_over_small_range() {
        let mut tracker = PositionTracker::new(0);
        let seen: std::vec::Vec<i32> = (0..4)
            .map(|_| tracker.step(Clockwise, PositionMode::Linear, 0, 3, 0))
            .collect();
        assert_eq!(seen, [1, 2, 3, 0]);

        assert_eq!(tracker.step(CounterClockwise, PositionMode::Linear, 0, 3, 0), 3);
    }

    #[test]
    fn wraps_with_negative_bounds() {
        assert_eq!(wrap_position(-5, -1, -5, 5), 5);
        assert_eq!(wrap_position(5, 1, -5, 5), -5);
        assert_eq!(wrap_position(-1, 1, -5, 5), 0);
    }

    #[test]
    fn wrap_handles_multi_span_overshoot() {
        // Range of 4: moving by 4k + r lands r away.
        assert_eq!(wrap_position(1, 4 * 7 + 2, 0, 3), 3);
        assert_eq!(wrap_position(1, -(4 * 7 + 2), 0, 3), 3);
        assert_eq!(wrap_position(0, 1_000_001, 0, 3), 1);
    }

    #[test]
    fn position_never_leaves_range() {
        let (min, max) = (-3, 6);
        let mut position = min;
        for delta in -50i64..=50 {
            position = wrap_position(position, delta * 3 + 1, min, max);
            assert!(
                (min..=max).contains(&position),
                "delta {} left range: {}",
                delta,
                position
            );
        }
    }

    #[test]
    fn full_i32_range_does_not_overflow() {
        assert_eq!(wrap_position(i32::MAX, 1, i32::MIN, i32::MAX), i32::MIN);
        assert_eq!(wrap_position(i32::MIN, -1, i32::MIN, i32::MAX), i32::MAX);
    }

    #[test]
    fn single_value_range_stays_put() {
        let mut tracker = PositionTracker::new(7);
        assert_eq!(tracker.step(Clockwise, PositionMode::Linear, 7, 7, 0), 7);
        assert_eq!(tracker.step(CounterClockwise, PositionMode::Dynamic, 7, 7, 1), 7);
    }

    // ── Dynamic scaling ──────────────────────────────────────────────

    #[test]
    fn dynamic_magnitude_is_non_increasing_and_at_least_one() {
        let mut previous = u32::MAX;
        for elapsed in 0..200 {
            let magnitude = dynamic_magnitude(elapsed);
            assert!(magnitude >= 1);
            assert!(magnitude <= previous, "increased at {} ms", elapsed);
            previous = magnitude;
        }
    }

    #[test]
    fn dynamic_magnitude_values() {
        assert_eq!(dynamic_magnitude(0), 5);
        assert_eq!(dynamic_magnitude(5), 3);
        assert_eq!(dynamic_magnitude(12), 2);
        assert_eq!(dynamic_magnitude(16), 1);
        assert_eq!(dynamic_magnitude(80), 1);
        assert_eq!(dynamic_magnitude(u64::MAX), 1);
    }

    #[test]
    fn first_dynamic_step_has_magnitude_one() {
        let mut tracker = PositionTracker::new(0);
        assert_eq!(tracker.step(Clockwise, PositionMode::Dynamic, 0, 100, 1_000), 1);
    }

    #[test]
    fn fast_dynamic_steps_jump_further() {
        let mut tracker = PositionTracker::new(0);
        tracker.step(Clockwise, PositionMode::Dynamic, 0, 100, 1_000);
        let after = tracker.step(Clockwise, PositionMode::Dynamic, 0, 100, 1_005);
        assert!(after - 1 >= 2, "delta was {}", after - 1);
    }

    #[test]
    fn slow_dynamic_steps_move_by_one() {
        let mut tracker = PositionTracker::new(0);
        tracker.step(Clockwise, PositionMode::Dynamic, 0, 100, 1_000);
        assert_eq!(tracker.step(Clockwise, PositionMode::Dynamic, 0, 100, 1_080), 2);
    }

    #[test]
    fn linear_steps_still_record_timestamp() {
        let mut tracker = PositionTracker::new(0);
        tracker.step(Clockwise, PositionMode::Linear, 0, 100, 1_000);
        assert_eq!(tracker.magnitude(PositionMode::Dynamic, 1_000), 5);
    }

    #[test]
    fn clock_going_backwards_counts_as_no_elapsed_time() {
        let mut tracker = PositionTracker::new(0);
        tracker.step(Clockwise, PositionMode::Dynamic, 0, 100, 1_000);
        assert_eq!(tracker.magnitude(PositionMode::Dynamic, 900), 5);
    }

    #[test]
    fn reset_clears_history() {
        let mut tracker = PositionTracker::new(0);
        tracker.step(Clockwise, PositionMode::Dynamic, 0, 100, 1_000);
        tracker.reset(42);
        assert_eq!(tracker.position(), 42);
        assert_eq!(tracker.magnitude(PositionMode::Dynamic, 1_000), 1);
    }
}
