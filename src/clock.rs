//! Millisecond time source.
//!
//! The driver reads the clock to scale steps in
//! [`Dynamic`](crate::PositionMode::Dynamic) mode and to time long presses.
//! Readings must be monotonically non-decreasing; counter wraparound is not
//! handled, which is why the trait works in `u64`.

/// A monotonic millisecond counter.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&mut self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_ms(&mut self) -> u64 {
        (**self).now_ms()
    }
}

/// [`Clock`] backed by the Embassy time driver.
///
/// Requires the `embassy` feature and a time driver linked into the
/// final binary (e.g. `embassy-rp` with `time-driver`).
#[cfg(feature = "embassy")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

#[cfg(feature = "embassy")]
impl Clock for EmbassyClock {
    fn now_ms(&mut self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}
