//! Fixed timing policy for step scaling and the push button.
//!
//! These values are part of the driver's behaviour, not client state: the
//! button thresholds are tuned for common detented encoders with an
//! integrated switch, and the dynamic-step window is tuned for a hand
//! turning a knob.

// ---------------------------------------------------------------------------
// Push button
// ---------------------------------------------------------------------------

/// Hold time after which an accepted press is reported as a long press.
pub const LONG_PRESS_MS: u64 = 500;

/// Delay between consecutive samples of the switch line while a press
/// sequence is in progress.
pub const SAMPLE_INTERVAL_MS: u32 = 1;

/// Consecutive identical samples needed to accept a level change on the
/// switch line. Applies to press acceptance, glitch rejection and the final
/// release guard.
pub const DEBOUNCE_STABLE_READS: u8 = 8;

// ---------------------------------------------------------------------------
// Dynamic step scaling
// ---------------------------------------------------------------------------

/// Steps arriving closer together than this are scaled up.
pub const DYNAMIC_WINDOW_MS: u64 = 20;

/// Divides the remaining window time to get the step magnitude.
pub const DYNAMIC_DIVISOR: u64 = 4;
