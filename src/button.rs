//! Push-button debounce and click / long-press classification.
//!
//! [`ButtonMachine`] is advanced one sample at a time with the current
//! switch level and clock reading. It never sleeps; the caller decides how
//! long to wait between samples. [`RotaryEncoder::poll`] samples it every
//! [`SAMPLE_INTERVAL_MS`] until a press sequence completes.
//!
//! ```text
//!            active            N active            released / held
//!   Idle ──────────▶ Debouncing ────────▶ PressedWaiting ──────────▶ ReleaseGuard
//!    ▲                   │                  (Click / LongPress)            │
//!    │   N inactive      │                                                 │
//!    ├───────────────────┘                                  N inactive     │
//!    └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `N` is [`DEBOUNCE_STABLE_READS`].
//!
//! [`RotaryEncoder::poll`]: crate::RotaryEncoder::poll
//! [`SAMPLE_INTERVAL_MS`]: crate::timing::SAMPLE_INTERVAL_MS

use crate::timing::{DEBOUNCE_STABLE_READS, LONG_PRESS_MS};

/// Completed button gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Released before [`LONG_PRESS_MS`].
    Click,
    /// Still held [`LONG_PRESS_MS`] after the press was accepted.
    LongPress,
}

/// Phase of the press sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Line inactive, nothing in progress.
    Idle,
    /// Line went active; waiting for it to settle either way.
    Debouncing {
        /// Consecutive active samples so far.
        active_reads: u8,
        /// Consecutive inactive samples so far.
        inactive_reads: u8,
    },
    /// Press accepted; waiting for release or the long-press threshold.
    PressedWaiting {
        /// Clock reading when the press was accepted.
        accepted_at_ms: u64,
    },
    /// Event reported; waiting for a stable release.
    ReleaseGuard {
        /// Consecutive inactive samples so far.
        inactive_reads: u8,
    },
}

/// Debounce and gesture state machine for an active-low push button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMachine {
    state: ButtonState,
}

impl Default for ButtonMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonMachine {
    pub const fn new() -> Self {
        Self {
            state: ButtonState::Idle,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Returns `true` when no press sequence is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == ButtonState::Idle
    }

    /// Feed one sample.
    ///
    /// # Arguments
    /// * `pressed` — `true` when the switch line reads active (low)
    /// * `now_ms` — clock reading taken with the sample
    ///
    /// Returns the gesture completed by this sample, if any. Each accepted
    /// press yields exactly one event; a press that never settles yields
    /// none.
    pub fn advance(&mut self, pressed: bool, now_ms: u64) -> Option<ButtonEvent> {
        match self.state {
            ButtonState::Idle => {
                if pressed {
                    self.state = ButtonState::Debouncing {
                        active_reads: 1,
                        inactive_reads: 0,
                    };
                }
                None
            }

            ButtonState::Debouncing {
                active_reads,
                inactive_reads,
            } => {
                if pressed {
                    let active_reads = active_reads + 1;
                    self.state = if active_reads >= DEBOUNCE_STABLE_READS {
                        #[cfg(feature = "defmt")]
                        defmt::debug!("button: press accepted at {} ms", now_ms);
                        ButtonState::PressedWaiting {
                            accepted_at_ms: now_ms,
                        }
                    } else {
                        ButtonState::Debouncing {
                            active_reads,
                            inactive_reads: 0,
                        }
                    };
                } else {
                    let inactive_reads = inactive_reads + 1;
                    self.state = if inactive_reads >= DEBOUNCE_STABLE_READS {
                        #[cfg(feature = "defmt")]
                        defmt::debug!("button: glitch rejected");
                        ButtonState::Idle
                    } else {
                        ButtonState::Debouncing {
                            active_reads: 0,
                            inactive_reads,
                        }
                    };
                }
                None
            }

            ButtonState::PressedWaiting { accepted_at_ms } => {
                if !pressed {
                    self.state = ButtonState::ReleaseGuard { inactive_reads: 1 };
                    Some(ButtonEvent::Click)
                } else if now_ms.saturating_sub(accepted_at_ms) >= LONG_PRESS_MS {
                    self.state = ButtonState::ReleaseGuard { inactive_reads: 0 };
                    Some(ButtonEvent::LongPress)
                } else {
                    None
                }
            }

            ButtonState::ReleaseGuard { inactive_reads } => {
                let inactive_reads = if pressed { 0 } else { inactive_reads + 1 };
                self.state = if inactive_reads >= DEBOUNCE_STABLE_READS {
                    ButtonState::Idle
                } else {
                    ButtonState::ReleaseGuard { inactive_reads }
                };
                None
            }
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
