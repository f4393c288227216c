//! Polled driver for mechanical rotary encoders with a push button.
//!
//! This crate decodes the A/B quadrature lines of a detented rotary encoder
//! into step events and a bounded, wrapping position, and the encoder's
//! switch line into click and long-press events. It is designed for a
//! bare-metal main loop: nothing is interrupt driven, the application calls
//! [`RotaryEncoder::poll`] often enough to see every quadrature state.
//!
//! # Architecture
//!
//! Leaf-first:
//!
//! - **[`Edge`]** — classifies one line between two samples.
//! - **[`DecodeMode`]** — turns A/B edges into [`Direction`]s at ×1, ×2 or
//!   ×4 resolution.
//! - **[`PositionTracker`]** — wraps the position inside
//!   `[min_position, max_position]`, optionally scaling fast steps
//!   ([`PositionMode::Dynamic`]).
//! - **[`ButtonMachine`]** — debounces the switch and tells a click from a
//!   long press.
//! - **[`RotaryEncoder`]** (public entry point) — owns pins, config and
//!   state, runs one cycle per poll and calls the registered handlers.
//!
//! Hardware access goes through [`embedded_hal`] traits plus the
//! crate's [`Clock`], so the driver runs on any HAL and under test with
//! simulated pins.
//!
//! # Quick start
//!
//! ```ignore
//! use quadrature_knob::{DecodeMode, EncoderConfig, EncoderPins, RotaryEncoder};
//!
//! let config = EncoderConfig {
//!     decode_mode: DecodeMode::X4,
//!     min_position: 0,
//!     max_position: 23,
//!     ..EncoderConfig::default()
//! };
//!
//! let mut on_rotation = |direction, position| { /* ... */ };
//! let mut encoder = RotaryEncoder::new(pins, clock, delay, config)?;
//! encoder.register_rotation_callback(Some(&mut on_rotation));
//!
//! loop {
//!     encoder.poll()?;
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`** — [`defmt::Format`] implementations on public types and
//!   trace/debug logging of steps and button events.
//! - **`embassy`** — [`EmbassyClock`], a [`Clock`] backed by
//!   `embassy_time::Instant`.

#![cfg_attr(not(test), no_std)]

pub use button::{ButtonEvent, ButtonMachine, ButtonState};
#[cfg(feature = "embassy")]
pub use clock::EmbassyClock;
pub use clock::Clock;
pub use edge::Edge;
pub use encoder::{ButtonHandler, EncoderConfig, EncoderPins, RotaryEncoder, RotationHandler};
pub use error::EncoderError;
pub use position::{dynamic_magnitude, wrap_position, PositionMode, PositionTracker};
pub use quadrature::{DecodeMode, Direction, Steps, MAX_STEPS_PER_SAMPLE};

mod button;
mod clock;
mod edge;
mod encoder;
mod error;
mod position;
mod quadrature;
#[cfg(test)]
mod sim;
pub mod timing;
