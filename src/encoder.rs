//! Polled rotary encoder with push button.
//!
//! [`RotaryEncoder`] owns the three input lines, the configuration and all
//! runtime state for one physical encoder. Each call to
//! [`poll()`](RotaryEncoder::poll) runs one complete cycle:
//!
//! 1. Sample A and B, classify edges against the previous sample pair.
//! 2. Decode steps for the configured [`DecodeMode`].
//! 3. Move the wrapped position and call the rotation handler per step.
//! 4. Sample the switch. If it is active, run the press sequence to
//!    completion, calling the click or long-press handler once.
//!
//! Step 4 blocks for the duration of the press (up to
//! [`LONG_PRESS_MS`](crate::timing::LONG_PRESS_MS) plus debounce, or until
//! release). [`poll_async()`](RotaryEncoder::poll_async) runs the same
//! cycle but awaits between samples.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, PinState};
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

use crate::button::{ButtonEvent, ButtonMachine};
use crate::clock::Clock;
use crate::edge::Edge;
use crate::error::EncoderError;
use crate::position::{PositionMode, PositionTracker};
use crate::quadrature::{DecodeMode, Direction};
use crate::timing::SAMPLE_INTERVAL_MS;

/// Handler called once per decoded step with the direction and the new
/// position.
pub type RotationHandler<'a> = &'a mut dyn FnMut(Direction, i32);

/// Handler called once per click or long press.
pub type ButtonHandler<'a> = &'a mut dyn FnMut();

/// The three input lines of an encoder.
///
/// All pins must already be configured as inputs with pull-ups enabled
/// (e.g. `Input::new(pin, Pull::Up)` on Embassy). The switch is active-low.
pub struct EncoderPins<A, B, SW> {
    pub a: A,
    pub b: B,
    pub switch: SW,
}

/// Encoder configuration.
///
/// `max_position >= min_position` must hold whenever
/// [`poll()`](RotaryEncoder::poll) runs. It is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    pub decode_mode: DecodeMode,
    pub position_mode: PositionMode,
    /// Lowest position (inclusive). Also the position after configuration.
    pub min_position: i32,
    /// Highest position (inclusive).
    pub max_position: i32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            decode_mode: DecodeMode::X2,
            position_mode: PositionMode::Linear,
            min_position: 0,
            max_position: 100,
        }
    }
}

/// Polled driver for one rotary encoder with integrated push button.
///
/// # Type parameters
/// * `A`, `B`, `SW` — quadrature and switch inputs sharing one error type
/// * `C` — millisecond [`Clock`]
/// * `D` — delay; [`embedded_hal::delay::DelayNs`] for
///   [`poll()`](Self::poll), [`embedded_hal_async::delay::DelayNs`] for
///   [`poll_async()`](Self::poll_async)
///
/// Handlers are borrowed for `'a`; the caller keeps ownership.
///
/// # Example
///
/// ```ignore
/// use embassy_rp::gpio::{Input, Pull};
/// use embassy_time::Delay;
/// use quadrature_knob::{EmbassyClock, EncoderConfig, EncoderPins, RotaryEncoder};
///
/// let mut on_rotation = |dir, pos| defmt::info!("{} -> {}", dir, pos);
/// let mut on_click = || defmt::info!("click");
///
/// let pins = EncoderPins {
///     a: Input::new(p.PIN_2, Pull::Up),
///     b: Input::new(p.PIN_3, Pull::Up),
///     switch: Input::new(p.PIN_4, Pull::Up),
/// };
/// let mut encoder = RotaryEncoder::new(pins, EmbassyClock, Delay, EncoderConfig::default())?;
/// encoder.register_rotation_callback(Some(&mut on_rotation));
/// encoder.register_click_callback(Some(&mut on_click));
///
/// loop {
///     encoder.poll()?;
/// }
/// ```
pub struct RotaryEncoder<'a, A, B, SW, C, D> {
    pins: EncoderPins<A, B, SW>,
    clock: C,
    delay: D,
    config: EncoderConfig,

    last_a: PinState,
    last_b: PinState,
    tracker: PositionTracker,
    button: ButtonMachine,

    on_rotation: Option<RotationHandler<'a>>,
    on_click: Option<ButtonHandler<'a>>,
    on_long_press: Option<ButtonHandler<'a>>,
}

impl<'a, A, B, SW, C, D> RotaryEncoder<'a, A, B, SW, C, D>
where
    A: InputPin,
    B: InputPin<Error = A::Error>,
    SW: InputPin<Error = A::Error>,
    C: Clock,
{
    /// Configure an encoder.
    ///
    /// Takes the current A/B levels as the reference sample, sets the
    /// position to `config.min_position` and leaves all handlers unset.
    ///
    /// # Errors
    /// * [`EncoderError::Pin`] if reading A or B fails
    pub fn new(
        mut pins: EncoderPins<A, B, SW>,
        clock: C,
        delay: D,
        config: EncoderConfig,
    ) -> Result<Self, EncoderError<A::Error>> {
        let last_a = PinState::from(pins.a.is_high()?);
        let last_b = PinState::from(pins.b.is_high()?);

        #[cfg(feature = "defmt")]
        defmt::debug!("encoder configured: {}", config);

        Ok(Self {
            pins,
            clock,
            delay,
            config,
            last_a,
            last_b,
            tracker: PositionTracker::new(config.min_position),
            button: ButtonMachine::new(),
            on_rotation: None,
            on_click: None,
            on_long_press: None,
        })
    }

    // -----------------------------------------------------------------------
    // Polling
    // -----------------------------------------------------------------------

    /// Run one poll cycle, blocking through any press sequence.
    ///
    /// With no line change and the switch released this returns without
    /// calling any handler.
    ///
    /// # Errors
    /// * [`EncoderError::Pin`] if any line read fails. A failure during a
    ///   press sequence leaves the sequence pending; the next poll resumes it.
    pub fn poll(&mut self) -> Result<(), EncoderError<A::Error>>
    where
        D: DelayNs,
    {
        self.scan_rotation()?;

        while self.sample_button()? {
            DelayNs::delay_ms(&mut self.delay, SAMPLE_INTERVAL_MS);
        }

        Ok(())
    }

    /// [`poll()`](Self::poll) for cooperative executors: identical cycle,
    /// but the waits between switch samples are awaited.
    pub async fn poll_async(&mut self) -> Result<(), EncoderError<A::Error>>
    where
        D: AsyncDelayNs,
    {
        self.scan_rotation()?;

        while self.sample_button()? {
            AsyncDelayNs::delay_ms(&mut self.delay, SAMPLE_INTERVAL_MS).await;
        }

        Ok(())
    }

    fn scan_rotation(&mut self) -> Result<(), EncoderError<A::Error>> {
        let a = PinState::from(self.pins.a.is_high()?);
        let b = PinState::from(self.pins.b.is_high()?);

        let edge_a = Edge::classify(self.last_a, a);
        let edge_b = Edge::classify(self.last_b, b);
        self.last_a = a;
        self.last_b = b;

        if !edge_a.is_edge() && !edge_b.is_edge() {
            return Ok(());
        }

        let steps = self.config.decode_mode.decode(edge_a, edge_b, a, b);
        if steps.is_empty() {
            return Ok(());
        }

        let now_ms = self.clock.now_ms();
        for direction in steps {
            let position = self.tracker.step(
                direction,
                self.config.position_mode,
                self.config.min_position,
                self.config.max_position,
                now_ms,
            );

            if let Some(handler) = self.on_rotation.as_mut() {
                handler(direction, position);
            }
        }

        Ok(())
    }

    /// Take one switch sample. Returns `true` while a press sequence is in
    /// progress.
    fn sample_button(&mut self) -> Result<bool, EncoderError<A::Error>> {
        let pressed = self.pins.switch.is_low()?;
        if !pressed && self.button.is_idle() {
            return Ok(false);
        }

        let now_ms = self.clock.now_ms();
        if let Some(event) = self.button.advance(pressed, now_ms) {
            self.dispatch_button(event);
        }

        Ok(!self.button.is_idle())
    }

    fn dispatch_button(&mut self, event: ButtonEvent) {
        #[cfg(feature = "defmt")]
        defmt::debug!("button: {}", event);

        let handler = match event {
            ButtonEvent::Click => self.on_click.as_mut(),
            ButtonEvent::LongPress => self.on_long_press.as_mut(),
        };

        if let Some(handler) = handler {
            handler();
        }
    }
}

impl<'a, A, B, SW, C, D> RotaryEncoder<'a, A, B, SW, C, D> {
    // -----------------------------------------------------------------------
    // Handler registration
    // -----------------------------------------------------------------------

    /// Replace the rotation handler. `None` disables rotation dispatch.
    pub fn register_rotation_callback(&mut self, handler: Option<RotationHandler<'a>>) {
        self.on_rotation = handler;
    }

    /// Replace the click handler. `None` disables click dispatch.
    pub fn register_click_callback(&mut self, handler: Option<ButtonHandler<'a>>) {
        self.on_click = handler;
    }

    /// Replace the long-press handler. `None` disables long-press dispatch.
    pub fn register_long_press_callback(&mut self, handler: Option<ButtonHandler<'a>>) {
        self.on_long_press = handler;
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Takes effect on the next poll.
    pub fn set_decode_mode(&mut self, mode: DecodeMode) {
        self.config.decode_mode = mode;
    }

    /// Takes effect on the next poll.
    pub fn set_position_change_mode(&mut self, mode: PositionMode) {
        self.config.position_mode = mode;
    }

    /// Set the lowest position. Counter-clockwise rotation past it wraps to
    /// the maximum.
    ///
    /// The current position is not moved; it is brought back in range by
    /// the next step. Keep `min_position <= max_position`.
    pub fn set_min_position(&mut self, min_position: i32) {
        self.config.min_position = min_position;
    }

    /// Set the highest position. Clockwise rotation past it wraps to the
    /// minimum.
    ///
    /// The current position is not moved; it is brought back in range by
    /// the next step. Keep `min_position <= max_position`.
    pub fn set_max_position(&mut self, max_position: i32) {
        self.config.max_position = max_position;
    }

    pub fn decode_mode(&self) -> DecodeMode {
        self.config.decode_mode
    }

    pub fn position_change_mode(&self) -> PositionMode {
        self.config.position_mode
    }

    pub fn min_position(&self) -> i32 {
        self.config.min_position
    }

    pub fn max_position(&self) -> i32 {
        self.config.max_position
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Current wrapped position.
    pub fn position(&self) -> i32 {
        self.tracker.position()
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
