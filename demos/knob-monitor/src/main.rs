//! Knob monitor
//!
//! Demonstrates the quadrature-knob crate on the Raspberry Pi Pico 2. Polls
//! one rotary encoder with push button from the main task and logs every
//! step, click and long press via defmt.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | ENC A     | GP2        | Pull-up enabled              |
//! | ENC B     | GP3        | Pull-up enabled              |
//! | ENC SW    | GP4        | Active-low, pull-up enabled  |
//!
//! Click cycles the decode resolution, long press toggles dynamic
//! (accelerated) stepping.

#![no_std]
#![no_main]

use core::cell::Cell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use quadrature_knob::{
    DecodeMode, Direction, EmbassyClock, EncoderConfig, EncoderPins, PositionMode, RotaryEncoder,
};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

/// Time between polls. Must be well below the shortest quadrature state
/// at the fastest expected turning speed.
const POLL_PERIOD: Duration = Duration::from_millis(1);

fn next_decode_mode(mode: DecodeMode) -> DecodeMode {
    match mode {
        DecodeMode::X1 => DecodeMode::X2,
        DecodeMode::X2 => DecodeMode::X4,
        DecodeMode::X4 => DecodeMode::X1,
    }
}

fn toggled(mode: PositionMode) -> PositionMode {
    match mode {
        PositionMode::Linear => PositionMode::Dynamic,
        PositionMode::Dynamic => PositionMode::Linear,
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // --- Encoder lines (GP2 = A, GP3 = B, GP4 = switch) ---
    let pins = EncoderPins {
        a: Input::new(p.PIN_2, Pull::Up),
        b: Input::new(p.PIN_3, Pull::Up),
        switch: Input::new(p.PIN_4, Pull::Up),
    };

    let config = EncoderConfig {
        decode_mode: DecodeMode::X4,
        min_position: 0,
        max_position: 99,
        ..EncoderConfig::default()
    };

    // Handlers only record what happened; the loop below applies mode
    // changes, since the encoder is mutably borrowed while polling.
    let clicked = Cell::new(false);
    let long_pressed = Cell::new(false);

    let mut on_rotation = |direction: Direction, position: i32| {
        info!("{} -> {}", direction, position);
    };
    let mut on_click = || clicked.set(true);
    let mut on_long_press = || long_pressed.set(true);

    // Infallible GPIO: new() and poll() cannot fail on embassy-rp.
    let mut encoder = unwrap!(RotaryEncoder::new(pins, EmbassyClock, Delay, config));
    encoder.register_rotation_callback(Some(&mut on_rotation));
    encoder.register_click_callback(Some(&mut on_click));
    encoder.register_long_press_callback(Some(&mut on_long_press));

    info!("Knob monitor started: {}", encoder.config());

    // Main loop: poll, react to button gestures, sleep, repeat.
    loop {
        unwrap!(encoder.poll_async().await);

        if clicked.replace(false) {
            let mode = next_decode_mode(encoder.decode_mode());
            encoder.set_decode_mode(mode);
            info!("Click: decode mode {}", mode);
        }

        if long_pressed.replace(false) {
            let mode = toggled(encoder.position_change_mode());
            encoder.set_position_change_mode(mode);
            info!("Long press: position mode {}", mode);
        }

        Timer::after(POLL_PERIOD).await;
    }
}
