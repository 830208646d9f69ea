//! Square wave tones on the two speaker pins of an RP2040 handheld.
//!
//! Each speaker pin gets its own [`ToneChannel`]. A channel is started with a
//! timer compare count and an optional duration in ticks, and silences itself
//! once the tick source has called [`ToneChannel::tick`] that many times.
//! What drives the pin is a [`TimerBackend`], picked at build time:
//!
//! - `rp2040` feature: `PwmTone`, one PWM slice per pin.
//! - otherwise: [`Silent`], which keeps the countdown but makes no sound.
//!
//! # Examples
//!
//! The `duet` demo in [the demos folder](https://github.com/jngo102/thumby-rs/blob/master/demos)
//! plays a two voice tune with a timer alarm as the tick source.
//!
#![no_std]
#![deny(missing_docs)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(unused_qualifications)]
#![deny(rustdoc::broken_intra_doc_links)]

#[macro_use]
mod fmt;

pub mod music;
#[cfg(feature = "rp2040")]
mod pwm;
mod shared;
mod silent;
mod tone;

pub use shared::SharedToneChannel;
pub use silent::Silent;
pub use tone::{Output, TimerBackend, ToneChannel};

#[cfg(feature = "rp2040")]
pub use pwm::{PwmTone, CLOCK_DIVIDER, SYS_CLOCK_HZ, TONE_CLOCK_HZ};

#[cfg(feature = "rp2040")]
use rp2040_hal::{
    gpio::Pins,
    pac::{IO_BANK0, PADS_BANK0, PWM, RESETS, SIO},
    pwm::{Pwm5, Pwm6, Slices},
    Sio,
};

/// Backend behind speaker pin 1 (GPIO28, PWM6 A).
#[cfg(feature = "rp2040")]
pub type Pin1Timer = PwmTone<Pwm6>;
/// Backend behind speaker pin 2 (GPIO26, PWM5 A).
#[cfg(feature = "rp2040")]
pub type Pin2Timer = PwmTone<Pwm5>;

/// Backend behind speaker pin 1.
#[cfg(not(feature = "rp2040"))]
pub type Pin1Timer = Silent;
/// Backend behind speaker pin 2.
#[cfg(not(feature = "rp2040"))]
pub type Pin2Timer = Silent;

/// The two speaker pins.
pub struct Beeper {
    /// Speaker pin 1.
    pub pin1: ToneChannel<Pin1Timer>,
    /// Speaker pin 2.
    pub pin2: ToneChannel<Pin2Timer>,
}

#[cfg(feature = "rp2040")]
impl Beeper {
    /// Route both speaker pins to their PWM slices and leave them idle.
    ///
    /// Takes the peripherals by value, so the pins can only be claimed once.
    pub fn new(
        pwm: PWM,
        io_bank0: IO_BANK0,
        pads_bank0: PADS_BANK0,
        sio: SIO,
        resets: &mut RESETS,
    ) -> Self {
        let sio = Sio::new(sio);
        let pins = Pins::new(io_bank0, pads_bank0, sio.gpio_bank0, resets);

        let pwm_slices = Slices::new(pwm, resets);
        let mut pwm6 = pwm_slices.pwm6;
        pwm6.channel_a.output_to(pins.gpio28);
        let mut pwm5 = pwm_slices.pwm5;
        pwm5.channel_a.output_to(pins.gpio26);

        Self {
            pin1: ToneChannel::new(PwmTone::new(pwm6)),
            pin2: ToneChannel::new(PwmTone::new(pwm5)),
        }
    }
}

#[cfg(not(feature = "rp2040"))]
impl Beeper {
    /// Both pins on the silent backend.
    pub fn new() -> Self {
        Self {
            pin1: ToneChannel::new(Silent),
            pin2: ToneChannel::new(Silent),
        }
    }
}

#[cfg(not(feature = "rp2040"))]
impl Default for Beeper {
    fn default() -> Self {
        Self::new()
    }
}

impl Beeper {
    /// Advance both countdowns.
    pub fn tick(&mut self) {
        self.pin1.tick();
        self.pin2.tick();
    }

    /// Silence both pins.
    pub fn stop(&mut self) {
        self.pin1.stop();
        self.pin2.stop();
    }
}

#[cfg(all(test, not(feature = "rp2040")))]
mod tests {
    use super::*;

    #[test]
    fn test_beeper_pins_are_independent() {
        let mut beeper = Beeper::new();
        beeper.pin1.start_for(music::toggle_count(2_000_000, music::A), 2);
        beeper.pin2.start(music::toggle_count(2_000_000, music::E));

        beeper.tick();
        beeper.tick();
        assert!(!beeper.pin1.is_sounding());
        assert!(beeper.pin2.is_sounding());

        beeper.stop();
        assert!(!beeper.pin2.is_sounding());
    }
}
