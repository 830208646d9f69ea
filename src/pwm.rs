use embedded_hal::PwmPin;
use rp2040_hal::pwm::{FreeRunning, Slice, SliceId, ValidSliceMode};

use crate::{music, tone::TimerBackend};

/// System clock the PWM slices run from after `init_clocks_and_plls`.
pub const SYS_CLOCK_HZ: u32 = 125_000_000;
/// Integer divider applied to the system clock for every tone slice.
pub const CLOCK_DIVIDER: u8 = 64;
/// Rate the PWM counter advances at.
pub const TONE_CLOCK_HZ: u32 = SYS_CLOCK_HZ / CLOCK_DIVIDER as u32;

/// Tone backend on channel A of an RP2040 PWM slice.
///
/// The slice runs phase-correct, counting up to TOP and back down, so a
/// compare count `n` gives a period of `2 * (n + 1)` divided clocks. That is
/// the same pitch a toggle-on-compare timer makes with the same count.
pub struct PwmTone<I>
where
    I: SliceId,
    FreeRunning: ValidSliceMode<I>,
{
    pwm: Slice<I, FreeRunning>,
}

impl<I> PwmTone<I>
where
    I: SliceId,
    FreeRunning: ValidSliceMode<I>,
{
    /// Wrap a slice whose channel A has already been routed to a speaker pin.
    pub fn new(pwm: Slice<I, FreeRunning>) -> Self {
        Self { pwm }
    }

    /// Compare count for a tone of `hz` on this backend.
    pub fn freq(hz: f32) -> u16 {
        music::toggle_count(TONE_CLOCK_HZ, hz)
    }

    /// Give the slice back.
    pub fn free(self) -> Slice<I, FreeRunning> {
        self.pwm
    }
}

impl<I> TimerBackend for PwmTone<I>
where
    I: SliceId,
    FreeRunning: ValidSliceMode<I>,
{
    fn configure_idle(&mut self) {
        self.pwm.disable();
        self.pwm.set_ph_correct();
        self.pwm.set_div_int(CLOCK_DIVIDER);
        self.pwm.set_div_frac(0);
        self.pwm.channel_a.set_duty(0);
        self.pwm.set_counter(0);
        self.pwm.enable();
    }

    fn connect(&mut self, count: u16) {
        // High for (TOP + 1) / 2 of every TOP + 1 steps.
        let duty = ((count as u32 + 1) / 2) as u16;
        self.pwm.set_top(count);
        self.pwm.channel_a.set_duty(duty);
    }

    fn disconnect(&mut self) {
        self.pwm.channel_a.set_duty(0);
        self.pwm.set_counter(0);
    }
}
