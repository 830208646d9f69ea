//! Musical note declarations and pitch helpers.

use libm::roundf;

/// 4th octave C note
pub const C: f32 = 261.63;
/// 4th octave D note
pub const D: f32 = 293.66;
/// 4th octave E note
pub const E: f32 = 329.63;
/// 4th octave F note
pub const F: f32 = 349.23;
/// 4th octave G note
pub const G: f32 = 392.00;
/// 4th octave A note
pub const A: f32 = 440.00;
/// 4th octave B note
pub const B: f32 = 493.88;
/// Rest note
pub const REST: f32 = 0.0;

/// Compare count that makes a toggle-on-compare timer clocked at `clock_hz`
/// produce a square wave of `hz`.
///
/// The output toggles every `count + 1` timer clocks, so one period is
/// `2 * (count + 1)` clocks. Results saturate to the `u16` range. A rest
/// (zero, negative or non-finite `hz`) maps to the lowest pitch.
pub fn toggle_count(clock_hz: u32, hz: f32) -> u16 {
    if !(hz > 0.0) || !hz.is_finite() {
        return u16::MAX;
    }
    let half_periods = roundf(clock_hz as f32 / (2.0 * hz));
    if half_periods <= 1.0 {
        0
    } else if half_periods > u16::MAX as f32 {
        u16::MAX
    } else {
        half_periods as u16 - 1
    }
}

/// Frequency produced by `count` on a toggle timer clocked at `clock_hz`.
pub fn toggle_frequency(clock_hz: u32, count: u16) -> f32 {
    clock_hz as f32 / (2.0 * (count as f32 + 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 16 MHz / 8, the classic AVR beep clock.
    const CLOCK: u32 = 2_000_000;

    #[test]
    fn test_toggle_count_a4() {
        // 2 MHz / (2 * 440) = 2272.7 -> 2273 half periods
        assert_eq!(toggle_count(CLOCK, A), 2272);
    }

    #[test]
    fn test_toggle_count_round_trips_within_a_cent() {
        for hz in [C, D, E, F, G, A, B] {
            let back = toggle_frequency(CLOCK, toggle_count(CLOCK, hz));
            assert!((back - hz).abs() / hz < 0.0006, "{} -> {}", hz, back);
        }
    }

    #[test]
    fn test_toggle_count_saturates() {
        assert_eq!(toggle_count(CLOCK, 1.0), u16::MAX);
        assert_eq!(toggle_count(CLOCK, 10_000_000.0), 0);
        assert_eq!(toggle_count(CLOCK, REST), u16::MAX);
        assert_eq!(toggle_count(CLOCK, -5.0), u16::MAX);
        assert_eq!(toggle_count(CLOCK, f32::NAN), u16::MAX);
        assert_eq!(toggle_count(CLOCK, f32::INFINITY), u16::MAX);
    }

    #[test]
    fn test_lower_count_is_higher_pitch() {
        assert!(toggle_count(CLOCK, C) > toggle_count(CLOCK, B));
        assert!(toggle_frequency(CLOCK, 100) > toggle_frequency(CLOCK, 200));
    }
}
