/// Register-level mechanism behind a [`ToneChannel`].
///
/// Implementations only move the hardware between its idle, sounding and
/// silent configurations. The duration countdown lives in [`ToneChannel`] and
/// is the same for every backend.
pub trait TimerBackend {
    /// Put the timer into its idle, non-generating mode.
    fn configure_idle(&mut self);

    /// Load `count` as the compare value and connect the toggle output to the pin.
    ///
    /// Counts wider than the backend's register are truncated, never rejected.
    fn connect(&mut self, count: u16);

    /// Disconnect the timer from the pin.
    fn disconnect(&mut self);
}

/// Whether a channel's timer is currently driving its pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Output {
    /// Timer disconnected, no tone.
    Silent,
    /// Timer toggling the pin.
    Sounding,
}

/// Square wave tone on one speaker pin.
pub struct ToneChannel<B> {
    backend: B,
    remaining_ticks: u8,
    output: Output,
}

impl<B> ToneChannel<B>
where
    B: TimerBackend,
{
    /// Take ownership of `backend` and leave it idle.
    pub fn new(mut backend: B) -> Self {
        backend.configure_idle();
        debug!("tone channel idle");
        Self {
            backend,
            remaining_ticks: 0,
            output: Output::Silent,
        }
    }

    /// Play a tone until [`stop`](Self::stop) or another start.
    ///
    /// # Arguments
    ///
    /// `count` - Timer compare value. Lower values give higher pitches.
    pub fn start(&mut self, count: u16) {
        self.start_for(count, 0);
    }

    /// Play a tone for `ticks` calls to [`tick`](Self::tick).
    ///
    /// A `ticks` of 0 sustains the tone. Any tone already playing is replaced.
    ///
    /// # Arguments
    ///
    /// `count` - Timer compare value. Lower values give higher pitches.
    ///
    /// `ticks` - Number of ticks before the tone silences itself.
    pub fn start_for(&mut self, count: u16, ticks: u8) {
        self.remaining_ticks = ticks;
        self.backend.connect(count);
        self.output = Output::Sounding;
        trace!("tone {=u16} for {=u8} ticks", count, ticks);
    }

    /// Advance the countdown. Call at a fixed rate from the tick source.
    pub fn tick(&mut self) {
        if self.remaining_ticks == 0 {
            return;
        }
        self.remaining_ticks -= 1;
        if self.remaining_ticks == 0 {
            self.backend.disconnect();
            self.output = Output::Silent;
            trace!("tone expired");
        }
    }

    /// Silence the channel now.
    pub fn stop(&mut self) {
        self.remaining_ticks = 0;
        self.backend.disconnect();
        self.output = Output::Silent;
        trace!("tone stopped");
    }

    /// Ticks left before a timed tone silences itself. 0 while sustaining or silent.
    pub fn remaining_ticks(&self) -> u8 {
        self.remaining_ticks
    }

    /// Current output state.
    pub fn output(&self) -> Output {
        self.output
    }

    /// Whether the timer is driving the pin.
    pub fn is_sounding(&self) -> bool {
        self.output == Output::Sounding
    }

    /// The backend this channel drives.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Give the backend back, leaving the pin silent.
    pub fn release(mut self) -> B {
        self.stop();
        self.backend
    }
}
