use core::cell::RefCell;

use critical_section::Mutex;

use crate::tone::{Output, TimerBackend, ToneChannel};

/// A [`ToneChannel`] that the application and the tick interrupt can both reach.
///
/// Meant to live in a `static`, one per speaker pin. Every operation runs
/// inside a critical section, so a tick can never land halfway through a
/// start or stop, on either core. Until a channel is installed all
/// operations do nothing.
pub struct SharedToneChannel<B> {
    channel: Mutex<RefCell<Option<ToneChannel<B>>>>,
}

impl<B> SharedToneChannel<B>
where
    B: TimerBackend,
{
    /// An empty slot.
    pub const fn new() -> Self {
        Self {
            channel: Mutex::new(RefCell::new(None)),
        }
    }

    /// Put `channel` in the slot, handing back whatever was there before.
    pub fn install(&self, channel: ToneChannel<B>) -> Option<ToneChannel<B>> {
        critical_section::with(|cs| self.channel.borrow_ref_mut(cs).replace(channel))
    }

    /// Take the channel back out of the slot.
    pub fn take(&self) -> Option<ToneChannel<B>> {
        critical_section::with(|cs| self.channel.borrow_ref_mut(cs).take())
    }

    /// Run `f` on the installed channel with the lock held.
    pub fn with<R>(&self, f: impl FnOnce(&mut ToneChannel<B>) -> R) -> Option<R> {
        critical_section::with(|cs| self.channel.borrow_ref_mut(cs).as_mut().map(f))
    }

    /// See [`ToneChannel::start`].
    pub fn start(&self, count: u16) {
        self.with(|ch| ch.start(count));
    }

    /// See [`ToneChannel::start_for`].
    pub fn start_for(&self, count: u16, ticks: u8) {
        self.with(|ch| ch.start_for(count, ticks));
    }

    /// See [`ToneChannel::tick`].
    pub fn tick(&self) {
        self.with(|ch| ch.tick());
    }

    /// See [`ToneChannel::stop`].
    pub fn stop(&self) {
        self.with(|ch| ch.stop());
    }

    /// Ticks left on the installed channel, 0 if there is none.
    pub fn remaining_ticks(&self) -> u8 {
        self.with(|ch| ch.remaining_ticks()).unwrap_or(0)
    }

    /// Output state of the installed channel, silent if there is none.
    pub fn output(&self) -> Output {
        self.with(|ch| ch.output()).unwrap_or(Output::Silent)
    }

    /// Whether the installed channel is driving its pin.
    pub fn is_sounding(&self) -> bool {
        self.output() == Output::Sounding
    }
}

impl<B> Default for SharedToneChannel<B>
where
    B: TimerBackend,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::tests::MockTimer;

    #[test]
    fn test_empty_slot_is_inert() {
        let shared: SharedToneChannel<MockTimer> = SharedToneChannel::new();
        shared.start_for(100, 3);
        shared.tick();
        shared.stop();
        assert_eq!(shared.remaining_ticks(), 0);
        assert_eq!(shared.output(), Output::Silent);
        assert!(shared.with(|_| ()).is_none());
    }

    #[test]
    fn test_static_slot_counts_down() {
        static PIN: SharedToneChannel<MockTimer> = SharedToneChannel::new();
        assert!(PIN.install(ToneChannel::new(MockTimer::default())).is_none());

        PIN.start_for(1000, 3);
        PIN.tick();
        PIN.tick();
        assert!(PIN.is_sounding());
        assert_eq!(PIN.remaining_ticks(), 1);
        PIN.tick();
        assert!(!PIN.is_sounding());
        assert_eq!(PIN.with(|ch| ch.backend().connected), Some(false));
    }

    #[test]
    fn test_two_slots_are_independent() {
        let pin1 = SharedToneChannel::new();
        let pin2 = SharedToneChannel::new();
        pin1.install(ToneChannel::new(MockTimer::default()));
        pin2.install(ToneChannel::new(MockTimer::default()));

        pin1.start_for(500, 1);
        pin2.start(700);
        pin1.tick();
        pin2.tick();
        assert!(!pin1.is_sounding());
        assert!(pin2.is_sounding());
        assert_eq!(pin2.with(|ch| ch.backend().count), Some(Some(700)));
    }

    #[test]
    fn test_install_replaces_and_take_empties() {
        let shared = SharedToneChannel::new();
        shared.install(ToneChannel::new(MockTimer::default()));
        shared.start(42);

        let old = shared
            .install(ToneChannel::new(MockTimer::default()))
            .map(|ch| ch.release());
        assert!(old.is_some_and(|timer| timer.count == Some(42) && !timer.connected));
        assert!(!shared.is_sounding());

        assert!(shared.take().is_some());
        assert!(shared.take().is_none());
    }
}
