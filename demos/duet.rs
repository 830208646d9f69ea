#![no_std]
#![no_main]

use core::cell::RefCell;

use cortex_m::{asm, delay::Delay};
use critical_section::Mutex;
use fugit::MicrosDurationU32;
// Ensure we halt the program on panic (if we don't mention this crate it won't
// be linked)
use panic_halt as _;

/// The linker will place this boot block at the start of our program image. We
/// need this to help the ROM bootloader get our code up and running.
#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

use rp2040_hal::{
    clocks,
    pac::{self, interrupt},
    timer::{Alarm, Alarm0, Timer},
    Clock, Watchdog,
};
use thumby_beep::{
    music::*, Beeper, Pin1Timer, Pin2Timer, SharedToneChannel, SYS_CLOCK_HZ,
};

const XTAL_FREQ_HZ: u32 = 12_000_000;

/// 60 ticks per second.
const TICK: MicrosDurationU32 = MicrosDurationU32::micros(16_667);
/// Ticks a melody note sounds for, out of a 500 ms beat.
const NOTE_TICKS: u8 = 24;
const BEAT_MS: u32 = 500;

const TWINKLE_TWINKLE: [f32; 48] = [
    C, C, G, G, A, A, G, REST,
    F, F, E, E, D, D, C, REST,
    G, G, F, F, E, E, D, REST,
    G, G, F, F, E, E, D, REST,
    C, C, G, G, A, A, G, REST,
    F, F, E, E, D, D, C, REST,
];

/// One drone note per phrase of the melody, an octave down.
const DRONE: [f32; 6] = [C / 2.0, F / 2.0, G / 2.0, G / 2.0, C / 2.0, F / 2.0];

static PIN1: SharedToneChannel<Pin1Timer> = SharedToneChannel::new();
static PIN2: SharedToneChannel<Pin2Timer> = SharedToneChannel::new();
static TICK_ALARM: Mutex<RefCell<Option<Alarm0>>> = Mutex::new(RefCell::new(None));

/// Entry point to our bare-metal application.
///
/// The `#[rp2040_hal::entry]` macro ensures the Cortex-M start-up code calls this function
/// as soon as all global variables and the spinlock are initialised.
#[rp2040_hal::entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().expect("Failed to take Peripherals singleton");
    let core = pac::CorePeripherals::take().expect("Failed to take core peripherals");
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    let clocks = clocks::init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .expect("Failed to initialize clocks");
    debug_assert_eq!(clocks.system_clock.freq().to_Hz(), SYS_CLOCK_HZ);

    let mut delay = Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());

    let Beeper { pin1, pin2 } = Beeper::new(
        pac.PWM,
        pac.IO_BANK0,
        pac.PADS_BANK0,
        pac.SIO,
        &mut pac.RESETS,
    );
    PIN1.install(pin1);
    PIN2.install(pin2);

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let mut alarm = timer.alarm_0().expect("Failed to claim alarm 0");
    alarm.schedule(TICK).expect("Failed to schedule tick");
    alarm.enable_interrupt();
    critical_section::with(|cs| TICK_ALARM.borrow_ref_mut(cs).replace(alarm));
    // SAFETY: the handler only touches state behind critical sections.
    unsafe { pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0) };

    for (phrase, notes) in TWINKLE_TWINKLE.chunks(8).enumerate() {
        PIN2.start(Pin2Timer::freq(DRONE[phrase]));
        for &note in notes {
            if note != REST {
                PIN1.start_for(Pin1Timer::freq(note), NOTE_TICKS);
            }
            delay.delay_ms(BEAT_MS);
        }
    }
    PIN2.stop();

    loop {
        asm::wfe();
    }
}

#[interrupt]
fn TIMER_IRQ_0() {
    critical_section::with(|cs| {
        if let Some(alarm) = TICK_ALARM.borrow_ref_mut(cs).as_mut() {
            alarm.clear_interrupt();
            let _ = alarm.schedule(TICK);
        }
    });
    PIN1.tick();
    PIN2.tick();
}
