//! Bus traffic of the real backpack driver, on its own and under the wing.

use std::cell::Cell;
use std::rc::Rc;

use alphanum_i2c::{AlphaNumWing, AlphanumDisplay, Backpack, MarqueeOptions, StopToken};
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};

/// Start-row byte plus the whole of the HT16K33 display RAM.
const RAM_WRITE_LEN: usize = ht16k33::ROWS_SIZE + 1;

/// I2C bus that accepts everything and counts display RAM writes.
#[derive(Clone, Default)]
struct CountingBus {
    flushes: Rc<Cell<usize>>,
}

impl CountingBus {
    fn flushes(&self) -> usize {
        self.flushes.get()
    }
}

impl Write for CountingBus {
    type Error = ();

    fn write(&mut self, _address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if bytes.len() == RAM_WRITE_LEN {
            self.flushes.set(self.flushes.get() + 1);
        }
        Ok(())
    }
}

impl WriteRead for CountingBus {
    type Error = ();

    fn write_read(&mut self, _address: u8, _bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        buffer.fill(0);
        Ok(())
    }
}

struct NoDelay;

impl DelayMs<u32> for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

fn backpack() -> (Backpack<CountingBus>, CountingBus) {
    let bus = CountingBus::default();
    let backpack = Backpack::new(bus.clone(), 0x70).unwrap();
    (backpack, bus)
}

#[test]
fn construction_writes_the_blank_ram_once() {
    let (_, bus) = backpack();
    assert_eq!(bus.flushes(), 1);
}

#[test]
fn auto_write_flushes_every_mutation() {
    let (mut backpack, bus) = backpack();
    assert!(backpack.auto_write());
    let start = bus.flushes();

    backpack.set_char(0, 'A').unwrap();
    assert_eq!(bus.flushes(), start + 1);
    backpack.set_dot(0, true).unwrap();
    assert_eq!(bus.flushes(), start + 2);
    backpack.scroll(1).unwrap();
    assert_eq!(bus.flushes(), start + 3);
    backpack.print(&"AB".into()).unwrap();
    assert_eq!(bus.flushes(), start + 4);
    backpack.fill(true).unwrap();
    assert_eq!(bus.flushes(), start + 5);
}

#[test]
fn without_auto_write_only_show_flushes() {
    let (mut backpack, bus) = backpack();
    backpack.set_auto_write(false);
    let start = bus.flushes();

    backpack.set_char(0, 'A').unwrap();
    backpack.set_dot(0, true).unwrap();
    backpack.scroll(1).unwrap();
    backpack.print(&"AB".into()).unwrap();
    backpack.fill(true).unwrap();
    assert_eq!(bus.flushes(), start);

    backpack.show().unwrap();
    assert_eq!(bus.flushes(), start + 1);
}

#[test]
fn settings_do_not_touch_display_ram() {
    let (mut backpack, bus) = backpack();
    let start = bus.flushes();
    backpack.set_brightness(3).unwrap();
    backpack.set_blink_rate(2).unwrap();
    assert_eq!(bus.flushes(), start);
}

#[test]
fn wing_flushes_once_per_operation() {
    let bus = CountingBus::default();
    let mut wing = AlphaNumWing::from_i2c(bus.clone(), NoDelay).unwrap();
    let start = bus.flushes();

    wing.print("ABCD").unwrap();
    assert_eq!(bus.flushes(), start + 1);
    wing.print("abc".len()).unwrap();
    assert_eq!(bus.flushes(), start + 2);
    wing.fill(true).unwrap();
    assert_eq!(bus.flushes(), start + 3);
}

#[test]
fn wing_marquee_flushes_the_clear_and_each_step() {
    let bus = CountingBus::default();
    let mut wing = AlphaNumWing::from_i2c(bus.clone(), NoDelay).unwrap();
    let start = bus.flushes();

    let steps = wing.marquee("AB", MarqueeOptions::once(), &StopToken::new()).unwrap();
    assert_eq!(steps, 2);
    assert_eq!(bus.flushes(), start + 3);
}
