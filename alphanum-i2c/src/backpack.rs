//! [`AlphanumDisplay`] for the Adafruit 14-segment backpack: an HT16K33 with
//! four alphanumeric digits wired to it.
//!
//! Register access comes from the `ht16k33` crate and the glyph table from
//! `adafruit-alphanum4`. This module adds the text layout on top: pushing
//! characters in from the right, folding `.` into the previous digit,
//! number formatting, and scrolling the RAM buffer.

use adafruit_alphanum4::{AlphaNum4, AsciiChar, Index};
use embedded_hal::blocking::i2c::{Write, WriteRead};
use ht16k33::{Dimming, Display, DisplayData, DisplayDataAddress, LedLocation, HT16K33};
use tracing::debug;

use std::fmt::Debug;
use std::ops::RangeInclusive;

use crate::display::{AlphanumDisplay, CHARS};
use crate::error::DeviceError;
use crate::value::Value;

/// Addresses selectable with the backpack's solder jumpers.
pub const ADDRESS_RANGE: RangeInclusive<u8> = 0x70..=0x77;

pub const MAX_BRIGHTNESS: u8 = 15;
pub const MAX_BLINK_RATE: u8 = 3;

/// Decimal point segment of a digit.
const DOT_MASK: u16 = 1 << 14;

pub struct Backpack<I2C> {
    dev: HT16K33<I2C>,
    brightness: u8,
    blink_rate: u8,
    auto_write: bool,
}

impl<I2C, E> Backpack<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: Debug,
{
    /// Bring up the HT16K33 at `address`: oscillator on, display on without
    /// blinking, full brightness, all digits blank.
    ///
    /// Auto-write starts enabled.
    pub fn new(i2c: I2C, address: u8) -> Result<Self, DeviceError<E>> {
        if !ADDRESS_RANGE.contains(&address) {
            return Err(DeviceError::InvalidAddress(address));
        }

        let mut backpack = Self {
            dev: HT16K33::new(i2c, address),
            brightness: MAX_BRIGHTNESS,
            blink_rate: 0,
            auto_write: true,
        };

        // Oscillator on, blank RAM written out, display still off.
        backpack.dev.initialize()?;
        backpack.dev.set_display(Display::ON)?;
        backpack.dev.set_dimming(Dimming::BRIGHTNESS_MAX)?;

        debug!(address, "HT16K33 backpack initialized");
        Ok(backpack)
    }

    pub fn device(&mut self) -> &mut HT16K33<I2C> {
        &mut self.dev
    }

    /// Segment bits of every digit as currently buffered, leftmost first.
    pub fn buffer(&self) -> [u16; CHARS] {
        let mut glyphs = [0; CHARS];
        for (index, glyph) in glyphs.iter_mut().enumerate() {
            *glyph = self.glyph(index);
        }
        glyphs
    }

    fn glyph(&self, index: usize) -> u16 {
        let ram = self.dev.display_buffer();
        let low = ram[index * 2].bits() as u16;
        let high = ram[index * 2 + 1].bits() as u16;
        low | (high << 8)
    }

    fn set_glyph(&mut self, index: usize, bits: u16) {
        // Each digit spans two RAM rows: segments 0-7, then 8-15.
        for bit in 0..16u8 {
            let row = DisplayDataAddress::from_bits_truncate(index as u8 * 2 + bit / 8);
            let common = DisplayData::from_bits_truncate(1 << (bit % 8));
            self.dev
                .update_display_buffer(LedLocation { row, common }, (bits >> bit) & 1 == 1);
        }
    }

    /// Anything outside printable ASCII leaves the cell blank.
    fn write_char(&mut self, index: usize, c: char) {
        if c == ' ' || c.is_ascii_graphic() {
            self.dev
                .update_buffer_with_char(Index::from(index as u8), AsciiChar::new(c));
        } else {
            self.set_glyph(index, 0);
        }
    }

    fn shift_left(&mut self, count: usize) {
        for index in 0..CHARS {
            let bits = if index + count < CHARS {
                self.glyph(index + count)
            } else {
                0
            };
            self.set_glyph(index, bits);
        }
    }

    /// Clear, then push `text` in from the right one glyph at a time.
    fn push_text(&mut self, text: &str) {
        self.dev.clear_display_buffer();
        for c in text.chars().filter(|c| !c.is_control()) {
            let last = CHARS - 1;
            if c == '.' && self.glyph(last) & DOT_MASK == 0 {
                self.dev
                    .update_buffer_with_dot(Index::from(last as u8), true);
                continue;
            }
            self.shift_left(1);
            if c == '.' {
                self.dev
                    .update_buffer_with_dot(Index::from(last as u8), true);
            } else {
                self.write_char(last, c);
            }
        }
    }

    fn written(&mut self) -> Result<(), DeviceError<E>> {
        if self.auto_write {
            self.dev.write_display_buffer()?;
        }
        Ok(())
    }

    fn check_index(index: usize) -> Result<(), DeviceError<E>> {
        if index < CHARS {
            Ok(())
        } else {
            Err(DeviceError::IndexOutOfRange(index))
        }
    }
}

impl<I2C, E> AlphanumDisplay for Backpack<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: Debug,
{
    type Error = DeviceError<E>;

    fn print(&mut self, value: &Value) -> Result<(), Self::Error> {
        let text = match value {
            Value::Text(text) => text.clone(),
            Value::Float(x) => fixed_point(*x).ok_or_else(|| DeviceError::Overflow(value.to_string()))?,
            Value::Integer(_) | Value::Bool(_) => {
                let text = value.to_string();
                if glyph_count(&text) > CHARS {
                    return Err(DeviceError::Overflow(text));
                }
                text
            }
        };
        self.push_text(&text);
        self.written()
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        self.dev.write_display_buffer()?;
        Ok(())
    }

    fn scroll(&mut self, count: usize) -> Result<(), Self::Error> {
        self.shift_left(count);
        self.written()
    }

    fn set_char(&mut self, index: usize, c: char) -> Result<(), Self::Error> {
        Self::check_index(index)?;
        self.write_char(index, c);
        self.written()
    }

    fn set_dot(&mut self, index: usize, on: bool) -> Result<(), Self::Error> {
        Self::check_index(index)?;
        self.dev
            .update_buffer_with_dot(Index::from(index as u8), on);
        self.written()
    }

    fn fill(&mut self, on: bool) -> Result<(), Self::Error> {
        let bits = if on { u16::MAX } else { 0 };
        for index in 0..CHARS {
            self.set_glyph(index, bits);
        }
        self.written()
    }

    fn blink_rate(&self) -> u8 {
        self.blink_rate
    }

    fn set_blink_rate(&mut self, rate: u8) -> Result<(), Self::Error> {
        if rate > MAX_BLINK_RATE {
            return Err(DeviceError::BlinkRateOutOfRange(rate));
        }
        // Rate bits sit right above the display-on bit: 2 Hz, 1 Hz, 0.5 Hz.
        let state = Display::from_bits_truncate(Display::ON.bits() | (rate << 1));
        self.dev.set_display(state)?;
        self.blink_rate = rate;
        debug!(rate, "blink rate set");
        Ok(())
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error> {
        if level > MAX_BRIGHTNESS {
            return Err(DeviceError::BrightnessOutOfRange(level));
        }
        self.dev.set_dimming(Dimming::from_bits_truncate(level))?;
        self.brightness = level;
        debug!(level, "brightness set");
        Ok(())
    }

    fn auto_write(&self) -> bool {
        self.auto_write
    }

    fn set_auto_write(&mut self, enabled: bool) {
        self.auto_write = enabled;
    }
}

/// Glyphs needed for `text`; a `.` rides on the glyph before it.
fn glyph_count(text: &str) -> usize {
    let mut count = 0;
    let mut dotted = true;
    for c in text.chars() {
        if c == '.' && !dotted {
            dotted = true;
        } else {
            count += 1;
            dotted = c == '.';
        }
    }
    count
}

/// Shortest rendering of `x` that fits the display, rounding off fractional
/// digits when needed. `None` when even the integer part does not fit.
fn fixed_point(x: f64) -> Option<String> {
    if !x.is_finite() {
        return None;
    }

    let shortest = x.to_string();
    if glyph_count(&shortest) <= CHARS {
        return Some(shortest);
    }

    let whole = format!("{:.0}", x.trunc()).len();
    if whole > CHARS {
        return None;
    }

    let mut precision = CHARS - whole;
    loop {
        let text = format!("{:.*}", precision, x);
        if glyph_count(&text) <= CHARS {
            return Some(text);
        }
        if precision == 0 {
            return None;
        }
        precision -= 1;
    }
}
