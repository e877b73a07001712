use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};
use tracing::{debug, info, trace};

use std::fmt::Debug;

pub mod backpack;
mod delay;
mod display;
mod error;
mod marquee;
mod value;

pub use backpack::Backpack;
pub use delay::StdDelay;
pub use display::{AlphanumDisplay, CHARS};
pub use error::{DeviceError, Error};
pub use marquee::{MarqueeOptions, StopToken, DEFAULT_MARQUEE_DELAY};
pub use value::Value;

pub use ht16k33::i2c_mock;

pub const I2C_ADDR: u8 = 0x70;

/// The 14-segment AlphaNumeric wing: four characters behind an HT16K33.
///
/// Every call that changes the picture is flushed to the device before it
/// returns. The driver's own auto-write is switched off so each operation
/// costs exactly one flush.
pub struct AlphaNumWing<D, DL> {
    dev: D,
    delay: DL,
}

impl<I2C, E, DL> AlphaNumWing<Backpack<I2C>, DL>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: Debug,
    DL: DelayMs<u32>,
{
    /// Bring up the backpack at `address` on the given bus.
    pub fn with_address(
        i2c: I2C,
        address: u8,
        delay: DL,
    ) -> Result<Self, Error<DeviceError<E>>> {
        let backpack = Backpack::new(i2c, address)?;
        Ok(Self::new(backpack, delay))
    }

    /// Bring up the backpack at the default address, [`I2C_ADDR`].
    pub fn from_i2c(i2c: I2C, delay: DL) -> Result<Self, Error<DeviceError<E>>> {
        Self::with_address(i2c, I2C_ADDR, delay)
    }
}

impl<D, DL> AlphaNumWing<D, DL>
where
    D: AlphanumDisplay,
    DL: DelayMs<u32>,
{
    pub fn new(mut dev: D, delay: DL) -> Self {
        dev.set_auto_write(false);
        debug!("alphanumeric wing ready");
        Self { dev, delay }
    }

    pub fn device(&mut self) -> &mut D {
        &mut self.dev
    }

    /// Give back the display driver and the delay.
    pub fn release(self) -> (D, DL) {
        (self.dev, self.delay)
    }

    pub fn commit_buffer(&mut self) -> Result<(), Error<D::Error>> {
        self.dev.show().map_err(Error::Device)
    }

    /// Show text, an integer or a float.
    ///
    /// ```no_run
    /// # use alphanum_i2c::{AlphaNumWing, StdDelay, i2c_mock::I2cMock};
    /// let mut wing = AlphaNumWing::from_i2c(I2cMock::new(), StdDelay).unwrap();
    /// wing.print(1234).unwrap();
    /// wing.print("Text").unwrap();
    /// ```
    pub fn print(&mut self, value: impl Into<Value>) -> Result<(), Error<D::Error>> {
        let value = value.into();
        self.dev.print(&value).map_err(Error::Device)?;
        self.commit_buffer()
    }

    /// Scroll `text` across the display one character at a time, pausing
    /// `options.delay` after each one.
    ///
    /// The display is cleared first. Each step shifts the display left by one
    /// cell and writes the next character into the rightmost cell. A `.`
    /// lights the decimal point of that cell instead.
    ///
    /// With `options.looping` the text repeats until `stop` is raised, so the
    /// call only returns once another thread (or the delay) stops it. The
    /// token is checked before every step. Returns the number of steps shown.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `text` is not text. Nothing is written
    /// to the display in that case.
    pub fn marquee(
        &mut self,
        text: impl Into<Value>,
        options: MarqueeOptions,
        stop: &StopToken,
    ) -> Result<usize, Error<D::Error>> {
        let value = text.into();
        let Some(text) = value.as_text() else {
            return Err(Error::InvalidArgument("marquee needs text"));
        };

        self.fill(false)?;

        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Ok(0);
        }

        let last = CHARS - 1;
        let delay_ms = options.delay_ms();
        let mut steps = 0;
        loop {
            for &c in &chars {
                if stop.is_stopped() {
                    info!(steps, "marquee stopped");
                    return Ok(steps);
                }

                self.dev.scroll(1).map_err(Error::Device)?;
                if c == '.' {
                    self.dev.set_dot(last, true).map_err(Error::Device)?;
                } else {
                    self.dev.set_char(last, c).map_err(Error::Device)?;
                }
                self.commit_buffer()?;
                self.delay.delay_ms(delay_ms);

                steps += 1;
                trace!(steps, %c, "marquee step");
            }

            if !options.looping {
                return Ok(steps);
            }
        }
    }

    pub fn blink_rate(&self) -> u8 {
        self.dev.blink_rate()
    }

    /// 0 turns blinking off, 1-3 are successively slower rates.
    pub fn set_blink_rate(&mut self, rate: u8) -> Result<(), Error<D::Error>> {
        self.dev.set_blink_rate(rate).map_err(Error::Device)
    }

    pub fn brightness(&self) -> u8 {
        self.dev.brightness()
    }

    /// 0 (dimmest) to 15 (brightest).
    pub fn set_brightness(&mut self, level: u8) -> Result<(), Error<D::Error>> {
        self.dev.set_brightness(level).map_err(Error::Device)
    }

    /// Turn every segment on (`true`) or off (`false`).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for anything but a boolean, before any bus
    /// traffic.
    pub fn fill(&mut self, value: impl Into<Value>) -> Result<(), Error<D::Error>> {
        let Some(on) = value.into().as_bool() else {
            return Err(Error::InvalidArgument("fill must be set to either true or false"));
        };
        self.dev.fill(on).map_err(Error::Device)?;
        self.commit_buffer()
    }
}
