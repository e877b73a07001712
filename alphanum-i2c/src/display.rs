//! The four-character display driver the wing is built on.

use crate::value::Value;

/// Number of character cells on the display.
pub const CHARS: usize = 4;

/// A buffered four-character 14-segment display.
///
/// Mutating calls edit an in-memory buffer. Nothing reaches the device
/// until [`show`](Self::show) is called, unless
/// [`auto_write`](Self::auto_write) is enabled, in which case every mutation
/// flushes on its own.
pub trait AlphanumDisplay {
    type Error;

    /// Replace the buffer contents with `value`, right-aligned.
    fn print(&mut self, value: &Value) -> Result<(), Self::Error>;

    /// Transmit the buffer to the device.
    fn show(&mut self) -> Result<(), Self::Error>;

    /// Shift every cell `count` slots to the left. Vacated cells are blank.
    fn scroll(&mut self, count: usize) -> Result<(), Self::Error>;

    /// Write the glyph for `c` into cell `index` (0 is leftmost).
    fn set_char(&mut self, index: usize, c: char) -> Result<(), Self::Error>;

    /// Turn the decimal point of cell `index` on or off.
    fn set_dot(&mut self, index: usize, on: bool) -> Result<(), Self::Error>;

    /// Blank every cell.
    fn clear(&mut self) -> Result<(), Self::Error> {
        self.fill(false)
    }

    /// Turn every segment of every cell on or off.
    fn fill(&mut self, on: bool) -> Result<(), Self::Error>;

    /// 0 is off, 1-3 are successively slower blink rates.
    fn blink_rate(&self) -> u8;
    fn set_blink_rate(&mut self, rate: u8) -> Result<(), Self::Error>;

    /// 0 (dimmest) to 15 (brightest).
    fn brightness(&self) -> u8;
    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error>;

    fn auto_write(&self) -> bool;
    fn set_auto_write(&mut self, enabled: bool);
}
