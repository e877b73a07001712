//! Error types for the wing and its backpack driver.

use thiserror::Error;

/// Errors raised by the display driver itself: bus failures and values the
/// HT16K33 backpack cannot take.
#[derive(Debug, Error)]
pub enum DeviceError<E> {
    /// Underlying I2C bus error.
    #[error("I2C error: {0:?}")]
    I2c(E),

    /// HT16K33 backpacks answer on 0x70..=0x77 only.
    #[error("no HT16K33 can live at address {0:#04x}")]
    InvalidAddress(u8),

    #[error("brightness must be 0-15, got {0}")]
    BrightnessOutOfRange(u8),

    #[error("blink rate must be 0-3, got {0}")]
    BlinkRateOutOfRange(u8),

    #[error("character index must be 0-3, got {0}")]
    IndexOutOfRange(usize),

    /// The value needs more than the four available glyphs.
    #[error("input overflow: {0} is too large for the display")]
    Overflow(String),
}

// Allow `?` on raw ht16k33 results, which carry the bare bus error.
impl<E> From<E> for DeviceError<E> {
    fn from(error: E) -> Self {
        DeviceError::I2c(error)
    }
}

/// Errors returned by [`AlphaNumWing`](crate::AlphaNumWing).
#[derive(Debug, Error)]
pub enum Error<E> {
    /// Rejected by the wing before anything reached the driver.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Propagated unchanged from the display driver.
    #[error("device error: {0}")]
    Device(E),
}

impl<E> Error<E> {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// The driver error, if this is one.
    pub fn device(&self) -> Option<&E> {
        match self {
            Error::Device(e) => Some(e),
            Error::InvalidArgument(_) => None,
        }
    }
}

impl<E> From<DeviceError<E>> for Error<DeviceError<E>> {
    fn from(error: DeviceError<E>) -> Self {
        Error::Device(error)
    }
}
