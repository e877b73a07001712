use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Pause between marquee steps unless told otherwise.
pub const DEFAULT_MARQUEE_DELAY: Duration = Duration::from_millis(250);

/// How a marquee scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarqueeOptions {
    /// Pause after each character is shifted in.
    pub delay: Duration,
    /// Start over from the first character after the last one, until stopped.
    pub looping: bool,
}

impl Default for MarqueeOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_MARQUEE_DELAY,
            looping: true,
        }
    }
}

impl MarqueeOptions {
    /// A single pass with the default delay.
    pub fn once() -> Self {
        Self {
            looping: false,
            ..Self::default()
        }
    }

    /// Pauses are counted in whole milliseconds, rounded up, so any nonzero
    /// `delay` still pauses.
    pub fn with_delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    pub(crate) fn delay_ms(&self) -> u32 {
        let ms = self.delay.as_nanos().div_ceil(1_000_000);
        u32::try_from(ms).unwrap_or(u32::MAX)
    }
}

/// Shared flag that ends a running marquee at its next step.
///
/// Clones observe the same flag, so one can be handed to another thread (or
/// to a delay implementation) while the marquee blocks on the original.
#[derive(Debug, Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Re-arm the token for another marquee.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
