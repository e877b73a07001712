use std::fmt::Display;
use std::thread::JoinHandle;
use std::time::Duration;

use alphanum_i2c::{AlphaNumWing, AlphanumDisplay, Backpack, MarqueeOptions, StdDelay, StopToken};
use embedded_hal::blocking::delay::DelayMs;
use anyhow::{anyhow, Result};
use tracing::info;

use crate::config::Config;

pub type Wing = AlphaNumWing<Backpack<mcp2221::Handle>, StdDelay>;

/// Surface a wing error through anyhow without requiring it to be `Send`.
pub fn check<T, E: Display>(result: Result<T, E>) -> Result<T> {
    result.map_err(|e| anyhow!("{e}"))
}

pub struct Core;

impl Core {
    /// Open the first MCP2221 and bring up the wing with the configured
    /// brightness and blink rate.
    pub fn open(config: &Config) -> Result<Wing> {
        let mcp_config = mcp2221::Config::default();
        let i2c = mcp2221::Handle::open_first(&mcp_config)
            .map_err(|e| anyhow!("can't open MCP2221: {e:?}"))?;

        let mut wing = check(AlphaNumWing::with_address(i2c, config.address(), StdDelay))?;
        check(wing.set_brightness(config.brightness()))?;
        check(wing.set_blink_rate(config.blink_rate()))?;

        info!(address = config.address(), "display connected");
        Ok(wing)
    }

    /// Run a looping marquee on its own thread until `stop` is raised.
    ///
    /// The bridge is opened on the worker thread, which owns it for the rest
    /// of its life.
    pub fn run(config: Config, text: String, delay: Duration, stop: StopToken) -> JoinHandle<Result<usize>> {
        std::thread::spawn(move || Self::inner(config, text, delay, stop))
    }

    fn inner(config: Config, text: String, delay: Duration, stop: StopToken) -> Result<usize> {
        let mut wing = Self::open(&config)?;
        let options = MarqueeOptions::default().with_delay(delay);
        check(wing.marquee(text, options, &stop))
    }

    /// Walk through everything the wing can do, holding each step for a
    /// while with `pause`.
    pub fn demo<D, DL>(wing: &mut AlphaNumWing<D, DL>, pause: impl Fn(Duration)) -> Result<()>
    where
        D: AlphanumDisplay,
        D::Error: Display,
        DL: DelayMs<u32>,
    {
        check(wing.print("Text"))?;

        for rate in (0..=3).rev() {
            check(wing.set_blink_rate(rate))?;
            info!(rate = wing.blink_rate(), "current blink rate");
            pause(Duration::from_secs(4));
        }

        for level in 0..=15 {
            check(wing.set_brightness(level))?;
            info!(level = wing.brightness(), "current brightness");
            pause(Duration::from_millis(200));
        }

        for _ in 0..4 {
            check(wing.fill(true))?;
            pause(Duration::from_millis(500));
            check(wing.fill(false))?;
            pause(Duration::from_millis(500));
        }

        check(wing.marquee(
            "This is some really long text  ",
            MarqueeOptions::once(),
            &StopToken::new(),
        ))?;
        Ok(())
    }
}
