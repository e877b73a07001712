use anyhow::{Context, Result};
use getset::CopyGetters;
use serde::{Deserialize, Serialize};

use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "./alphanum.toml";

/// Settings applied to the wing when the client starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, CopyGetters)]
#[getset(get_copy = "pub")]
#[serde(default)]
pub struct Config {
    address: u8,
    brightness: u8,
    blink_rate: u8,
    marquee_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: alphanum_i2c::I2C_ADDR,
            brightness: 15,
            blink_rate: 0,
            marquee_delay_ms: alphanum_i2c::DEFAULT_MARQUEE_DELAY.as_millis() as u64,
        }
    }
}

impl Config {
    /// Read `path`, falling back to the defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text)
                .with_context(|| format!("invalid config in {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("can't read {}", path.display())),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_address(self, address: Option<u8>) -> Self {
        Self {
            address: address.unwrap_or(self.address),
            ..self
        }
    }

    pub fn marquee_delay(&self) -> Duration {
        Duration::from_millis(self.marquee_delay_ms)
    }
}
