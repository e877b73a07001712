use std::path::PathBuf;
use std::time::Duration;

use alphanum_i2c::{MarqueeOptions, StopToken, Value};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::core::{check, Core};

mod config;
mod core;

#[derive(Parser)]
#[command(name = "alphanum")]
#[command(about = "Drive a 14-segment AlphaNumeric wing through an MCP2221", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file; defaults apply when it does not exist
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// I2C address of the backpack, e.g. 0x70 (overrides the settings file)
    #[arg(short, long, value_parser = parse_address)]
    address: Option<u8>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show text, an integer or a float
    Print {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Scroll text across the display; loops until Enter is pressed
    Marquee {
        text: String,
        /// Pause between characters in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Scroll through the text a single time
        #[arg(long)]
        once: bool,
    },
    /// Turn every segment on (true) or off (false)
    Fill { value: String },
    /// Show, or set, the brightness (0-15)
    Brightness { level: Option<u8> },
    /// Show, or set, the blink rate (0 = off, 1-3 = slower and slower)
    Blink { rate: Option<u8> },
    /// Cycle through blink rates, brightness, fill and a marquee
    Demo,
}

fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("not an I2C address: {e}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?.with_address(cli.address);

    match cli.command {
        Command::Marquee { text, delay_ms, once } => {
            let delay = delay_ms.map(Duration::from_millis).unwrap_or(config.marquee_delay());
            marquee(config, text, delay, once)
        }
        Command::Print { value } => check(Core::open(&config)?.print(value.parse::<Value>()?)),
        Command::Fill { value } => check(Core::open(&config)?.fill(value.parse::<Value>()?)),
        Command::Brightness { level } => {
            let mut wing = Core::open(&config)?;
            if let Some(level) = level {
                check(wing.set_brightness(level))?;
            }
            println!("Current Brightness is {}", wing.brightness());
            Ok(())
        }
        Command::Blink { rate } => {
            let mut wing = Core::open(&config)?;
            if let Some(rate) = rate {
                check(wing.set_blink_rate(rate))?;
            }
            println!("Current Blink Rate is {}", wing.blink_rate());
            Ok(())
        }
        Command::Demo => Core::demo(&mut Core::open(&config)?, std::thread::sleep),
    }
}

fn marquee(config: Config, text: String, delay: Duration, once: bool) -> Result<()> {
    if once {
        let mut wing = Core::open(&config)?;
        let options = MarqueeOptions::once().with_delay(delay);
        check(wing.marquee(text, options, &StopToken::new()))?;
        return Ok(());
    }

    let stop = StopToken::new();
    let handle = Core::run(config, text, delay, stop.clone());

    println!("Press Enter to stop.");
    let mut line = String::new();
    // With no terminal attached, keep scrolling until the process is killed.
    if std::io::stdin().read_line(&mut line)? > 0 {
        stop.stop();
    }

    match handle.join() {
        Ok(result) => {
            let steps = result?;
            info!(steps, "marquee finished");
            Ok(())
        }
        Err(_) => bail!("marquee thread crashed"),
    }
}
