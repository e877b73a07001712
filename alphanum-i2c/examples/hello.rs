use alphanum_i2c::{AlphaNumWing, MarqueeOptions, StdDelay, StopToken, I2C_ADDR};

fn main() {
    let config = mcp2221::Config::default();
    let i2c = mcp2221::Handle::open_first(&config).unwrap();

    println!("Initializing display.");
    let mut display = AlphaNumWing::with_address(i2c, I2C_ADDR, StdDelay).unwrap();

    display.print(1234).unwrap();
    println!("Sleeping for 2 seconds...");
    std::thread::sleep(std::time::Duration::from_secs(2));

    println!("Scrolling once.");
    display
        .marquee("Hello world   ", MarqueeOptions::once(), &StopToken::new())
        .unwrap();

    println!("Turning off display.");
    display.fill(false).unwrap();
}
