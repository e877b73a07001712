use alphanum_i2c::{AlphaNumWing, StdDelay, I2C_ADDR};

fn main() {
    let config = mcp2221::Config::default();
    let i2c = mcp2221::Handle::open_first(&config).expect("No MCP2221 found");

    let mut display = AlphaNumWing::with_address(i2c, I2C_ADDR, StdDelay)
        .expect("Failed to initialize HT16K33");

    display.print("HI").expect("Failed to print");
}
