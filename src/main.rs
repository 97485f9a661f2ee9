use std::error::Error;

use alnumqr::{ECLevel, QRBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let data = "HELLO WORLD";

    let qr = QRBuilder::new(data).ec_level(ECLevel::Q).build()?;
    println!("{}", qr.to_str(1));

    Ok(())
}
