use std::error::Error;

use alnumqr::{ECLevel, MaskPattern, QRBuilder, Version};

fn main() -> Result<(), Box<dyn Error>> {
    let data = "ALL OPTIONS SET: VERSION 5 EC LEVEL H MASK 2";

    let qr = QRBuilder::new(data)
        .version(Version::new(5)?)     // QR version (size) - if not provided, finds smallest version to fit data
        .ec_level(ECLevel::H)          // Error correction level - if not provided, defaults to ECLevel::M
        .mask(MaskPattern::new(2)?)    // Mask pattern - if not provided, finds best mask based on penalty score
        .build()?;

    // Convert to image and save
    let img = qr.to_image(6); // 6x scale factor for larger output
    img.save("configured_qr.png")?;

    println!("Configured QR code saved to: configured_qr.png");
    println!("QR metadata: {}", qr.metadata());
    println!("{}", qr.to_str(1));

    Ok(())
}
