//! # alnumqr
//!
//! A Rust library for encoding alphanumeric messages into QR symbols with Reed-Solomon error
//! correction. Covers versions 1 to 10 and all four error correction levels.
//!
//! ## Features
//!
//! - **Alphanumeric Mode**: Digits, uppercase letters and ` $%*+-./:`; lowercase input is uppercased
//! - **Automatic Version Selection**: Picks the smallest version that fits the message
//! - **Reed-Solomon Error Correction**: Block split, ECC generation and interleaving per ISO/IEC 18004
//! - **Mask Selection**: Scores all 8 masks with the standard penalty rules and keeps the best
//! - **Rendering**: Grayscale image or terminal string with a 4 module quiet zone
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use alnumqr::ECLevel;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = alnumqr::encode("HELLO WORLD", ECLevel::Q)?;
//! assert_eq!(qr.width(), 21);
//!
//! println!("{}", qr.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust,no_run
//! use alnumqr::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("HTTPS://EXAMPLE.COM")
//!     .version(Version::new(3)?)        // Symbol size - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::H)             // Error correction level - if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)       // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! let img = qr.to_image(4);  // 4x scale factor
//! img.save("configured_qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-10, with sizes from 21x21 to 57x57 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Logging
//!
//! Pipeline stages emit `tracing` events at `debug` level, and individual mask scores at
//! `trace` level. The library never installs a subscriber.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{Module, QRBuilder, QR};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};

/// Encodes a message at the given error correction level, choosing the smallest version
/// that fits and the mask with the lowest penalty.
pub fn encode(data: &str, ec_level: ECLevel) -> QRResult<QR> {
    QRBuilder::new(data).ec_level(ec_level).build()
}
