//! # smartqr
//!
//! Generate styled, brand-aware QR codes and read QR payloads back out of arbitrary images.
//!
//! ## Features
//!
//! - **Styled generation**: Dot color, background color, six dot shapes and a centered logo
//! - **Export**: PNG, JPEG and WebP at the symbol's native resolution
//! - **Scanning**: Decode any image format the `image` crate understands, with a global
//!   threshold rescue pass for low contrast or noisy captures
//! - **Theme preference**: A persisted light/dark setting for front ends
//!
//! ## Quick Start
//!
//! ### Generating a QR code
//!
//! ```rust
//! use smartqr::{Color, DotShape, ExportFormat, QRBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("https://google.com")
//!     .dot_color("#1877F2".parse::<Color>()?)  // Any #RGB, #RRGGBB or preset name
//!     .dot_shape(DotShape::Rounded)            // Defaults to DotShape::Square
//!     .build()?;
//!
//! let png = qr.export(ExportFormat::Png)?;
//! # assert!(!png.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ### Scanning an image
//!
//! ```rust,no_run
//! use smartqr::QRReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = QRReader::new().scan_path("qr_code.png".as_ref())?;
//! println!("Decoded: {}", report.payload);
//! # Ok(())
//! # }
//! ```
//!
//! ## Scan pipeline
//!
//! 1. The file is sniffed by its magic bytes and decoded to an RGBA buffer. Files that are
//!    not images fail with [`QRError::UnreadableImage`] before any decoding happens.
//! 2. The raw pixels go to the decoder.
//! 3. If nothing is found, every pixel is forced to black or white by comparing the mean of
//!    its RGB channels against [`DEFAULT_THRESHOLD`], and the decoder runs once more.
//! 4. If that fails too the scan ends with [`QRError::NoSymbolFound`].
//!
//! The decoder is never called more than twice per scan.

pub mod builder;
pub(crate) mod common;
pub mod reader;
pub mod settings;

pub use builder::{QRBuilder, StyledQR};
pub use common::{
    Color, DotShape, ECLevel, ExportFormat, QRError, QRResult, RasterImage, NO_SYMBOL_HINT,
    PRESET_COLORS,
};
pub use reader::{Attempt, QRReader, ReaderConfig, ScanReport, DEFAULT_THRESHOLD};
pub use settings::{SettingsStore, Theme};
