use std::path::Path;

use image::ImageFormat;
use log::debug;

use crate::common::{QRError, QRResult, RasterImage};

// Image loader
// Turns an uploaded file into an RGBA pixel buffer at the image's natural dimensions.
// Anything that can't be turned into pixels fails with UnreadableImage; a blank buffer is
// never returned in place of an error.
//------------------------------------------------------------------------------

pub trait ImageLoader {
    fn load(&self, bytes: &[u8]) -> QRResult<RasterImage>;

    fn load_path(&self, path: &Path) -> QRResult<RasterImage> {
        let bytes = std::fs::read(path)
            .map_err(|e| QRError::UnreadableImage(format!("{}: {e}", path.display())))?;
        self.load(&bytes)
    }
}

/// Loader that sniffs the container format from magic bytes and decodes with `image`.
/// File extensions are never consulted.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormatLoader;

impl ImageLoader for FormatLoader {
    fn load(&self, bytes: &[u8]) -> QRResult<RasterImage> {
        if bytes.is_empty() {
            return Err(QRError::UnreadableImage("empty file".to_string()));
        }

        let fmt = image::guess_format(bytes)
            .map_err(|_| QRError::UnreadableImage("unrecognized image format".to_string()))?;
        debug!("Detected {fmt:?} image of {} bytes", bytes.len());

        let img = image::load_from_memory_with_format(bytes, fmt)
            .map_err(|e| QRError::UnreadableImage(format!("{} decode failed: {e}", name(fmt))))?;

        let rgba = img.to_rgba8();
        if rgba.width() == 0 || rgba.height() == 0 {
            return Err(QRError::UnreadableImage("image has no pixels".to_string()));
        }

        Ok(RasterImage::from(rgba))
    }
}

fn name(fmt: ImageFormat) -> &'static str {
    fmt.extensions_str().first().copied().unwrap_or("image")
}
