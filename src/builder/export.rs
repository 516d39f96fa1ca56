use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};

use image::{ImageFormat, Rgb, RgbImage, RgbaImage};

use crate::common::{Color, ExportFormat, QRError, QRResult};

// Export
//------------------------------------------------------------------------------

pub fn encode_image(img: &RgbaImage, fmt: ExportFormat, bg: Color) -> QRResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    let res = match fmt {
        ExportFormat::Png | ExportFormat::WebP => img.write_to(&mut cursor, fmt.image_format()),
        // JPEG has no alpha channel
        ExportFormat::Jpeg => flatten(img, bg).write_to(&mut cursor, ImageFormat::Jpeg),
    };
    res.map_err(|e| QRError::Export(format!("{}: {e}", fmt.extension())))?;
    Ok(cursor.into_inner())
}

/// `smartqr-<unix millis>.<ext>`
pub fn default_file_name(fmt: ExportFormat) -> String {
    let millis = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
    format!("smartqr-{millis}.{}", fmt.extension())
}

// Composites every pixel over the background color
fn flatten(img: &RgbaImage, bg: Color) -> RgbImage {
    let (w, h) = img.dimensions();
    let bg = [bg.r as u32, bg.g as u32, bg.b as u32];
    RgbImage::from_fn(w, h, |x, y| {
        let px = img.get_pixel(x, y);
        let a = px[3] as u32;
        let mix = |i: usize| ((px[i] as u32 * a + bg[i] * (255 - a)) / 255) as u8;
        Rgb([mix(0), mix(1), mix(2)])
    })
}
