use image::RgbaImage;

/// Number of interleaved channels per pixel: red, green, blue, alpha.
pub const CHANNELS: usize = 4;

// Raster image
//------------------------------------------------------------------------------

/// Row-major RGBA8 pixel buffer owned by a single scan.
///
/// `width * height * 4 == data.len()` always holds. A mismatched buffer is a programming
/// error and panics at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    w: u32,
    h: u32,
    data: Vec<u8>,
}

impl RasterImage {
    pub fn new(w: u32, h: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            w as usize * h as usize * CHANNELS,
            data.len(),
            "RGBA buffer length doesn't match {w}x{h}"
        );
        Self { w, h, data }
    }

    /// Image of a single RGBA color.
    pub fn filled(w: u32, h: u32, px: [u8; 4]) -> Self {
        let data = px.repeat(w as usize * h as usize);
        Self { w, h, data }
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.w, self.h)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(CHANNELS)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.w && y < self.h, "Pixel ({x}, {y}) out of bounds");
        let i = (y as usize * self.w as usize + x as usize) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(img: RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        Self::new(w, h, img.into_raw())
    }
}

impl From<RasterImage> for RgbaImage {
    fn from(img: RasterImage) -> Self {
        let (w, h) = img.dimensions();
        // Length invariant guarantees the buffer fits
        RgbaImage::from_raw(w, h, img.data).unwrap_or_else(|| RgbaImage::new(w, h))
    }
}
