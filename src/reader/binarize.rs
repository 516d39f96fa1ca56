use crate::common::{RasterImage, CHANNELS};

/// Cutoff on the 0-255 scale above which a pixel's RGB mean becomes white.
pub const DEFAULT_THRESHOLD: u8 = 140;

// Global threshold binarization
// For every pixel the unweighted mean of R, G & B is compared against a fixed threshold.
// Mean above threshold turns the pixel white, otherwise black. A mean exactly equal to the
// threshold is black. Compared as R + G + B > 3 * threshold to stay in integers. Alpha is
// left untouched.
//------------------------------------------------------------------------------

pub trait Binarize {
    fn binarize(&self, threshold: u8) -> Self;
}

impl Binarize for RasterImage {
    fn binarize(&self, threshold: u8) -> Self {
        let cutoff = threshold as u16 * 3;
        let mut buffer = Vec::with_capacity(self.data().len());

        for px in self.pixels() {
            let sum = px[0] as u16 + px[1] as u16 + px[2] as u16;
            let v = if sum > cutoff { 255 } else { 0 };
            buffer.extend_from_slice(&[v, v, v, px[3]]);
        }

        debug_assert_eq!(buffer.len() % CHANNELS, 0);
        RasterImage::new(self.width(), self.height(), buffer)
    }
}
