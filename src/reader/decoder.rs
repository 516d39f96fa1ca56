use log::debug;
use rqrr::PreparedImage;

use crate::common::CHANNELS;

// Decoded symbol
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolMeta {
    pub version: usize,
    pub ec_level: u16,
    pub mask: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    pub payload: String,
    pub meta: SymbolMeta,
}

// Decode primitive
// Takes interleaved RGBA8 pixels plus dimensions and returns the first symbol it can read,
// or None if nothing decodes. Implementations must be deterministic for identical input.
//------------------------------------------------------------------------------

pub trait SymbolDecoder {
    fn decode(&self, rgba: &[u8], w: u32, h: u32) -> Option<DecodedSymbol>;
}

/// Detector and decoder backed by `rqrr`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl SymbolDecoder for RqrrDecoder {
    fn decode(&self, rgba: &[u8], w: u32, h: u32) -> Option<DecodedSymbol> {
        let (w, h) = (w as usize, h as usize);
        if w == 0 || h == 0 || rgba.len() < w * h * CHANNELS {
            return None;
        }

        let gray = to_luma(rgba);
        let mut img = PreparedImage::prepare_from_greyscale(w, h, |x, y| gray[y * w + x]);
        let grids = img.detect_grids();
        debug!("Detected {} candidate grid(s)", grids.len());

        grids.iter().find_map(|g| match g.decode() {
            Ok((meta, payload)) => Some(DecodedSymbol {
                payload,
                meta: SymbolMeta {
                    version: meta.version.0,
                    ec_level: meta.ecc_level,
                    mask: meta.mask,
                },
            }),
            Err(e) => {
                debug!("Grid rejected: {e:?}");
                None
            }
        })
    }
}

// ITU-R BT.601 luminance in integer form, (77R + 150G + 29B) >> 8. Transparent pixels are
// composited over white so an alpha-only logo doesn't read as dark.
fn to_luma(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(CHANNELS)
        .map(|p| {
            let y = (77 * p[0] as u32 + 150 * p[1] as u32 + 29 * p[2] as u32) >> 8;
            let a = p[3] as u32;
            ((y * a + 255 * (255 - a)) / 255) as u8
        })
        .collect()
}
