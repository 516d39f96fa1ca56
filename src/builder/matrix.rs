use log::debug;
use qrcode::types::QrError;
use qrcode::QrCode;

use crate::common::{ECLevel, QRError, QRResult};

/// Side length of a finder pattern in modules.
pub const FINDER_SIZE: i32 = 7;

// Module matrix
//------------------------------------------------------------------------------

/// Square grid of dark (`true`) and light modules, row-major, without quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    w: usize,
    grid: Vec<bool>,
}

impl ModuleMatrix {
    pub fn new(w: usize, grid: Vec<bool>) -> Self {
        assert_eq!(w * w, grid.len(), "Module grid is not {w}x{w}");
        Self { w, grid }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    /// Dark check that treats everything outside the symbol as light.
    pub fn get(&self, r: i32, c: i32) -> bool {
        let w = self.w as i32;
        if r < 0 || c < 0 || r >= w || c >= w {
            return false;
        }
        self.grid[(r * w + c) as usize]
    }

    pub fn is_finder(&self, r: i32, c: i32) -> bool {
        let far = self.w as i32 - FINDER_SIZE;
        let near = |v: i32| (0..FINDER_SIZE).contains(&v);
        let tail = |v: i32| (far..far + FINDER_SIZE).contains(&v);
        (near(r) && near(c)) || (near(r) && tail(c)) || (tail(r) && near(c))
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i32;
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for r in 0..w {
            for c in 0..w {
                res.push(match (self.get(r, c), self.is_finder(r, c)) {
                    (true, true) => 'f',
                    (false, true) => 'F',
                    (true, false) => 'd',
                    (false, false) => '.',
                });
            }
            res.push('\n');
        }
        res
    }
}

// Encode primitive
// Turns payload bytes into a module matrix at the requested error correction level. The
// smallest version that fits is chosen by the encoder.
//------------------------------------------------------------------------------

pub trait SymbolEncoder {
    fn encode(&self, data: &[u8], ecl: ECLevel) -> QRResult<ModuleMatrix>;
}

/// Encoder backed by the `qrcode` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrcodeEncoder;

impl SymbolEncoder for QrcodeEncoder {
    fn encode(&self, data: &[u8], ecl: ECLevel) -> QRResult<ModuleMatrix> {
        let code = QrCode::with_error_correction_level(data, ecl.into()).map_err(|e| match e {
            QrError::DataTooLong => QRError::DataTooLong,
            e => QRError::Encode(e.to_string()),
        })?;
        debug!("Encoded {} bytes as {:?} at {ecl:?}", data.len(), code.version());

        let w = code.width();
        let grid = code.to_colors().into_iter().map(|c| c == qrcode::Color::Dark).collect();
        Ok(ModuleMatrix::new(w, grid))
    }
}
