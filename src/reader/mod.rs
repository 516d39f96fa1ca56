pub mod binarize;
pub mod decoder;
pub mod loader;
pub mod payload;

use std::path::Path;

use log::{debug, info, warn};

use crate::common::{QRError, QRResult, RasterImage};
pub use binarize::{Binarize, DEFAULT_THRESHOLD};
pub use decoder::{DecodedSymbol, RqrrDecoder, SymbolDecoder, SymbolMeta};
pub use loader::{FormatLoader, ImageLoader};
pub use payload::is_web_address;

/// Upper bound on decoder calls per scan: one raw pass plus one binarized retry.
pub const MAX_DECODE_ATTEMPTS: u8 = 2;

// Reader config
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Cutoff used by the binarized retry.
    pub threshold: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD }
    }
}

// Scan outcome
//------------------------------------------------------------------------------

/// Which pass produced the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Raw,
    Binarized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub payload: String,
    pub meta: SymbolMeta,
    pub attempt: Attempt,
    pub decode_calls: u8,
}

impl ScanReport {
    pub fn is_web_address(&self) -> bool {
        is_web_address(&self.payload)
    }
}

// Decode state machine
// Initial -> Attempt1 -> (Success | Attempt2) -> (Success | Failure)
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeState {
    Initial,
    Attempt1,
    Attempt2,
    Success(ScanReport),
    Failure(QRError),
}

impl DecodeState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure(_))
    }
}

// QR reader
//------------------------------------------------------------------------------

/// Stateless scan pipeline: load, decode raw, binarize and decode once more on failure.
#[derive(Debug, Clone)]
pub struct QRReader<L = FormatLoader, D = RqrrDecoder> {
    loader: L,
    decoder: D,
    config: ReaderConfig,
}

impl QRReader {
    pub fn new() -> Self {
        Self::with_parts(FormatLoader, RqrrDecoder, ReaderConfig::default())
    }
}

impl Default for QRReader {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ImageLoader, D: SymbolDecoder> QRReader<L, D> {
    pub fn with_parts(loader: L, decoder: D, config: ReaderConfig) -> Self {
        Self { loader, decoder, config }
    }

    pub fn threshold(mut self, threshold: u8) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn scan_path(&self, path: &Path) -> QRResult<ScanReport> {
        info!("Scanning {}...", path.display());
        let img = self.loader.load_path(path)?;
        self.scan(&img)
    }

    pub fn scan_bytes(&self, bytes: &[u8]) -> QRResult<ScanReport> {
        info!("Scanning {} bytes...", bytes.len());
        let img = self.loader.load(bytes)?;
        self.scan(&img)
    }

    pub fn scan(&self, img: &RasterImage) -> QRResult<ScanReport> {
        let (w, h) = img.dimensions();
        debug!("Decoding {w}x{h} image, threshold {}", self.config.threshold);

        let mut calls = 0;
        let mut state = DecodeState::Initial;
        while !state.is_terminal() {
            state = self.step(state, img, &mut calls);
            debug!("Decode state -> {state:?}");
        }

        match state {
            DecodeState::Success(report) => Ok(report),
            DecodeState::Failure(err) => Err(err),
            _ => unreachable!("loop exits only on a terminal state"),
        }
    }

    fn step(&self, state: DecodeState, img: &RasterImage, calls: &mut u8) -> DecodeState {
        match state {
            DecodeState::Initial => DecodeState::Attempt1,
            DecodeState::Attempt1 => match self.attempt(img, Attempt::Raw, calls) {
                Some(report) => DecodeState::Success(report),
                None => {
                    warn!("No symbol in raw image, retrying with binarized pixels");
                    DecodeState::Attempt2
                }
            },
            DecodeState::Attempt2 => {
                let bin = img.binarize(self.config.threshold);
                match self.attempt(&bin, Attempt::Binarized, calls) {
                    Some(report) => DecodeState::Success(report),
                    None => DecodeState::Failure(QRError::NoSymbolFound),
                }
            }
            terminal => terminal,
        }
    }

    fn attempt(&self, img: &RasterImage, attempt: Attempt, calls: &mut u8) -> Option<ScanReport> {
        debug_assert!(*calls < MAX_DECODE_ATTEMPTS, "Decoder called more than twice");
        *calls += 1;

        let (w, h) = img.dimensions();
        let sym = self.decoder.decode(img.data(), w, h)?;
        info!("Decoded {} byte payload on {attempt:?} attempt", sym.payload.len());
        Some(ScanReport { payload: sym.payload, meta: sym.meta, attempt, decode_calls: *calls })
    }
}
