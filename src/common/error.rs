use thiserror::Error;

/// Remediation hint shown when neither the raw nor the binarized image yields a symbol.
pub const NO_SYMBOL_HINT: &str =
    "no valid symbol found; try a simpler dot style or higher contrast";

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum QRError {
    // QR builder
    #[error("Empty data")]
    EmptyData,
    #[error("Data too long")]
    DataTooLong,
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid dot shape: {0}")]
    InvalidDotShape(String),
    #[error("Invalid error correction level: {0}")]
    InvalidECLevel(String),
    #[error("Invalid export format: {0}")]
    InvalidExportFormat(String),
    #[error("Invalid size: {0}px")]
    InvalidSize(u32),
    #[error("Invalid logo: {0}")]
    InvalidLogo(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("Export failed: {0}")]
    Export(String),

    // QR reader
    #[error("Unreadable image: {0}")]
    UnreadableImage(String),
    #[error("{}", NO_SYMBOL_HINT)]
    NoSymbolFound,

    // Settings
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),
    #[error("Settings error: {0}")]
    Settings(String),
}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;

    #[test]
    fn test_no_symbol_message() {
        assert_eq!(
            QRError::NoSymbolFound.to_string(),
            "no valid symbol found; try a simpler dot style or higher contrast"
        );
    }

    #[test]
    fn test_unreadable_message() {
        let err = QRError::UnreadableImage("empty file".to_string());
        assert_eq!(err.to_string(), "Unreadable image: empty file");
    }
}
