pub mod export;
pub mod matrix;
pub mod render;

use std::path::Path;

use image::RgbaImage;
use log::{debug, info};

pub use export::default_file_name;
pub use matrix::{ModuleMatrix, QrcodeEncoder, SymbolEncoder};
pub use render::{Layout, Style};

use crate::common::{Color, DotShape, ECLevel, ExportFormat, QRError, QRResult};
use crate::reader::{FormatLoader, ImageLoader};

/// Native edge length of the rendered symbol in pixels.
pub const DEFAULT_SIZE: u32 = 400;

/// Largest accepted edge length in pixels.
pub const MAX_SIZE: u32 = 8192;

// QR builder
//------------------------------------------------------------------------------

pub struct QRBuilder<'a> {
    data: &'a str,
    dot_color: Color,
    bg_color: Color,
    dot_shape: DotShape,
    logo: Option<&'a RgbaImage>,
    ec_level: ECLevel,
    size: u32,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            dot_color: Color::DEFAULT_DOT,
            bg_color: Color::DEFAULT_BACKGROUND,
            dot_shape: DotShape::default(),
            logo: None,
            ec_level: ECLevel::default(),
            size: DEFAULT_SIZE,
        }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn dot_color(&mut self, color: Color) -> &mut Self {
        self.dot_color = color;
        self
    }

    pub fn bg_color(&mut self, color: Color) -> &mut Self {
        self.bg_color = color;
        self
    }

    pub fn dot_shape(&mut self, shape: DotShape) -> &mut Self {
        self.dot_shape = shape;
        self
    }

    pub fn logo(&mut self, logo: &'a RgbaImage) -> &mut Self {
        self.logo = Some(logo);
        self
    }

    pub fn unset_logo(&mut self) -> &mut Self {
        self.logo = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn size(&mut self, size: u32) -> &mut Self {
        self.size = size;
        self
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Shape: {}, Dot: {}, Background: {}, Ec level: {:?}, Logo: {} }}",
            self.dot_shape,
            self.dot_color,
            self.bg_color,
            self.ec_level,
            self.logo.is_some()
        )
    }
}

impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<StyledQR> {
        self.build_with(&QrcodeEncoder)
    }

    pub fn build_with<E: SymbolEncoder>(&self, encoder: &E) -> QRResult<StyledQR> {
        info!("Generating QR {}...", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }
        if !(1..=MAX_SIZE).contains(&self.size) {
            return Err(QRError::InvalidSize(self.size));
        }
        if let Some(logo) = self.logo {
            if logo.width() == 0 || logo.height() == 0 {
                return Err(QRError::InvalidLogo("logo has no pixels".to_string()));
            }
        }

        debug!("Encoding {} bytes...", self.data.len());
        let matrix = encoder.encode(self.data.as_bytes(), self.ec_level)?;

        let total = matrix.width() * matrix.width();
        let dark = matrix.count_dark_modules();
        debug!(
            "Modules: {}x{}, Dark: {dark}, Light: {}, Balance: {}%",
            matrix.width(),
            matrix.width(),
            total - dark,
            dark * 100 / total
        );

        Ok(StyledQR {
            matrix,
            style: Style { dot: self.dot_color, bg: self.bg_color, shape: self.dot_shape },
            logo: self.logo.cloned(),
            ec_level: self.ec_level,
            size: self.size,
        })
    }
}

/// Opens a logo image from disk. Anything that fails to load is an `InvalidLogo`.
pub fn open_logo(path: &Path) -> QRResult<RgbaImage> {
    FormatLoader.load_path(path).map(RgbaImage::from).map_err(|e| match e {
        QRError::UnreadableImage(reason) => QRError::InvalidLogo(reason),
        e => e,
    })
}

// Styled QR
//------------------------------------------------------------------------------

/// Encoded symbol plus the styling it is drawn with.
#[derive(Debug, Clone)]
pub struct StyledQR {
    matrix: ModuleMatrix,
    style: Style,
    logo: Option<RgbaImage>,
    ec_level: ECLevel,
    size: u32,
}

impl StyledQR {
    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.matrix.width() as u32, self.size)
    }

    pub fn render(&self) -> RgbaImage {
        debug!("Rendering {} dots at {}px...", self.style.shape, self.size);
        render::render(&self.matrix, &self.style, self.logo.as_ref(), self.size)
    }

    pub fn export(&self, fmt: ExportFormat) -> QRResult<Vec<u8>> {
        export::encode_image(&self.render(), fmt, self.style.bg)
    }

    pub fn save(&self, path: &Path, fmt: ExportFormat) -> QRResult<()> {
        let bytes = self.export(fmt)?;
        std::fs::write(path, bytes)
            .map_err(|e| QRError::Export(format!("{}: {e}", path.display())))?;
        info!("Saved {} to {}", fmt.extension(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod builder_tests {
    use image::{Rgba, RgbaImage};
    use test_case::test_case;

    use super::{open_logo, QRBuilder, DEFAULT_SIZE, MAX_SIZE};
    use crate::common::{Color, DotShape, ECLevel, ExportFormat, QRError};
    use crate::reader::QRReader;

    #[test]
    fn test_metadata() {
        let logo = RgbaImage::new(2, 2);
        let mut builder = QRBuilder::new("https://google.com");
        assert_eq!(
            builder.metadata(),
            "{ Shape: square, Dot: #0f172a, Background: #ffffff, Ec level: H, Logo: false }"
        );
        builder.dot_shape(DotShape::Classy).ec_level(ECLevel::L).logo(&logo);
        assert_eq!(
            builder.metadata(),
            "{ Shape: classy, Dot: #0f172a, Background: #ffffff, Ec level: L, Logo: true }"
        );
        builder.unset_logo();
        assert!(builder.metadata().ends_with("Logo: false }"));
    }

    #[test]
    fn test_empty_data() {
        let err = QRBuilder::new("").build().unwrap_err();
        assert_eq!(err, QRError::EmptyData);
    }

    #[test]
    fn test_empty_logo() {
        let logo = RgbaImage::new(0, 0);
        let err = QRBuilder::new("x").logo(&logo).build().unwrap_err();
        assert!(matches!(err, QRError::InvalidLogo(_)));
    }

    #[test]
    fn test_data_too_long() {
        let data = "A".repeat(5000);
        let err = QRBuilder::new(&data).build().unwrap_err();
        assert_eq!(err, QRError::DataTooLong);
    }

    #[test_case(0)]
    #[test_case(MAX_SIZE + 1)]
    #[test_case(u32::MAX)]
    fn test_invalid_size(size: u32) {
        let err = QRBuilder::new("x").size(size).build().unwrap_err();
        assert_eq!(err, QRError::InvalidSize(size));
    }

    #[test]
    fn test_max_size_accepted() {
        let qr = QRBuilder::new("x").size(MAX_SIZE).build().unwrap();
        assert_eq!(qr.layout().canvas, MAX_SIZE);
    }

    #[test]
    fn test_render_size_and_background() {
        let qr = QRBuilder::new("hello").bg_color(Color::rgb(1, 2, 3)).build().unwrap();
        let img = qr.render();
        assert_eq!(img.dimensions(), (DEFAULT_SIZE, DEFAULT_SIZE));
        assert_eq!(*img.get_pixel(0, 0), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_rebuild_reflects_changes() {
        let mut builder = QRBuilder::new("first");
        let a = builder.build().unwrap();
        builder.data("second, and a bit longer than the first one").size(200);
        let b = builder.build().unwrap();
        assert_ne!(a.matrix(), b.matrix());
        assert_eq!(b.render().width(), 200);
    }

    #[test_case(DotShape::Square)]
    #[test_case(DotShape::Rounded)]
    fn test_render_is_scannable(shape: DotShape) {
        let data = "https://google.com";
        let qr = QRBuilder::new(data).dot_shape(shape).build().unwrap();
        let bytes = qr.export(ExportFormat::Png).unwrap();
        let report = QRReader::new().scan_bytes(&bytes).unwrap();
        assert_eq!(report.payload, data);
    }

    #[test]
    fn test_open_logo_rejects_non_image() {
        let path = std::env::temp_dir().join("smartqr-not-a-logo.png");
        std::fs::write(&path, "plain text").unwrap();
        let err = open_logo(&path).unwrap_err();
        assert!(matches!(err, QRError::InvalidLogo(_)));
        let _ = std::fs::remove_file(path);
    }
}
