use std::fmt::{Display, Formatter};
use std::str::FromStr;

use image::{ImageFormat, Rgba};

use super::error::{QRError, QRResult};

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    #[default]
    H = 3,
}

impl FromStr for ECLevel {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel(s.to_string())),
        }
    }
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}

// Dot shape
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum DotShape {
    #[default]
    Square,
    Rounded,
    ExtraRounded,
    Dots,
    Classy,
    ClassyRounded,
}

impl DotShape {
    pub const ALL: [DotShape; 6] = [
        Self::Square,
        Self::Rounded,
        Self::ExtraRounded,
        Self::Dots,
        Self::Classy,
        Self::ClassyRounded,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Rounded => "rounded",
            Self::ExtraRounded => "extra-rounded",
            Self::Dots => "dots",
            Self::Classy => "classy",
            Self::ClassyRounded => "classy-rounded",
        }
    }
}

impl FromStr for DotShape {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        match norm.as_str() {
            "square" => Ok(Self::Square),
            "rounded" => Ok(Self::Rounded),
            "extra-rounded" | "smooth" => Ok(Self::ExtraRounded),
            "dots" | "dotted" => Ok(Self::Dots),
            "classy" | "modern" => Ok(Self::Classy),
            "classy-rounded" => Ok(Self::ClassyRounded),
            _ => Err(QRError::InvalidDotShape(s.to_string())),
        }
    }
}

impl Display for DotShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// Export format
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    WebP,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::WebP => "webp",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::WebP => ImageFormat::WebP,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::WebP),
            _ => Err(QRError::InvalidExportFormat(s.to_string())),
        }
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Named dot colors offered next to the free-form picker.
pub const PRESET_COLORS: [(&str, Color); 8] = [
    ("Black", Color::rgb(0x00, 0x00, 0x00)),
    ("Orange", Color::rgb(0xFF, 0x6B, 0x35)),
    ("Facebook", Color::rgb(0x18, 0x77, 0xF2)),
    ("Instagram", Color::rgb(0xE4, 0x40, 0x5F)),
    ("YouTube", Color::rgb(0xFF, 0x00, 0x00)),
    ("WhatsApp", Color::rgb(0x25, 0xD3, 0x66)),
    ("Purple", Color::rgb(0x7B, 0x68, 0xEE)),
    ("Hot Pink", Color::rgb(0xFF, 0x14, 0x93)),
];

impl Color {
    pub const DEFAULT_DOT: Color = Color::rgb(0x0f, 0x17, 0x2a);
    pub const DEFAULT_BACKGROUND: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn preset(name: &str) -> Option<Self> {
        let name = name.trim().replace(['-', '_'], " ");
        PRESET_COLORS.iter().find(|(n, _)| n.eq_ignore_ascii_case(&name)).map(|(_, c)| *c)
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut c = hex.chars().map(|ch| ch.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self::rgb(c.next()??, c.next()??, c.next()??))
            }
            6 => Some(Self::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        let trimmed = s.trim();
        let parsed = match trimmed.strip_prefix('#') {
            Some(hex) => Self::parse_hex(hex),
            None => Self::preset(trimmed),
        };
        parsed.ok_or_else(|| QRError::InvalidColor(s.to_string()))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
