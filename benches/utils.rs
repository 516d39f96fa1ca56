use std::collections::BTreeMap;
use std::ops::AddAssign;
use std::path::Path;

use walkdir::DirEntry;

// Dataset
//------------------------------------------------------------------------------

/// Any file whose extension `image` maps to a known format.
pub fn is_image_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && image::ImageFormat::from_path(entry.path()).is_ok()
}

/// Folder of `path` relative to the dataset root, `.` for images at the top level.
pub fn folder_of(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    match rel.parent().map(|p| p.to_string_lossy().into_owned()) {
        Some(p) if !p.is_empty() => p,
        _ => ".".to_string(),
    }
}

/// Expected payload stored next to the image as `<stem>.txt`. Missing file means unknown.
pub fn expected_payload(img_path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(img_path.with_extension("txt")).ok()?;
    Some(content.lines().collect::<Vec<_>>().join("\n"))
}

// Stats
//------------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub struct FolderStats {
    pub images: u32,
    pub raw: u32,
    pub rescued: u32,
    pub passed: u32,
    pub micros: u128,
}

impl FolderStats {
    pub fn read_rate(&self) -> f64 {
        pct(self.raw + self.rescued, self.images)
    }

    pub fn rescue_rate(&self) -> f64 {
        pct(self.rescued, self.raw + self.rescued)
    }

    pub fn avg_micros(&self) -> u128 {
        self.micros / self.images.max(1) as u128
    }
}

impl AddAssign for FolderStats {
    fn add_assign(&mut self, rhs: Self) {
        self.images += rhs.images;
        self.raw += rhs.raw;
        self.rescued += rhs.rescued;
        self.passed += rhs.passed;
        self.micros += rhs.micros;
    }
}

fn pct(n: u32, d: u32) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 * 100.0 / d as f64
    }
}

// Report
//------------------------------------------------------------------------------

const COLUMNS: [&str; 8] =
    ["Folder", "images", "raw", "rescued", "passed", "read %", "rescue %", "avg us"];

pub fn print_report(stats: &BTreeMap<String, FolderStats>) {
    let w = 12;
    let divider = "-".repeat(COLUMNS.len() * (w + 3) + 1);

    let row = |cells: [String; 8]| {
        let body: Vec<String> = cells.iter().map(|c| format!(" {c:<w$} ")).collect();
        println!("|{}|", body.join("|"));
    };

    println!("{divider}");
    row(COLUMNS.map(String::from));
    println!("{divider}");

    let mut total = FolderStats::default();
    for (folder, s) in stats {
        total += *s;
        row(cells(folder, s));
    }
    println!("{divider}");
    row(cells("total", &total));
    println!("{divider}");
}

fn cells(name: &str, s: &FolderStats) -> [String; 8] {
    [
        name.to_string(),
        s.images.to_string(),
        s.raw.to_string(),
        s.rescued.to_string(),
        s.passed.to_string(),
        format!("{:.1}", s.read_rate()),
        format!("{:.1}", s.rescue_rate()),
        s.avg_micros().to_string(),
    ]
}
