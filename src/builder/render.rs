use std::cmp;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use super::matrix::ModuleMatrix;
use crate::common::{Color, DotShape};

/// Light border around the symbol, in modules.
pub const QUIET_ZONE: u32 = 4;

/// Logo box edge as a fraction of the symbol's edge.
pub const LOGO_SIZE_RATIO: f32 = 0.3;

/// Pixels of hidden modules kept clear around the logo.
pub const LOGO_MARGIN: u32 = 8;

// Style
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub dot: Color,
    pub bg: Color,
    pub shape: DotShape,
}

// Layout
// Module size is the largest integer that fits symbol + quiet zone into the requested
// canvas. Leftover pixels are split evenly so the symbol stays centered. A canvas too small
// for 1px modules grows to fit.
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub canvas: u32,
    pub module: u32,
    pub offset: u32,
}

impl Layout {
    pub fn new(modules: u32, size: u32) -> Self {
        let total = modules + 2 * QUIET_ZONE;
        let module = cmp::max(1, size / total);
        let canvas = cmp::max(size, total * module);
        let offset = (canvas - modules * module) / 2;
        Self { canvas, module, offset }
    }

    pub fn symbol_px(&self, modules: u32) -> u32 {
        modules * self.module
    }
}

// Box in canvas pixels, [x0, x1) x [y0, y1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PxBox {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PxBox {
    fn overlaps(&self, other: &PxBox) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

// Render
//------------------------------------------------------------------------------

pub fn render(
    matrix: &ModuleMatrix,
    style: &Style,
    logo: Option<&RgbaImage>,
    size: u32,
) -> RgbaImage {
    let w = matrix.width() as u32;
    let layout = Layout::new(w, size);
    let mut canvas = RgbaImage::from_pixel(layout.canvas, layout.canvas, style.bg.to_rgba());

    let logo = logo.map(|l| fit_logo(l, layout.symbol_px(w)));
    let hidden = logo.as_ref().map(|(img, x, y)| PxBox {
        x0: x.saturating_sub(LOGO_MARGIN),
        y0: y.saturating_sub(LOGO_MARGIN),
        x1: x + img.width() + LOGO_MARGIN,
        y1: y + img.height() + LOGO_MARGIN,
    });
    // Logo coordinates are relative to the symbol, shift onto the canvas
    let hidden = hidden.map(|b| PxBox {
        x0: b.x0 + layout.offset,
        y0: b.y0 + layout.offset,
        x1: b.x1 + layout.offset,
        y1: b.y1 + layout.offset,
    });

    let color = style.dot.to_rgba();
    let s = layout.module;
    for r in 0..w as i32 {
        for c in 0..w as i32 {
            if !matrix.get(r, c) {
                continue;
            }

            let x0 = layout.offset + c as u32 * s;
            let y0 = layout.offset + r as u32 * s;

            if matrix.is_finder(r, c) {
                let rect = Rect::at(x0 as i32, y0 as i32).of_size(s, s);
                draw_filled_rect_mut(&mut canvas, rect, color);
                continue;
            }

            let cell = PxBox { x0, y0, x1: x0 + s, y1: y0 + s };
            if hidden.is_some_and(|h| h.overlaps(&cell)) {
                continue;
            }

            draw_dot(&mut canvas, matrix, style.shape, r, c, (x0, y0, s), color);
        }
    }

    if let Some((img, x, y)) = logo {
        let (x, y) = (x + layout.offset, y + layout.offset);
        imageops::overlay(&mut canvas, &img, x as i64, y as i64);
    }

    canvas
}

// Resizes logo to fit within the logo box, keeping aspect ratio, and returns it with its
// top left corner relative to the symbol origin
fn fit_logo(logo: &RgbaImage, symbol_px: u32) -> (RgbaImage, u32, u32) {
    let (lw, lh) = logo.dimensions();
    let max_edge = cmp::max(1, (symbol_px as f32 * LOGO_SIZE_RATIO) as u32);
    let scale = f32::min(max_edge as f32 / lw as f32, max_edge as f32 / lh as f32);
    let nw = cmp::max(1, (lw as f32 * scale).round() as u32);
    let nh = cmp::max(1, (lh as f32 * scale).round() as u32);

    let resized = imageops::resize(logo, nw, nh, FilterType::Lanczos3);
    let x = symbol_px.saturating_sub(nw) / 2;
    let y = symbol_px.saturating_sub(nh) / 2;
    (resized, x, y)
}

// Dot shapes
//------------------------------------------------------------------------------

// Corner radii as fractions of module size, ordered top-left, top-right, bottom-right,
// bottom-left. A corner may only round off if both of its sides are free of dark neighbors.
fn corner_radii(matrix: &ModuleMatrix, shape: DotShape, r: i32, c: i32) -> [f32; 4] {
    let top = matrix.get(r - 1, c);
    let bottom = matrix.get(r + 1, c);
    let left = matrix.get(r, c - 1);
    let right = matrix.get(r, c + 1);
    let free = [!top && !left, !top && !right, !bottom && !right, !bottom && !left];

    let rule: [f32; 4] = match shape {
        DotShape::Square | DotShape::Dots => [0.0; 4],
        DotShape::Rounded => [0.3; 4],
        DotShape::ExtraRounded => [0.5; 4],
        DotShape::Classy => [0.5, 0.0, 0.5, 0.0],
        DotShape::ClassyRounded => [0.5, 0.25, 0.5, 0.25],
    };

    let mut radii = [0.0; 4];
    for i in 0..4 {
        if free[i] {
            radii[i] = rule[i];
        }
    }
    radii
}

fn draw_dot(
    canvas: &mut RgbaImage,
    matrix: &ModuleMatrix,
    shape: DotShape,
    r: i32,
    c: i32,
    (x0, y0, s): (u32, u32, u32),
    color: Rgba<u8>,
) {
    match shape {
        DotShape::Square => {
            draw_filled_rect_mut(canvas, Rect::at(x0 as i32, y0 as i32).of_size(s, s), color)
        }
        DotShape::Dots => {
            let half = (s as i32 - 1) / 2;
            let center = (x0 as i32 + half, y0 as i32 + half);
            draw_filled_circle_mut(canvas, center, half, color);
        }
        _ => {
            let radii = corner_radii(matrix, shape, r, c);
            fill_rounded_cell(canvas, (x0, y0, s), radii, color);
        }
    }
}

// Fills a module cell, carving out circular corners. Pixel centers are tested against the
// circle of each rounded corner.
fn fill_rounded_cell(
    canvas: &mut RgbaImage,
    (x0, y0, s): (u32, u32, u32),
    radii: [f32; 4],
    color: Rgba<u8>,
) {
    let sf = s as f32;
    let [tl, tr, br, bl] = radii.map(|f| f * sf);

    let outside = |px: f32, py: f32, cx: f32, cy: f32, rad: f32| {
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy > rad * rad
    };

    for dy in 0..s {
        for dx in 0..s {
            let (px, py) = (dx as f32 + 0.5, dy as f32 + 0.5);

            let carved = (px < tl && py < tl && outside(px, py, tl, tl, tl))
                || (px > sf - tr && py < tr && outside(px, py, sf - tr, tr, tr))
                || (px > sf - br && py > sf - br && outside(px, py, sf - br, sf - br, br))
                || (px < bl && py > sf - bl && outside(px, py, bl, sf - bl, bl));

            if !carved {
                canvas.put_pixel(x0 + dx, y0 + dy, color);
            }
        }
    }
}

#[cfg(test)]
mod render_tests {
    use image::{Rgba, RgbaImage};
    use test_case::test_case;

    use super::{corner_radii, fill_rounded_cell, render, Layout, Style, QUIET_ZONE};
    use crate::builder::matrix::ModuleMatrix;
    use crate::common::{Color, DotShape};

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn style(shape: DotShape) -> Style {
        Style { dot: Color::rgb(0, 0, 0), bg: Color::rgb(255, 255, 255), shape }
    }

    // 21x21 grid with a single isolated module in the middle, clear of finder zones
    fn lone_module() -> ModuleMatrix {
        let mut grid = vec![false; 21 * 21];
        grid[10 * 21 + 10] = true;
        ModuleMatrix::new(21, grid)
    }

    #[test_case(21, 400, Layout { canvas: 400, module: 13, offset: 63 })]
    #[test_case(25, 400, Layout { canvas: 400, module: 12, offset: 50 })]
    #[test_case(177, 100, Layout { canvas: 185, module: 1, offset: 4 })]
    fn test_layout(modules: u32, size: u32, exp: Layout) {
        let layout = Layout::new(modules, size);
        assert_eq!(layout, exp);
        assert!(layout.offset >= QUIET_ZONE * layout.module);
    }

    #[test]
    fn test_square_fills_cell() {
        let img = render(&lone_module(), &style(DotShape::Square), None, 290);
        let layout = Layout::new(21, 290);
        let (x0, y0) = (layout.offset + 10 * layout.module, layout.offset + 10 * layout.module);
        assert_eq!(*img.get_pixel(x0, y0), BLACK);
        assert_eq!(*img.get_pixel(x0 + layout.module - 1, y0 + layout.module - 1), BLACK);
        assert_eq!(*img.get_pixel(x0 - 1, y0), WHITE);
        assert_eq!(img.dimensions(), (290, 290));
    }

    #[test_case(DotShape::Rounded)]
    #[test_case(DotShape::ExtraRounded)]
    #[test_case(DotShape::Dots)]
    fn test_lone_module_corners_carved(shape: DotShape) {
        let img = render(&lone_module(), &style(shape), None, 290);
        let layout = Layout::new(21, 290);
        let s = layout.module;
        let (x0, y0) = (layout.offset + 10 * s, layout.offset + 10 * s);

        assert_eq!(*img.get_pixel(x0, y0), WHITE);
        assert_eq!(*img.get_pixel(x0 + s - 1, y0 + s - 1), WHITE);
        assert_eq!(*img.get_pixel(x0 + s / 2, y0 + s / 2), BLACK);
    }

    #[test]
    fn test_classy_rounds_diagonal_only() {
        let radii = corner_radii(&lone_module(), DotShape::Classy, 10, 10);
        assert_eq!(radii, [0.5, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_neighbors_keep_corners_square() {
        let mut grid = vec![false; 21 * 21];
        grid[10 * 21 + 10] = true;
        grid[10 * 21 + 11] = true;
        let m = ModuleMatrix::new(21, grid);

        // Right neighbor blocks the right-hand corners
        assert_eq!(corner_radii(&m, DotShape::ExtraRounded, 10, 10), [0.5, 0.0, 0.0, 0.5]);
        assert_eq!(corner_radii(&m, DotShape::ClassyRounded, 10, 11), [0.0, 0.25, 0.5, 0.0]);
    }

    #[test]
    fn test_fill_rounded_cell_without_radii_is_square() {
        let mut img = RgbaImage::from_pixel(4, 4, WHITE);
        fill_rounded_cell(&mut img, (0, 0, 4), [0.0; 4], BLACK);
        assert!(img.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_finders_always_square() {
        let mut grid = vec![false; 21 * 21];
        grid[0] = true;
        let m = ModuleMatrix::new(21, grid);
        let img = render(&m, &style(DotShape::Dots), None, 290);
        let layout = Layout::new(21, 290);
        assert_eq!(*img.get_pixel(layout.offset, layout.offset), BLACK);
    }

    #[test]
    fn test_logo_hides_modules() {
        let m = ModuleMatrix::new(21, vec![true; 21 * 21]);
        let logo = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let img = render(&m, &style(DotShape::Square), Some(&logo), 290);

        let center = img.width() / 2;
        let px = img.get_pixel(center, center);
        assert!(px[0] > 200 && px[1] < 50 && px[2] < 50, "Expected logo at center, got {px:?}");

        // Margin ring around the logo is background
        let layout = Layout::new(21, 290);
        let logo_edge = (layout.symbol_px(21) as f32 * 0.3) as u32;
        let ring_x = layout.offset + (layout.symbol_px(21) - logo_edge) / 2 - 2;
        assert_eq!(*img.get_pixel(ring_x, center), WHITE);
    }
}
