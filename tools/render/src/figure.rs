//! Raster figure: a white RGB canvas sized in inches at a given dpi.

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::{Rgb, RgbImage};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Largest canvas accepted, in pixels (about 300 MB of RGB).
pub const MAX_PIXELS: u64 = 100_000_000;

/// Physical figure size. 6×3 in at 100 dpi gives 600×300 px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self { width_in: 6.0, height_in: 3.0, dpi: 100.0 }
    }
}

impl FigureSize {
    /// Pixel dimensions, rounded to the nearest pixel.
    pub fn pixels(&self) -> Result<(u32, u32)> {
        let w = (self.width_in * self.dpi).round();
        let h = (self.height_in * self.dpi).round();
        if !(w >= 1.0 && h >= 1.0) || w > u32::MAX as f64 || h > u32::MAX as f64 {
            bail!(
                "figure {}x{} in at {} dpi has no drawable pixels",
                self.width_in,
                self.height_in,
                self.dpi
            );
        }
        let (w, h) = (w as u32, h as u32);
        let pixels = w as u64 * h as u64;
        if pixels > MAX_PIXELS {
            bail!("figure of {w}x{h} px exceeds the {MAX_PIXELS} pixel limit");
        }
        Ok((w, h))
    }
}

/// Pixel rectangle `[x, x + w) × [y, y + h)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub fn contains(&self, px: i64, py: i64) -> bool {
        px >= self.x as i64
            && py >= self.y as i64
            && px < (self.x + self.w) as i64
            && py < (self.y + self.h) as i64
    }
}

pub struct Figure {
    pub img: RgbImage,
}

impl Figure {
    pub fn new(size: FigureSize) -> Result<Self> {
        let (w, h) = size.pixels()?;
        Ok(Self { img: RgbImage::from_pixel(w, h, WHITE) })
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// Bresenham line, clipped to `clip`.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb<u8>, clip: PixelRect) {
        let (mut x0, mut y0) = (from.0.floor() as i64, from.1.floor() as i64);
        let (x1, y1) = (to.0.floor() as i64, to.1.floor() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if clip.contains(x0, y0) {
                self.img.put_pixel(x0 as u32, y0 as u32, color);
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// One-pixel outline just inside `rect`.
    pub fn draw_frame(&mut self, rect: PixelRect, color: Rgb<u8>) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        let (l, t) = (rect.x as f64, rect.y as f64);
        let r = (rect.x + rect.w - 1) as f64;
        let b = (rect.y + rect.h - 1) as f64;
        self.draw_line((l, t), (r, t), color, rect);
        self.draw_line((r, t), (r, b), color, rect);
        self.draw_line((r, b), (l, b), color, rect);
        self.draw_line((l, b), (l, t), color, rect);
    }

    /// Encode as PNG (format taken from the extension).
    pub fn save(&self, path: &Path) -> Result<()> {
        create_parent_dir(path)?;
        self.img
            .save(path)
            .with_context(|| format!("failed to save {}", path.display()))
    }
}

/// Create the directory an output file will be written into.
pub fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    }
    Ok(())
}
