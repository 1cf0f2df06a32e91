//! RGB canvas for drawing detections over the source image.
use super::io::{ensure_parent_dir, GrayImageU8};
use crate::mask::EdgeMask;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::path::Path;

pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const YELLOW: [u8; 3] = [255, 255, 0];

pub struct Overlay {
    canvas: RgbImage,
}

impl Overlay {
    /// Start from a grayscale image replicated into all three channels.
    pub fn from_gray(gray: &GrayImageU8) -> Self {
        let (w, h) = (gray.width() as u32, gray.height() as u32);
        let data = gray.as_slice();
        let canvas = RgbImage::from_fn(w, h, |x, y| {
            let v = data[y as usize * gray.width() + x as usize];
            Rgb([v, v, v])
        });
        Self { canvas }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Colour `(x, y)` if it lies inside the canvas.
    pub fn plot(&mut self, x: i32, y: i32, color: [u8; 3]) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.canvas.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.canvas.get_pixel(x, y).0
    }

    /// Tint every foreground pixel of `mask`.
    pub fn draw_mask(&mut self, mask: &EdgeMask, color: [u8; 3]) {
        for (x, y) in mask.foreground() {
            self.plot(x as i32, y as i32, color);
        }
    }

    /// Straight segment between two `[x, y]` points, clipped to the canvas.
    pub fn draw_segment(&mut self, p0: [f32; 2], p1: [f32; 2], color: [u8; 3]) {
        draw_line_segment_mut(
            &mut self.canvas,
            (p0[0], p0[1]),
            (p1[0], p1[1]),
            Rgb(color),
        );
    }

    /// Circle outline centred at `(row, col)`.
    pub fn draw_circle(&mut self, row: i32, col: i32, radius: i32, color: [u8; 3]) {
        draw_hollow_circle_mut(&mut self.canvas, (col, row), radius.max(0), Rgb(color));
    }

    /// Filled square marker of half-size `half` centred at `(x, y)`.
    pub fn draw_marker(&mut self, x: i32, y: i32, half: i32, color: [u8; 3]) {
        let half = half.clamp(0, 1 << 15);
        let side = (2 * half + 1) as u32;
        let rect = Rect::at(x - half, y - half).of_size(side, side);
        draw_filled_rect_mut(&mut self.canvas, rect, Rgb(color));
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        ensure_parent_dir(path)?;
        self.canvas
            .save(path)
            .map_err(|e| format!("Failed to save {}: {e}", path.display()))
    }
}
