//! Max-pool down-sampling used to build the coarse circle-search mask.
//!
//! Thin one-pixel edges must survive decimation, so a coarse cell is
//! foreground when any source pixel in its footprint is foreground.

use super::EdgeMask;

/// A down-sampled mask together with its scale relative to the source.
#[derive(Clone, Debug)]
pub struct Downsampled {
    pub mask: EdgeMask,
    /// Source pixels per coarse pixel (`source_width / coarse_width`).
    pub rate: f32,
}

impl EdgeMask {
    /// Resize so that the width equals `target_width`, keeping the aspect ratio.
    ///
    /// Masks that are not wider than `target_width` are returned unchanged at
    /// rate 1.
    pub fn downsample_to_width(&self, target_width: usize) -> Downsampled {
        if target_width == 0 || self.w <= target_width || self.is_empty() {
            return Downsampled {
                mask: self.clone(),
                rate: 1.0,
            };
        }
        let rate = self.w as f32 / target_width as f32;
        let nh = ((self.h as f32 / rate).round() as usize).max(1);
        let nw = target_width;

        let mut out = EdgeMask::new(nw, nh);
        for cy in 0..nh {
            let (y0, y1) = footprint(cy, rate, self.h);
            for cx in 0..nw {
                let (x0, x1) = footprint(cx, rate, self.w);
                let hit = (y0..y1).any(|y| self.row(y)[x0..x1].iter().any(|&v| v));
                if hit {
                    out.set(cx, cy, true);
                }
            }
        }
        Downsampled { mask: out, rate }
    }
}

/// Half-open source interval covered by coarse index `i`, never empty.
#[inline]
fn footprint(i: usize, rate: f32, limit: usize) -> (usize, usize) {
    let start = ((i as f32 * rate).floor() as usize).min(limit - 1);
    let end = (((i + 1) as f32 * rate).floor() as usize).clamp(start + 1, limit);
    (start, end)
}
