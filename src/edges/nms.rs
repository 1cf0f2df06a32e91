//! Non‑maximum suppression on gradient magnitude with direction alignment.
//!
//! This is a simplified Canny‑style thinning step: a pixel survives when its
//! magnitude clears the threshold and is strictly greater than both neighbours
//! along the quantized gradient direction. Survivors are written into an
//! `EdgeMask`, which is what the accumulators consume.
//!
//! The outermost 1‑pixel frame is never marked, which avoids out‑of‑bounds
//! neighbour lookups.
use crate::edges::grad::Grad;
use crate::image::ImageView;
use crate::mask::EdgeMask;

const TAN_22_5_DEG: f32 = 0.41421356237;

/// Thin the gradient magnitude into a one-pixel-wide edge mask.
pub fn run_nms(grad: &Grad, mag_thresh: f32) -> EdgeMask {
    let w = grad.gx.w;
    let h = grad.gx.h;
    let mut mask = EdgeMask::new(w, h);
    if w < 3 || h < 3 {
        return mask;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag < mag_thresh {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x - 1], mag_next[x + 1])
                } else {
                    (mag_prev[x + 1], mag_next[x - 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            // Plateaus: keep the first pixel of a flat ridge so step edges
            // are not erased entirely.
            if mag <= neighbor1 || mag < neighbor2 {
                continue;
            }

            mask.set(x, y, true);
        }
    }

    mask
}

/// Simple threshold without thinning.
pub fn threshold_magnitude(grad: &Grad, mag_thresh: f32) -> EdgeMask {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut mask = EdgeMask::new(w, h);
    for y in 0..h {
        for (x, &m) in grad.mag.row(y).iter().enumerate() {
            if m >= mag_thresh {
                mask.set(x, y, true);
            }
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::grad::{image_gradients, GradientKernel};
    use crate::image::ImageF32;

    fn step_image(w: usize, h: usize, split: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            for x in split..w {
                img.set(x, y, 1.0);
            }
        }
        img
    }

    #[test]
    fn step_edge_thins_to_single_column() {
        let img = step_image(12, 8, 6);
        let grad = image_gradients(&img, GradientKernel::Sobel);
        let mask = run_nms(&grad, 0.5);
        for y in 1..7 {
            let cols: Vec<usize> = (0..12).filter(|&x| mask.get(x, y)).collect();
            assert_eq!(cols, vec![5], "row {y}");
        }
        assert!(!mask.get(5, 0));
    }

    #[test]
    fn plain_threshold_keeps_both_sides() {
        let img = step_image(12, 8, 6);
        let grad = image_gradients(&img, GradientKernel::Sobel);
        let mask = threshold_magnitude(&grad, 0.5);
        assert!(mask.get(5, 3) && mask.get(6, 3));
        assert!(!mask.get(2, 3));
    }
}
