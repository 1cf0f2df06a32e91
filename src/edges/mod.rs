//! Edge source adapter: image gradients and non‑maximum suppression.
//!
//! Turns a grayscale image into the binary `EdgeMask` the Hough accumulators
//! vote from. Borders are handled by clamping during convolution and the
//! outer frame is never marked by NMS.

pub mod grad;
pub mod nms;

pub use grad::{image_gradients, Grad, GradientKernel};
pub use nms::{run_nms, threshold_magnitude};

use crate::image::ImageF32;
use crate::mask::EdgeMask;
use serde::{Deserialize, Serialize};

/// Parameters for the gradient edge adapter.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    pub kernel: GradientKernel,
    /// Minimum gradient magnitude (kernel units on a `[0, 1]` image).
    pub magnitude_threshold: f32,
    /// Thin edges to one pixel; when false every pixel above the threshold
    /// is foreground.
    pub thin: bool,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            kernel: GradientKernel::Sobel,
            magnitude_threshold: 0.5,
            thin: true,
        }
    }
}

/// Gradient magnitude → (optional NMS) → binary mask.
pub fn detect_edge_mask(image: &ImageF32, params: &EdgeParams) -> EdgeMask {
    let grad = image_gradients(image, params.kernel);
    let mask = if params.thin {
        run_nms(&grad, params.magnitude_threshold)
    } else {
        threshold_magnitude(&grad, params.magnitude_threshold)
    };
    log::debug!(
        "edges: {} foreground pixels ({}x{}, thin={})",
        mask.count(),
        mask.width(),
        mask.height(),
        params.thin
    );
    mask
}
