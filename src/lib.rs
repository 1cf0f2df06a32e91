#![doc = include_str!("../README.md")]

// Core detection pipeline. None of these modules perform I/O.
pub mod accumulator;
pub mod circle;
pub mod cross;
pub mod error;
pub mod lines;
pub mod mask;
pub mod peaks;
pub mod segments;
pub mod types;

// Edge sources, diagnostics and tool support.
pub mod angle;
pub mod config;
pub mod diagnostics;
pub mod edges;
pub mod image;

// --- High-level re-exports -------------------------------------------------

pub use crate::circle::{detect_circle, CircleReport, HoughCircleDetector, HoughCircleParams};
pub use crate::cross::{detect_cross_points, CrossParams, CrossReport};
pub use crate::error::{HoughError, HoughResult};
pub use crate::lines::{detect_lines, HoughLineDetector, HoughLineParams, LineReport};
pub use crate::mask::EdgeMask;
pub use crate::types::{Circle, CircleCandidate, LineSegment, PolarLine};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use hough_detector::prelude::*;
///
/// let mut mask = EdgeMask::new(100, 100);
/// for (di, dj) in ArcSampling::full_circle(6).offsets(30) {
///     mask.set_checked(50 + dj, 50 + di);
/// }
/// let range = CircleSearchRange::new(
///     AxisRange::new(40, 60),
///     AxisRange::new(40, 60),
///     AxisRange::new(25, 35),
/// );
/// let found = detect_circle(&mask, &range, &HoughCircleParams::default()).unwrap();
/// let c = found.expect("circle");
/// assert!((c.row - 50).abs() <= 2 && (c.col - 50).abs() <= 2);
/// assert!((c.radius - 30).abs() <= 2);
/// ```
pub mod prelude {
    pub use crate::accumulator::{ArcSampling, AxisRange, CircleSearchRange, ThetaSpan};
    pub use crate::{
        detect_circle, detect_lines, EdgeMask, HoughCircleParams, HoughError, HoughLineParams,
        PolarLine,
    };
}
