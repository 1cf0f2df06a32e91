//! Diagnostics attached to detector reports.
//!
//! Detectors time each stage with [`std::time::Instant`] and record the
//! results in a [`TimingBreakdown`] so the demo tools can print or serialize
//! them next to the detections.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};
