//! Straight-line detection: ρ/θ voting followed by greedy peak extraction.
//!
//! All Hough-line variants differ only in angular resolution, vote threshold
//! and suppression margins, so they share one [`HoughLineDetector`] driven by
//! [`HoughLineParams`].
//!
//! ```
//! use hough_detector::lines::{detect_lines, HoughLineParams};
//! use hough_detector::mask::EdgeMask;
//!
//! let mut mask = EdgeMask::new(100, 100);
//! for x in 25..75 {
//!     mask.set(x, 50, true);
//! }
//! let params = HoughLineParams {
//!     accumulator_threshold: 40,
//!     ..Default::default()
//! };
//! let lines = detect_lines(&mask, &params).unwrap();
//! assert_eq!(lines.len(), 1);
//! assert!((lines[0].rho - 50.0).abs() <= 1.0);
//! ```
use crate::accumulator::{LineAccumulator, ThetaSpan, DEFAULT_MAX_CELLS};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::TimingBreakdown;
use crate::error::{HoughError, HoughResult};
use crate::mask::EdgeMask;
use crate::peaks::{extract_peaks, PeakParams};
use crate::types::PolarLine;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughLineParams {
    /// Angular bin width in radians.
    pub delta_theta: f32,
    pub theta_span: ThetaSpan,
    /// Minimum votes for a line to be reported.
    pub accumulator_threshold: u32,
    /// Suppression half-width along ρ, in pixels.
    pub rho_suppression_range: usize,
    /// Suppression half-width along θ, in radians.
    pub theta_suppression_range: f32,
    /// Largest ρ×θ grid the detector will allocate.
    pub max_cells: usize,
}

impl Default for HoughLineParams {
    fn default() -> Self {
        Self {
            delta_theta: std::f32::consts::PI / 180.0,
            theta_span: ThetaSpan::Half,
            accumulator_threshold: 100,
            rho_suppression_range: 5,
            theta_suppression_range: 5f32.to_radians(),
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl HoughLineParams {
    pub fn validate(&self) -> HoughResult<()> {
        let dt = self.delta_theta;
        if !dt.is_finite() || dt <= 0.0 || dt > self.theta_span.radians() {
            return Err(HoughError::InvalidParameter {
                name: "delta_theta",
                value: dt,
            });
        }
        let tr = self.theta_suppression_range;
        if !tr.is_finite() || tr < 0.0 {
            return Err(HoughError::InvalidParameter {
                name: "theta_suppression_range",
                value: tr,
            });
        }
        Ok(())
    }

    pub fn peak_params(&self) -> PeakParams {
        PeakParams {
            accumulator_threshold: self.accumulator_threshold,
            rho_range: self.rho_suppression_range,
            theta_range: self.theta_suppression_range,
        }
    }
}

/// Outcome of one line detection run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineReport {
    /// Detected lines in extraction order (descending votes).
    pub lines: Vec<PolarLine>,
    pub rho_bins: usize,
    pub theta_bins: usize,
    /// Sum of all votes cast before extraction.
    pub total_votes: u64,
    pub foreground_pixels: usize,
    pub timing: TimingBreakdown,
}

#[derive(Clone, Debug, Default)]
pub struct HoughLineDetector {
    params: HoughLineParams,
}

impl HoughLineDetector {
    pub fn new(params: HoughLineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &HoughLineParams {
        &self.params
    }

    /// Vote with every foreground pixel of `mask` and extract the peaks.
    ///
    /// A fresh accumulator is allocated per call. An empty foreground yields an
    /// empty line list, not an error.
    pub fn detect(&self, mask: &EdgeMask) -> HoughResult<LineReport> {
        self.params.validate()?;
        mask.ensure_non_empty()?;
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let vote_start = Instant::now();
        let mut acc = LineAccumulator::with_limit(
            mask.width(),
            mask.height(),
            self.params.delta_theta,
            self.params.theta_span,
            self.params.max_cells,
        )?;
        acc.vote(mask)?;
        timing.record("vote", vote_start);
        let total_votes = acc.total_votes();
        let foreground_pixels = mask.count();
        debug!(
            "HoughLineDetector: {}x{} mask, {} foreground px, grid {}x{}, {} votes",
            mask.width(),
            mask.height(),
            foreground_pixels,
            acc.rho_bins(),
            acc.theta_bins(),
            total_votes
        );

        let extract_start = Instant::now();
        let lines = extract_peaks(&mut acc, &self.params.peak_params());
        timing.record("extract", extract_start);
        timing.total_ms = elapsed_ms(total_start);

        Ok(LineReport {
            lines,
            rho_bins: acc.rho_bins(),
            theta_bins: acc.theta_bins(),
            total_votes,
            foreground_pixels,
            timing,
        })
    }
}

/// Convenience wrapper returning only the detected lines.
pub fn detect_lines(mask: &EdgeMask, params: &HoughLineParams) -> HoughResult<Vec<PolarLine>> {
    HoughLineDetector::new(params.clone())
        .detect(mask)
        .map(|report| report.lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_collapse_line_variants() {
        let p = HoughLineParams::default();
        assert_eq!(p.accumulator_threshold, 100);
        assert_eq!(p.rho_suppression_range, 5);
        assert!((p.delta_theta - std::f32::consts::PI / 180.0).abs() < 1e-9);
        assert!(p.validate().is_ok());
        let peaks = p.peak_params();
        assert_eq!(peaks.rho_range, 5);
    }

    #[test]
    fn params_parse_from_partial_json() {
        let p: HoughLineParams =
            serde_json::from_str(r#"{ "accumulator_threshold": 40, "theta_span": "full" }"#)
                .unwrap();
        assert_eq!(p.accumulator_threshold, 40);
        assert_eq!(p.theta_span, ThetaSpan::Full);
        assert_eq!(p.rho_suppression_range, 5);
    }

    #[test]
    fn invalid_resolution_fails_before_voting() {
        let params = HoughLineParams {
            delta_theta: -0.1,
            ..Default::default()
        };
        let err = HoughLineDetector::new(params)
            .detect(&EdgeMask::new(10, 10))
            .unwrap_err();
        assert!(matches!(
            err,
            HoughError::InvalidParameter {
                name: "delta_theta",
                ..
            }
        ));
    }

    #[test]
    fn tiny_resolution_is_refused_not_allocated() {
        let params = HoughLineParams {
            delta_theta: 1e-12,
            ..Default::default()
        };
        let err = detect_lines(&EdgeMask::new(100, 100), &params).unwrap_err();
        assert!(matches!(
            err,
            HoughError::InvalidParameter {
                name: "max_cells",
                ..
            }
        ));

        let small_budget = HoughLineParams {
            max_cells: 1000,
            ..Default::default()
        };
        assert!(detect_lines(&EdgeMask::new(100, 100), &small_budget).is_err());
    }

    #[test]
    fn zero_area_mask_is_rejected() {
        let err = detect_lines(&EdgeMask::new(0, 0), &HoughLineParams::default()).unwrap_err();
        assert_eq!(
            err,
            HoughError::EmptyMask {
                width: 0,
                height: 0
            }
        );
    }

    #[test]
    fn report_carries_grid_and_timing() {
        let mut mask = EdgeMask::new(30, 40);
        for y in 0..40 {
            mask.set(12, y, true);
        }
        let params = HoughLineParams {
            accumulator_threshold: 30,
            ..Default::default()
        };
        let report = HoughLineDetector::new(params).detect(&mask).unwrap();
        assert_eq!(report.rho_bins, 50);
        assert_eq!(report.theta_bins, 180);
        assert_eq!(report.foreground_pixels, 40);
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].rho, 12.0);
        assert_eq!(report.lines[0].votes, 40);
        assert!(report.timing.stage_ms("vote").is_some());
    }
}
