//! Two-stage coarse-to-fine circle search.
//!
//! 1. The edge mask is dilated and max-pooled down to a fixed coarse width.
//!    The search range is mapped into coarse units and every cell is voted.
//! 2. Cells reaching both the rank threshold (11th-highest count by default)
//!    and an absolute floor become candidates.
//! 3. Each candidate is scaled back to full resolution and re-voted in a small
//!    window on the undilated mask. Cells at the window maximum above a second
//!    floor survive.
//! 4. The survivor with the most votes is the detection.
//!
//! Finding nothing is a normal outcome (`circle == None`); only malformed
//! input or configuration is an error.

pub mod params;
pub mod refine;

pub use params::HoughCircleParams;

use crate::accumulator::{CircleAccumulator, CircleSearchRange};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::TimingBreakdown;
use crate::error::HoughResult;
use crate::mask::EdgeMask;
use crate::types::{Circle, CircleCandidate};
use log::debug;
use refine::{coarse_candidates, refine_candidate, select_best};
use serde::Serialize;
use std::time::Instant;

/// Outcome of one circle search.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleReport {
    /// Best-supported circle in full-resolution pixels.
    pub circle: Option<CircleCandidate>,
    /// Full-resolution pixels per coarse pixel.
    pub rate: f32,
    /// Search range actually voted in the coarse pass.
    pub coarse_range: Option<CircleSearchRange>,
    /// Relative threshold taken from the ranked coarse votes.
    pub coarse_threshold: u32,
    /// Coarse candidates in coarse units.
    pub coarse_candidates: Vec<CircleCandidate>,
    /// Fine-pass survivors in full-resolution units.
    pub refined: Vec<CircleCandidate>,
    pub timing: TimingBreakdown,
}

#[derive(Clone, Debug)]
pub struct HoughCircleDetector {
    range: CircleSearchRange,
    params: HoughCircleParams,
}

impl HoughCircleDetector {
    /// `range` is expressed in full-resolution pixels.
    pub fn new(range: CircleSearchRange, params: HoughCircleParams) -> Self {
        Self { range, params }
    }

    pub fn range(&self) -> &CircleSearchRange {
        &self.range
    }

    pub fn params(&self) -> &HoughCircleParams {
        &self.params
    }

    pub fn detect(&self, mask: &EdgeMask) -> HoughResult<CircleReport> {
        self.range.validate()?;
        self.params.validate()?;
        mask.ensure_non_empty()?;
        let params = &self.params;
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let prep_start = Instant::now();
        let coarse = mask
            .dilate(params.coarse_dilation)
            .downsample_to_width(params.coarse_width);
        let rate = coarse.rate;
        let coarse_range = self.range.to_coarse(rate);
        timing.record("coarse_mask", prep_start);

        let coarse_start = Instant::now();
        params.arc.ensure_budget(coarse_range.radii.max, params.max_cells)?;
        let mut acc = CircleAccumulator::with_limit(coarse_range, params.max_cells)?;
        acc.vote(&coarse.mask, &params.arc);
        let (coarse_threshold, candidates) =
            coarse_candidates(&acc, params.coarse_rank, params.coarse_floor);
        timing.record("coarse_vote", coarse_start);
        debug!(
            "HoughCircleDetector: rate={:.3} coarse grid {} cells, max={} threshold={} candidates={}",
            rate,
            coarse_range.cell_count(),
            acc.max_votes(),
            coarse_threshold,
            candidates.len()
        );

        let fine_start = Instant::now();
        let mut refined = Vec::new();
        for cand in &candidates {
            let seed = cand.circle.scaled(rate);
            refined.extend(refine_candidate(mask, &seed, params)?);
        }
        let circle = select_best(&refined);
        timing.record("fine_vote", fine_start);
        timing.total_ms = elapsed_ms(total_start);

        match circle {
            Some(c) => debug!(
                "HoughCircleDetector: circle row={} col={} r={} votes={} ({} survivors)",
                c.circle.row,
                c.circle.col,
                c.circle.radius,
                c.votes,
                refined.len()
            ),
            None => debug!("HoughCircleDetector: no circle found"),
        }

        Ok(CircleReport {
            circle,
            rate,
            coarse_range: Some(coarse_range),
            coarse_threshold,
            coarse_candidates: candidates,
            refined,
            timing,
        })
    }
}

/// Convenience wrapper returning only the detected circle.
pub fn detect_circle(
    mask: &EdgeMask,
    range: &CircleSearchRange,
    params: &HoughCircleParams,
) -> HoughResult<Option<Circle>> {
    HoughCircleDetector::new(*range, params.clone())
        .detect(mask)
        .map(|report| report.circle.map(|c| c.circle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::AxisRange;
    use crate::error::HoughError;

    fn range() -> CircleSearchRange {
        CircleSearchRange::new(
            AxisRange::new(40, 60),
            AxisRange::new(40, 60),
            AxisRange::new(25, 35),
        )
    }

    #[test]
    fn empty_foreground_is_not_an_error() {
        let report = HoughCircleDetector::new(range(), HoughCircleParams::default())
            .detect(&EdgeMask::new(100, 100))
            .unwrap();
        assert!(report.circle.is_none());
        assert!(report.coarse_candidates.is_empty());
        assert!((report.rate - 2.0).abs() < 1e-6);
    }

    #[test]
    fn inverted_radius_range_fails_fast() {
        let bad = CircleSearchRange::new(
            AxisRange::new(40, 60),
            AxisRange::new(40, 60),
            AxisRange::new(35, 25),
        );
        let err = detect_circle(&EdgeMask::new(100, 100), &bad, &HoughCircleParams::default())
            .unwrap_err();
        assert!(matches!(err, HoughError::EmptyRange { axis: "radius", .. }));
    }

    #[test]
    fn oversized_search_space_is_an_error() {
        let huge = CircleSearchRange::new(
            AxisRange::new(0, 100_000),
            AxisRange::new(0, 100_000),
            AxisRange::new(1, 1000),
        );
        let params = HoughCircleParams {
            coarse_width: 100,
            ..Default::default()
        };
        let err = detect_circle(&EdgeMask::new(100, 100), &huge, &params).unwrap_err();
        assert!(matches!(
            err,
            HoughError::InvalidParameter {
                name: "max_cells",
                ..
            }
        ));

        let far_radius = CircleSearchRange::new(
            AxisRange::new(40, 60),
            AxisRange::new(40, 60),
            AxisRange::new(1, i32::MAX),
        );
        let err = detect_circle(&EdgeMask::new(100, 100), &far_radius, &params).unwrap_err();
        assert!(matches!(
            err,
            HoughError::InvalidParameter {
                name: "radius_max",
                ..
            }
        ));
    }

    #[test]
    fn zero_area_mask_fails_fast() {
        let err = detect_circle(&EdgeMask::new(0, 5), &range(), &HoughCircleParams::default())
            .unwrap_err();
        assert!(matches!(err, HoughError::EmptyMask { .. }));
    }
}
