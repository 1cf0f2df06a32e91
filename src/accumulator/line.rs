//! `(ρ, θ)` vote grid for straight lines.
//!
//! Every foreground pixel `(x, y)` votes once per angle bin `θ_i = i·Δθ` for
//! `ρ = round(x·cos θ_i + y·sin θ_i)`. Negative ρ is discarded rather than
//! folded into the opposite angle; with a `[0, π)` span this loses the lines
//! whose normal points away from the image quadrant, which is why a full
//! `[0, 2π)` span is also offered.
//!
//! Layout is ρ-major: `votes[ρ · N_θ + θ_index]`.
use super::DEFAULT_MAX_CELLS;
use crate::angle::bin_count;
use crate::error::{HoughError, HoughResult};
use crate::mask::EdgeMask;
use serde::{Deserialize, Serialize};

/// Angular interval covered by the θ axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThetaSpan {
    /// `[0, π)`
    #[default]
    Half,
    /// `[0, 2π)`
    Full,
}

impl ThetaSpan {
    #[inline]
    pub fn radians(self) -> f32 {
        match self {
            ThetaSpan::Half => std::f32::consts::PI,
            ThetaSpan::Full => 2.0 * std::f32::consts::PI,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LineAccumulator {
    width: usize,
    height: usize,
    rho_bins: usize,
    theta_bins: usize,
    delta_theta: f32,
    cos_lut: Vec<f32>,
    sin_lut: Vec<f32>,
    votes: Vec<u32>,
}

impl LineAccumulator {
    /// Allocate a zeroed grid for a `width × height` mask.
    ///
    /// `ρ_max = ceil(sqrt(width² + height²))` ρ bins and enough θ bins of
    /// width `delta_theta` to cover `span`.
    pub fn new(
        width: usize,
        height: usize,
        delta_theta: f32,
        span: ThetaSpan,
    ) -> HoughResult<Self> {
        Self::with_limit(width, height, delta_theta, span, DEFAULT_MAX_CELLS)
    }

    /// Like [`LineAccumulator::new`], refusing grids of more than `max_cells`.
    pub fn with_limit(
        width: usize,
        height: usize,
        delta_theta: f32,
        span: ThetaSpan,
        max_cells: usize,
    ) -> HoughResult<Self> {
        if width == 0 || height == 0 {
            return Err(HoughError::EmptyMask { width, height });
        }
        if !delta_theta.is_finite() || delta_theta <= 0.0 || delta_theta > span.radians() {
            return Err(HoughError::InvalidParameter {
                name: "delta_theta",
                value: delta_theta,
            });
        }
        let (fw, fh) = (width as f64, height as f64);
        let rho_bins = ((fw * fw + fh * fh).sqrt().ceil() as usize).max(1);
        let theta_bins = bin_count(span.radians(), delta_theta);
        let cells = check_cells(rho_bins.checked_mul(theta_bins), max_cells)?;

        let (cos_lut, sin_lut): (Vec<f32>, Vec<f32>) = (0..theta_bins)
            .map(|i| {
                let theta = i as f32 * delta_theta;
                (theta.cos(), theta.sin())
            })
            .unzip();

        Ok(Self {
            width,
            height,
            rho_bins,
            theta_bins,
            delta_theta,
            cos_lut,
            sin_lut,
            votes: vec![0; cells],
        })
    }

    /// Allocate a grid sized for `mask`.
    pub fn for_mask(mask: &EdgeMask, delta_theta: f32, span: ThetaSpan) -> HoughResult<Self> {
        mask.ensure_non_empty()?;
        Self::new(mask.width(), mask.height(), delta_theta, span)
    }

    #[inline]
    pub fn rho_bins(&self) -> usize {
        self.rho_bins
    }

    #[inline]
    pub fn theta_bins(&self) -> usize {
        self.theta_bins
    }

    #[inline]
    pub fn delta_theta(&self) -> f32 {
        self.delta_theta
    }

    /// Angle of bin `theta_index`, in radians.
    #[inline]
    pub fn theta_at(&self, theta_index: usize) -> f32 {
        theta_index as f32 * self.delta_theta
    }

    #[inline]
    pub fn get(&self, rho: usize, theta_index: usize) -> u32 {
        self.votes[rho * self.theta_bins + theta_index]
    }

    pub fn votes(&self) -> &[u32] {
        &self.votes
    }

    pub fn total_votes(&self) -> u64 {
        self.votes.iter().map(|&v| v as u64).sum()
    }

    /// Zero every cell.
    pub fn reset(&mut self) {
        self.votes.iter_mut().for_each(|v| *v = 0);
    }

    /// Cast the votes of a single foreground pixel.
    pub fn vote_point(&mut self, x: usize, y: usize) {
        cast_votes(
            &self.cos_lut,
            &self.sin_lut,
            self.rho_bins,
            &mut self.votes,
            x,
            y,
        );
    }

    /// Vote with every foreground pixel of `mask`.
    ///
    /// The mask must have the dimensions the grid was allocated for.
    pub fn vote(&mut self, mask: &EdgeMask) -> HoughResult<()> {
        if mask.width() != self.width || mask.height() != self.height {
            return Err(HoughError::MaskSizeMismatch {
                expected: self.width * self.height,
                actual: mask.width() * mask.height(),
            });
        }

        #[cfg(feature = "parallel")]
        {
            self.vote_parallel(mask);
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (x, y) in mask.foreground() {
                self.vote_point(x, y);
            }
        }
        Ok(())
    }

    /// Row-partitioned voting with per-partition grids summed element-wise.
    #[cfg(feature = "parallel")]
    fn vote_parallel(&mut self, mask: &EdgeMask) {
        use rayon::prelude::*;

        let cells = self.votes.len();
        let (cos_lut, sin_lut, rho_bins) = (&self.cos_lut, &self.sin_lut, self.rho_bins);
        let partial = (0..mask.height())
            .into_par_iter()
            .fold(
                || vec![0u32; cells],
                |mut acc, y| {
                    for (x, &v) in mask.row(y).iter().enumerate() {
                        if v {
                            cast_votes(cos_lut, sin_lut, rho_bins, &mut acc, x, y);
                        }
                    }
                    acc
                },
            )
            .reduce(
                || vec![0u32; cells],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(dst, src)| *dst += src);
                    a
                },
            );
        self.votes
            .iter_mut()
            .zip(partial)
            .for_each(|(dst, src)| *dst += src);
    }

    /// First cell holding the maximum count, in ρ-major scan order.
    pub fn argmax(&self) -> Option<(usize, usize, u32)> {
        let mut best: Option<(usize, u32)> = None;
        for (i, &v) in self.votes.iter().enumerate() {
            if best.map_or(true, |(_, b)| v > b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, v)| (i / self.theta_bins, i % self.theta_bins, v))
    }

    /// Zero the inclusive index window `[rho_lo, rho_hi] × [theta_lo, theta_hi]`.
    ///
    /// Bounds must already be clipped to the grid.
    pub(crate) fn zero_window(
        &mut self,
        rho_lo: usize,
        rho_hi: usize,
        theta_lo: usize,
        theta_hi: usize,
    ) {
        for rho in rho_lo..=rho_hi {
            let row = &mut self.votes[rho * self.theta_bins..(rho + 1) * self.theta_bins];
            row[theta_lo..=theta_hi].iter_mut().for_each(|v| *v = 0);
        }
    }
}

/// Cell count if it is known and within `max_cells`.
pub(crate) fn check_cells(cells: Option<usize>, max_cells: usize) -> HoughResult<usize> {
    match cells {
        Some(n) if n <= max_cells => Ok(n),
        _ => Err(HoughError::InvalidParameter {
            name: "max_cells",
            value: cells.map_or(f32::INFINITY, |n| n as f32),
        }),
    }
}

#[inline]
fn cast_votes(
    cos_lut: &[f32],
    sin_lut: &[f32],
    rho_bins: usize,
    votes: &mut [u32],
    x: usize,
    y: usize,
) {
    let theta_bins = cos_lut.len();
    let (fx, fy) = (x as f32, y as f32);
    for (t, (&c, &s)) in cos_lut.iter().zip(sin_lut).enumerate() {
        let rho = (fx * c + fy * s).round();
        if rho < 0.0 {
            continue;
        }
        let rho = rho as usize;
        if rho < rho_bins {
            votes[rho * theta_bins + t] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn grid_dimensions_follow_image_diagonal() {
        let acc = LineAccumulator::new(100, 100, PI / 180.0, ThetaSpan::Half).unwrap();
        assert_eq!(acc.rho_bins(), 142);
        assert_eq!(acc.theta_bins(), 180);
        let full = LineAccumulator::new(3, 4, PI / 180.0, ThetaSpan::Full).unwrap();
        assert_eq!(full.rho_bins(), 5);
        assert_eq!(full.theta_bins(), 360);
    }

    #[test]
    fn rejects_degenerate_configuration() {
        assert!(matches!(
            LineAccumulator::new(0, 10, 0.1, ThetaSpan::Half),
            Err(HoughError::EmptyMask { .. })
        ));
        assert!(matches!(
            LineAccumulator::new(10, 10, 0.0, ThetaSpan::Half),
            Err(HoughError::InvalidParameter { name: "delta_theta", .. })
        ));
        assert!(LineAccumulator::new(10, 10, f32::NAN, ThetaSpan::Half).is_err());
    }

    #[test]
    fn oversized_grid_is_refused_before_allocation() {
        let err = LineAccumulator::new(100, 100, 1e-12, ThetaSpan::Half).unwrap_err();
        assert!(matches!(
            err,
            HoughError::InvalidParameter {
                name: "max_cells",
                ..
            }
        ));
        // 142 × 180 cells
        let fits = LineAccumulator::with_limit(100, 100, PI / 180.0, ThetaSpan::Half, 25_560);
        assert!(fits.is_ok());
        let over = LineAccumulator::with_limit(100, 100, PI / 180.0, ThetaSpan::Half, 25_559);
        assert!(over.is_err());
    }

    #[test]
    fn origin_pixel_votes_rho_zero_everywhere() {
        let mut acc = LineAccumulator::new(10, 10, PI / 4.0, ThetaSpan::Half).unwrap();
        acc.vote_point(0, 0);
        assert_eq!(acc.theta_bins(), 4);
        for t in 0..4 {
            assert_eq!(acc.get(0, t), 1);
        }
        assert_eq!(acc.total_votes(), 4);
    }

    #[test]
    fn negative_rho_is_dropped() {
        // (x=5, y=0) at θ=3π/4 projects to ρ ≈ -3.5
        let mut acc = LineAccumulator::new(10, 10, PI / 4.0, ThetaSpan::Half).unwrap();
        acc.vote_point(5, 0);
        assert_eq!(acc.total_votes(), 3);
        assert_eq!(acc.get(5, 0), 1);
        assert_eq!(acc.get(4, 1), 1);
        assert_eq!(acc.get(0, 2), 1);
    }

    #[test]
    fn counts_equal_consistent_pixels() {
        let mut mask = EdgeMask::new(20, 20);
        for x in 0..20 {
            mask.set(x, 7, true);
        }
        let mut acc = LineAccumulator::for_mask(&mask, PI / 180.0, ThetaSpan::Half).unwrap();
        acc.vote(&mask).unwrap();
        assert_eq!(acc.get(7, 90), 20);
        // ±1° still rounds every pixel of a 20 px run onto ρ = 7; scan order
        // reports the first of the tied cells.
        assert_eq!(acc.get(7, 89), 20);
        assert_eq!(acc.argmax(), Some((7, 89, 20)));
        assert_eq!(acc.total_votes(), 20 * 180 - negative_votes(&acc, &mask));
    }

    fn negative_votes(acc: &LineAccumulator, mask: &EdgeMask) -> u64 {
        let mut dropped = 0;
        for (x, y) in mask.foreground() {
            for t in 0..acc.theta_bins() {
                let th = acc.theta_at(t);
                if (x as f32 * th.cos() + y as f32 * th.sin()).round() < 0.0 {
                    dropped += 1;
                }
            }
        }
        dropped
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_vote_matches_per_pixel_votes() {
        let mut mask = EdgeMask::new(64, 48);
        for i in 0..48 {
            mask.set(i, i, true);
            mask.set((i * 7) % 64, (i * 5) % 48, true);
            mask.set(63 - i, 20, true);
        }
        let mut parallel = LineAccumulator::for_mask(&mask, PI / 180.0, ThetaSpan::Full).unwrap();
        parallel.vote(&mask).unwrap();

        let mut sequential = LineAccumulator::for_mask(&mask, PI / 180.0, ThetaSpan::Full).unwrap();
        for (x, y) in mask.foreground() {
            sequential.vote_point(x, y);
        }
        assert!(parallel.total_votes() > 0);
        assert_eq!(parallel.votes(), sequential.votes());
        assert_eq!(parallel.argmax(), sequential.argmax());
    }

    #[test]
    fn vote_rejects_mismatched_mask() {
        let mut acc = LineAccumulator::new(10, 10, 0.1, ThetaSpan::Half).unwrap();
        let mask = EdgeMask::new(11, 10);
        assert!(matches!(
            acc.vote(&mask),
            Err(HoughError::MaskSizeMismatch { .. })
        ));
    }

    #[test]
    fn reset_clears_counts() {
        let mut acc = LineAccumulator::new(5, 5, 0.5, ThetaSpan::Half).unwrap();
        acc.vote_point(2, 3);
        assert!(acc.total_votes() > 0);
        acc.reset();
        assert_eq!(acc.total_votes(), 0);
        assert_eq!(acc.argmax().map(|(_, _, v)| v), Some(0));
    }
}
