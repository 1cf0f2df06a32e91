//! Greedy peak extraction over a populated line accumulator.
//!
//! Each step takes the strongest remaining cell, emits it as a line and
//! zeroes a rectangular window around it so the same line cannot be reported
//! twice. The loop ends when the remaining maximum drops below the threshold
//! or reaches zero. Every step zeroes at least the winning cell of a finite
//! grid, so extraction always terminates.
use crate::accumulator::LineAccumulator;
use crate::types::PolarLine;
use log::debug;

/// Threshold and suppression half-widths for [`extract_peaks`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeakParams {
    /// Minimum vote count for a cell to be accepted as a line.
    pub accumulator_threshold: u32,
    /// Suppression half-width along ρ, in bins.
    pub rho_range: usize,
    /// Suppression half-width along θ, in radians.
    pub theta_range: f32,
}

/// Inclusive index window zeroed around a winning cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuppressionWindow {
    pub rho_lo: usize,
    pub rho_hi: usize,
    pub theta_lo: usize,
    pub theta_hi: usize,
}

impl SuppressionWindow {
    /// Window centred on `(rho, theta_index)` clipped to the grid. The θ axis
    /// is not wrapped around.
    pub fn around(
        acc: &LineAccumulator,
        rho: usize,
        theta_index: usize,
        params: &PeakParams,
    ) -> Self {
        let theta_half = theta_half_width(params.theta_range, acc.delta_theta());
        Self {
            rho_lo: rho.saturating_sub(params.rho_range),
            rho_hi: rho.saturating_add(params.rho_range).min(acc.rho_bins() - 1),
            theta_lo: theta_index.saturating_sub(theta_half),
            theta_hi: theta_index
                .saturating_add(theta_half)
                .min(acc.theta_bins() - 1),
        }
    }

    pub fn contains(&self, rho: usize, theta_index: usize) -> bool {
        (self.rho_lo..=self.rho_hi).contains(&rho)
            && (self.theta_lo..=self.theta_hi).contains(&theta_index)
    }
}

fn theta_half_width(theta_range: f32, delta_theta: f32) -> usize {
    if !theta_range.is_finite() || theta_range <= 0.0 {
        return 0;
    }
    (theta_range / delta_theta).round() as usize
}

/// Extract lines in descending vote order, destroying the suppressed cells.
///
/// Re-running on an exhausted accumulator returns an empty list.
pub fn extract_peaks(acc: &mut LineAccumulator, params: &PeakParams) -> Vec<PolarLine> {
    let mut lines = Vec::new();
    while let Some((rho, theta_index, votes)) = acc.argmax() {
        if votes == 0 || votes < params.accumulator_threshold {
            break;
        }
        lines.push(PolarLine {
            rho: rho as f32,
            theta: acc.theta_at(theta_index),
            votes,
        });
        let w = SuppressionWindow::around(acc, rho, theta_index, params);
        acc.zero_window(w.rho_lo, w.rho_hi, w.theta_lo, w.theta_hi);
    }
    debug!(
        "extract_peaks: {} line(s) at threshold {}",
        lines.len(),
        params.accumulator_threshold
    );
    lines
}
