//! `(row, col, radius)` vote grid for circles over explicit bounded ranges.
//!
//! The grid only spans the configured ranges, not the image domain. For each
//! candidate `(row, col, r)` the accumulator samples `n = r · K` angles with
//! step `2π / n`, but only the indices in `[⌊n·start⌋, ⌊n·end⌋)`. With the
//! default fractions this is the arc between 30° and 270°, where the edge of
//! the target shape is expected to be visible. The sample `i` projects to
//! `(row + round(r·cos θ_i), col + round(r·sin θ_i))` and scores one hit when
//! that pixel is foreground; projections outside the mask score nothing.
use super::line::check_cells;
use super::DEFAULT_MAX_CELLS;
use crate::error::{HoughError, HoughResult};
use crate::mask::EdgeMask;
use crate::types::{Circle, CircleCandidate};
use serde::{Deserialize, Serialize};

/// Inclusive integer range `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// `[center - half, center + half]`, saturating at the `i32` limits.
    pub fn around(center: i32, half: i32) -> Self {
        Self {
            min: center.saturating_sub(half),
            max: center.saturating_add(half),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    #[inline]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            usize::try_from(self.max as i64 - self.min as i64 + 1).unwrap_or(usize::MAX)
        }
    }

    #[inline]
    pub fn contains(&self, v: i32) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<i32> {
        self.min..=self.max
    }

    /// Divide by `rate`, rounding the bounds outward.
    pub fn shrink_outward(&self, rate: f32) -> Self {
        Self {
            min: (self.min as f32 / rate).floor() as i32,
            max: (self.max as f32 / rate).ceil() as i32,
        }
    }

    fn validate(&self, axis: &'static str) -> HoughResult<()> {
        if self.is_empty() {
            return Err(HoughError::EmptyRange {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Bounded search space for circle centres and radii, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleSearchRange {
    pub rows: AxisRange,
    pub cols: AxisRange,
    pub radii: AxisRange,
}

impl CircleSearchRange {
    pub fn new(rows: AxisRange, cols: AxisRange, radii: AxisRange) -> Self {
        Self { rows, cols, radii }
    }

    /// Central band of a `width × height` image: centres in the middle fifth
    /// vertically and horizontally, radii between 38% and 52% of the width.
    pub fn central(width: usize, height: usize) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            rows: AxisRange::new((0.4 * h).round() as i32, (0.6 * h).round() as i32),
            cols: AxisRange::new((0.4 * w).round() as i32, (0.6 * w).round() as i32),
            radii: AxisRange::new(
                ((0.38 * w).round() as i32).max(1),
                ((0.52 * w).round() as i32).max(1),
            ),
        }
    }

    /// `±half` window around `circle` on every axis, radius kept ≥ 1.
    pub fn around(circle: &Circle, half: i32) -> Self {
        let mut radii = AxisRange::around(circle.radius, half);
        radii.min = radii.min.max(1);
        Self {
            rows: AxisRange::around(circle.row, half),
            cols: AxisRange::around(circle.col, half),
            radii,
        }
    }

    /// Express the range in units of a mask down-sampled by `rate`.
    pub fn to_coarse(&self, rate: f32) -> Self {
        let mut radii = self.radii.shrink_outward(rate);
        radii.min = radii.min.max(1);
        Self {
            rows: self.rows.shrink_outward(rate),
            cols: self.cols.shrink_outward(rate),
            radii,
        }
    }

    /// Number of grid cells, saturating at `usize::MAX`.
    pub fn cell_count(&self) -> usize {
        self.checked_cell_count().unwrap_or(usize::MAX)
    }

    pub fn checked_cell_count(&self) -> Option<usize> {
        self.rows
            .len()
            .checked_mul(self.cols.len())?
            .checked_mul(self.radii.len())
    }

    pub fn validate(&self) -> HoughResult<()> {
        self.rows.validate("row")?;
        self.cols.validate("col")?;
        self.radii.validate("radius")?;
        if self.radii.min < 1 {
            return Err(HoughError::InvalidParameter {
                name: "radius_min",
                value: self.radii.min as f32,
            });
        }
        Ok(())
    }
}

/// Angular sampling policy for circle votes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcSampling {
    /// Samples per unit radius over the full turn (`n = r · K`).
    pub angles_per_radius: u32,
    /// First sampled index as a fraction of `n` (floored).
    pub start_fraction: f32,
    /// One past the last sampled index as a fraction of `n` (floored).
    pub end_fraction: f32,
}

impl Default for ArcSampling {
    fn default() -> Self {
        Self {
            angles_per_radius: 6,
            start_fraction: 1.0 / 12.0,
            end_fraction: 0.75,
        }
    }
}

impl ArcSampling {
    /// Sample the whole circumference.
    pub fn full_circle(angles_per_radius: u32) -> Self {
        Self {
            angles_per_radius,
            start_fraction: 0.0,
            end_fraction: 1.0,
        }
    }

    pub fn validate(&self) -> HoughResult<()> {
        if self.angles_per_radius == 0 {
            return Err(HoughError::InvalidParameter {
                name: "angles_per_radius",
                value: 0.0,
            });
        }
        let ok = |f: f32| f.is_finite() && (0.0..=1.0).contains(&f);
        if !ok(self.start_fraction) {
            return Err(HoughError::InvalidParameter {
                name: "start_fraction",
                value: self.start_fraction,
            });
        }
        if !ok(self.end_fraction) || self.end_fraction < self.start_fraction {
            return Err(HoughError::InvalidParameter {
                name: "end_fraction",
                value: self.end_fraction,
            });
        }
        Ok(())
    }

    /// Integer `(row, col)` offsets sampled for `radius`, in angle order.
    pub fn offsets(&self, radius: i32) -> Vec<(i32, i32)> {
        if radius <= 0 {
            return Vec::new();
        }
        let n = radius as u64 * self.angles_per_radius as u64;
        // Small bias so exact fractions (n/12, 3n/4) are not lost to rounding.
        let first = (n as f64 * self.start_fraction as f64 + 1e-3).floor() as u64;
        let last = ((n as f64 * self.end_fraction as f64 + 1e-3).floor() as u64).min(n);
        let step = 2.0 * std::f32::consts::PI / n as f32;
        let r = radius as f32;
        (first..last)
            .map(|i| {
                let angle = i as f32 * step;
                ((r * angle.cos()).round() as i32, (r * angle.sin()).round() as i32)
            })
            .collect()
    }

    /// Number of samples taken for `radius`.
    pub fn sample_count(&self, radius: i32) -> usize {
        self.offsets(radius).len()
    }

    /// Fails when the largest radius would need more than `max_samples`
    /// offsets over the full turn.
    pub fn ensure_budget(&self, max_radius: i32, max_samples: usize) -> HoughResult<()> {
        let n = max_radius.max(0) as u64 * self.angles_per_radius as u64;
        if n > max_samples as u64 {
            return Err(HoughError::InvalidParameter {
                name: "radius_max",
                value: max_radius as f32,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct CircleAccumulator {
    range: CircleSearchRange,
    n_cols: usize,
    n_radii: usize,
    votes: Vec<u32>,
}

impl CircleAccumulator {
    /// Allocate a zeroed grid covering exactly `range`.
    pub fn new(range: CircleSearchRange) -> HoughResult<Self> {
        Self::with_limit(range, DEFAULT_MAX_CELLS)
    }

    /// Like [`CircleAccumulator::new`], refusing grids of more than `max_cells`.
    pub fn with_limit(range: CircleSearchRange, max_cells: usize) -> HoughResult<Self> {
        range.validate()?;
        let cells = check_cells(range.checked_cell_count(), max_cells)?;
        Ok(Self {
            range,
            n_cols: range.cols.len(),
            n_radii: range.radii.len(),
            votes: vec![0; cells],
        })
    }

    pub fn range(&self) -> &CircleSearchRange {
        &self.range
    }

    pub fn votes(&self) -> &[u32] {
        &self.votes
    }

    #[inline]
    fn index(&self, row: i32, col: i32, radius: i32) -> usize {
        let i = (row - self.range.rows.min) as usize;
        let j = (col - self.range.cols.min) as usize;
        let k = (radius - self.range.radii.min) as usize;
        (i * self.n_cols + j) * self.n_radii + k
    }

    /// Count for a circle in absolute coordinates; 0 outside the range.
    pub fn get(&self, row: i32, col: i32, radius: i32) -> u32 {
        let r = &self.range;
        if !(r.rows.contains(row) && r.cols.contains(col) && r.radii.contains(radius)) {
            return 0;
        }
        self.votes[self.index(row, col, radius)]
    }

    pub fn reset(&mut self) {
        self.votes.iter_mut().for_each(|v| *v = 0);
    }

    /// Score every cell of the range against `mask`.
    pub fn vote(&mut self, mask: &EdgeMask, arc: &ArcSampling) {
        let range = self.range;
        for radius in range.radii.iter() {
            let offsets = arc.offsets(radius);
            for row in range.rows.iter() {
                for col in range.cols.iter() {
                    let hits = offsets
                        .iter()
                        .filter(|&&(di, dj)| {
                            mask.is_set(col.saturating_add(dj), row.saturating_add(di))
                        })
                        .count() as u32;
                    if hits > 0 {
                        let idx = self.index(row, col, radius);
                        self.votes[idx] += hits;
                    }
                }
            }
        }
    }

    /// Largest count in the grid (0 for an untouched grid).
    pub fn max_votes(&self) -> u32 {
        self.votes.iter().copied().max().unwrap_or(0)
    }

    /// All cells in scan order (row, then col, then radius).
    pub fn cells(&self) -> impl Iterator<Item = CircleCandidate> + '_ {
        let range = self.range;
        range.rows.iter().flat_map(move |row| {
            range.cols.iter().flat_map(move |col| {
                range.radii.iter().map(move |radius| CircleCandidate {
                    circle: Circle::new(row, col, radius),
                    votes: self.votes[self.index(row, col, radius)],
                })
            })
        })
    }
}
