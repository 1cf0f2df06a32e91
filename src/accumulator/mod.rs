//! Parameter-space accumulators.
//!
//! Each accumulator is an explicitly allocated vote grid owned by one
//! detection call. Voting only ever increments; the only decrement is the
//! destructive zeroing performed by peak suppression. Projections that fall
//! outside the grid are dropped, never clamped. Grids larger than a
//! configured cell budget are refused before allocation.
//!
//! - [`LineAccumulator`]: `(ρ, θ)` grid, one ρ bin per pixel, `N_θ` angle bins.
//! - [`CircleAccumulator`]: `(row, col, radius)` grid over explicit inclusive
//!   ranges, voting along a restricted arc.

/// Largest grid (in `u32` cells, 256 MiB) allocated unless configured otherwise.
pub const DEFAULT_MAX_CELLS: usize = 1 << 26;

pub mod circle;
pub mod line;

pub use circle::{ArcSampling, AxisRange, CircleAccumulator, CircleSearchRange};
pub use line::{LineAccumulator, ThetaSpan};
