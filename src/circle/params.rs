//! Knobs for the two-stage circle search.
//!
//! The rank/floor pairs are empirical tuning values for masks of roughly
//! 50 px coarse width; they are kept configurable rather than fixed.
use crate::accumulator::{ArcSampling, DEFAULT_MAX_CELLS};
use crate::error::{HoughError, HoughResult};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughCircleParams {
    /// Width the edge mask is down-sampled to for the coarse pass.
    pub coarse_width: usize,
    /// Square dilation radius applied before down-sampling (0 disables).
    pub coarse_dilation: usize,
    /// Zero-based rank of the coarse vote used as the relative threshold
    /// (10 selects the 11th-highest count).
    pub coarse_rank: usize,
    /// Coarse candidates need strictly more hits than this.
    pub coarse_floor: u32,
    /// Half-width of the full-resolution window around each candidate.
    pub fine_window: i32,
    /// Fine survivors need strictly more hits than this.
    pub fine_floor: u32,
    pub arc: ArcSampling,
    /// Largest vote grid, and largest per-radius sample list, either pass
    /// will allocate.
    pub max_cells: usize,
}

impl Default for HoughCircleParams {
    fn default() -> Self {
        Self {
            coarse_width: 50,
            coarse_dilation: 1,
            coarse_rank: 10,
            coarse_floor: 10,
            fine_window: 2,
            fine_floor: 20,
            arc: ArcSampling::default(),
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl HoughCircleParams {
    pub fn validate(&self) -> HoughResult<()> {
        if self.coarse_width == 0 {
            return Err(HoughError::InvalidParameter {
                name: "coarse_width",
                value: 0.0,
            });
        }
        if self.fine_window < 0 {
            return Err(HoughError::InvalidParameter {
                name: "fine_window",
                value: self.fine_window as f32,
            });
        }
        self.arc.validate()
    }
}
