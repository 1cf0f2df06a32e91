//! Candidate selection for the coarse pass and per-candidate fine refinement.
use super::HoughCircleParams;
use crate::accumulator::{CircleAccumulator, CircleSearchRange};
use crate::error::HoughResult;
use crate::mask::EdgeMask;
use crate::types::{Circle, CircleCandidate};

/// Vote count at zero-based position `rank` of the descending vote list.
///
/// Grids with fewer cells than `rank + 1` use their smallest count.
pub fn rank_threshold(acc: &CircleAccumulator, rank: usize) -> u32 {
    let mut votes = acc.votes().to_vec();
    if votes.is_empty() {
        return 0;
    }
    votes.sort_unstable_by(|a, b| b.cmp(a));
    votes[rank.min(votes.len() - 1)]
}

/// Coarse cells with `votes >= rank threshold` and `votes > floor`, in scan
/// order, together with the rank threshold used.
pub fn coarse_candidates(
    acc: &CircleAccumulator,
    rank: usize,
    floor: u32,
) -> (u32, Vec<CircleCandidate>) {
    let threshold = rank_threshold(acc, rank);
    let kept = acc
        .cells()
        .filter(|c| c.votes >= threshold && c.votes > floor)
        .collect();
    (threshold, kept)
}

/// Re-vote a `±fine_window` neighbourhood of `seed` on the full-resolution
/// mask and keep the cells reaching the local maximum with more than
/// `fine_floor` hits.
pub fn refine_candidate(
    mask: &EdgeMask,
    seed: &Circle,
    params: &HoughCircleParams,
) -> HoughResult<Vec<CircleCandidate>> {
    let range = CircleSearchRange::around(seed, params.fine_window);
    params.arc.ensure_budget(range.radii.max, params.max_cells)?;
    let mut acc = CircleAccumulator::with_limit(range, params.max_cells)?;
    acc.vote(mask, &params.arc);
    let local_max = acc.max_votes();
    Ok(acc
        .cells()
        .filter(|c| c.votes >= local_max && c.votes > params.fine_floor)
        .collect())
}

/// Survivor with the highest count; the first one wins ties.
pub fn select_best(survivors: &[CircleCandidate]) -> Option<CircleCandidate> {
    survivors.iter().fold(None, |best, c| match best {
        Some(b) if b.votes >= c.votes => Some(b),
        _ => Some(*c),
    })
}
