//! Cross-point detection from pairwise segment intersections.
//!
//! The chain is:
//! 1. keep diagonal segments only (`min_abs_slope ≤ |dy/dx| ≤ max_abs_slope`,
//!    vertical segments dropped before any division);
//! 2. intersect every pair whose direction cosine lies strictly inside
//!    `±max_abs_cos`, keeping points strictly inside the image and strictly
//!    inside the overlap of both segments' extended bounding boxes;
//! 3. cluster the points greedily: a point joins the first cluster holding a
//!    member closer than `cluster_distance`, otherwise it opens a new one;
//! 4. with three or more clusters keep those at least as large as the
//!    second-largest, then report the centroid of every cluster with at least
//!    `min_cluster_size` members, scaled by `scale`.
//!
//! Cluster assignment depends on point order and is never revisited.
use crate::angle::direction_cosine;
use crate::error::{HoughError, HoughResult};
use crate::types::LineSegment;
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

const EPS: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossParams {
    pub min_abs_slope: f32,
    pub max_abs_slope: f32,
    /// Pairs need `|cos| < max_abs_cos` to be intersected.
    pub max_abs_cos: f32,
    /// Fewer kept segments than this produce no intersections.
    pub min_segments: usize,
    /// Points closer than this (truncated Euclidean, pixels) share a cluster.
    pub cluster_distance: i32,
    /// Fewer intersections than this produce no clusters.
    pub min_intersections: usize,
    /// Clusters smaller than this yield no centre.
    pub min_cluster_size: usize,
    /// Multiplier applied to centres, e.g. to map back to full resolution.
    pub scale: f32,
}

impl Default for CrossParams {
    fn default() -> Self {
        Self {
            min_abs_slope: 0.25,
            max_abs_slope: 4.0,
            max_abs_cos: 0.6,
            min_segments: 4,
            cluster_distance: 15,
            min_intersections: 6,
            min_cluster_size: 6,
            scale: 1.0,
        }
    }
}

impl CrossParams {
    pub fn validate(&self) -> HoughResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(HoughError::InvalidParameter {
                name: "scale",
                value: self.scale,
            });
        }
        if !(self.min_abs_slope >= 0.0 && self.min_abs_slope <= self.max_abs_slope) {
            return Err(HoughError::InvalidParameter {
                name: "max_abs_slope",
                value: self.max_abs_slope,
            });
        }
        if self.cluster_distance <= 0 {
            return Err(HoughError::InvalidParameter {
                name: "cluster_distance",
                value: self.cluster_distance as f32,
            });
        }
        Ok(())
    }
}

/// Everything produced along the way, for inspection by the tools.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossReport {
    pub segments: Vec<LineSegment>,
    pub intersections: Vec<[i32; 2]>,
    pub clusters: Vec<Vec<[i32; 2]>>,
    pub centers: Vec<[i32; 2]>,
}

/// Drops vertical, near-vertical and near-horizontal segments.
pub fn filter_diagonal(segments: &[LineSegment], params: &CrossParams) -> Vec<LineSegment> {
    segments
        .iter()
        .filter(|s| {
            if s.dx() == 0 {
                return false;
            }
            let slope = (s.dy() as f32 / s.dx() as f32).abs();
            slope >= params.min_abs_slope && slope <= params.max_abs_slope
        })
        .copied()
        .collect()
}

/// Intersection of the infinite lines through two segments, rounded to the
/// nearest pixel. Parallel or degenerate pairs give `None`.
pub fn intersect(a: &LineSegment, b: &LineSegment) -> Option<[i32; 2]> {
    let homog = |p: [i32; 2]| Vector3::new(p[0] as f64, p[1] as f64, 1.0);
    let la = homog(a.p0).cross(&homog(a.p1));
    let lb = homog(b.p0).cross(&homog(b.p1));
    let x = la.cross(&lb);
    if x.z.abs() < EPS {
        return None;
    }
    let (px, py) = (x.x / x.z, x.y / x.z);
    if !px.is_finite() || !py.is_finite() {
        return None;
    }
    Some([px.round() as i32, py.round() as i32])
}

fn direction(s: &LineSegment) -> [f32; 2] {
    [s.dx() as f32, s.dy() as f32]
}

/// Gated pairwise intersections in pair order `(i, j), i < j`.
pub fn find_intersections(
    segments: &[LineSegment],
    width: usize,
    height: usize,
    params: &CrossParams,
) -> Vec<[i32; 2]> {
    let mut points = Vec::new();
    if segments.len() < params.min_segments {
        return points;
    }
    let (w, h) = (width as i32, height as i32);
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            let Some(cos) = direction_cosine(&direction(a), &direction(b)) else {
                continue;
            };
            if cos.abs() >= params.max_abs_cos {
                continue;
            }
            let Some(p) = intersect(a, b) else {
                continue;
            };
            if !(p[0] > 0 && p[0] < w && p[1] > 0 && p[1] < h) {
                continue;
            }
            let (ba, bb) = (a.extended_bounds(), b.extended_bounds());
            let x_min = ba[0].max(bb[0]);
            let y_min = ba[1].max(bb[1]);
            let x_max = ba[2].min(bb[2]);
            let y_max = ba[3].min(bb[3]);
            if p[0] > x_min && p[0] < x_max && p[1] > y_min && p[1] < y_max {
                points.push(p);
            }
        }
    }
    points
}

/// Euclidean distance truncated to whole pixels.
#[inline]
pub fn pixel_distance(a: [i32; 2], b: [i32; 2]) -> i32 {
    let (dx, dy) = ((a[0] - b[0]) as f32, (a[1] - b[1]) as f32);
    (dx * dx + dy * dy).sqrt() as i32
}

/// Greedy single-linkage clustering in input order.
pub fn cluster_points(points: &[[i32; 2]], distance: i32) -> Vec<Vec<[i32; 2]>> {
    let mut clusters: Vec<Vec<[i32; 2]>> = Vec::new();
    for &p in points {
        let home = clusters
            .iter()
            .position(|c| c.iter().any(|&q| pixel_distance(p, q) < distance));
        match home {
            Some(idx) => clusters[idx].push(p),
            None => clusters.push(vec![p]),
        }
    }
    clusters
}

/// With three or more clusters, keep those whose size is at least the
/// second-largest size. Smaller inputs pass through unchanged.
pub fn dominant_clusters(clusters: Vec<Vec<[i32; 2]>>) -> Vec<Vec<[i32; 2]>> {
    if clusters.len() < 3 {
        return clusters;
    }
    let mut sizes: Vec<usize> = clusters.iter().map(Vec::len).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    let second = sizes[1];
    clusters.into_iter().filter(|c| c.len() >= second).collect()
}

/// Rounded, scaled centroid of every cluster with at least `min_size` points.
pub fn cluster_centers(clusters: &[Vec<[i32; 2]>], min_size: usize, scale: f32) -> Vec<[i32; 2]> {
    clusters
        .iter()
        .filter(|c| !c.is_empty() && c.len() >= min_size)
        .map(|c| {
            let n = c.len() as f32;
            let (sx, sy) = c
                .iter()
                .fold((0i64, 0i64), |(sx, sy), p| (sx + p[0] as i64, sy + p[1] as i64));
            [
                (scale * sx as f32 / n).round() as i32,
                (scale * sy as f32 / n).round() as i32,
            ]
        })
        .collect()
}

/// Run the whole chain on segments found in a `width × height` image.
pub fn detect_cross_points(
    segments: &[LineSegment],
    width: usize,
    height: usize,
    params: &CrossParams,
) -> HoughResult<CrossReport> {
    if width == 0 || height == 0 {
        return Err(HoughError::EmptyMask { width, height });
    }
    params.validate()?;

    let kept = filter_diagonal(segments, params);
    let intersections = find_intersections(&kept, width, height, params);
    let clusters = if intersections.len() >= params.min_intersections {
        dominant_clusters(cluster_points(&intersections, params.cluster_distance))
    } else {
        Vec::new()
    };
    let centers = cluster_centers(&clusters, params.min_cluster_size, params.scale);
    debug!(
        "detect_cross_points: {} segment(s), {} kept, {} intersection(s), {} cluster(s), {} centre(s)",
        segments.len(),
        kept.len(),
        intersections.len(),
        clusters.len(),
        centers.len()
    );

    Ok(CrossReport {
        segments: kept,
        intersections,
        clusters,
        centers,
    })
}
