//! Turn infinite polar lines into finite segments supported by the mask.
//!
//! Each line is clipped to the mask rectangle and walked one pixel at a time.
//! A sample is supported when its 3×3 neighbourhood holds at least
//! `min_support` foreground pixels. Supported samples separated by at most
//! `max_gap` unsupported ones belong to the same run; runs of at least
//! `min_length` pixels become [`LineSegment`]s.
use crate::mask::EdgeMask;
use crate::types::{LineSegment, PolarLine};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentWalkParams {
    /// Shortest emitted segment, in pixels.
    pub min_length: f32,
    /// Longest run of unsupported samples bridged inside a segment.
    pub max_gap: usize,
    /// Foreground pixels required in the 3×3 neighbourhood of a sample.
    pub min_support: usize,
}

impl Default for SegmentWalkParams {
    fn default() -> Self {
        Self {
            min_length: 50.0,
            max_gap: 10,
            min_support: 2,
        }
    }
}

/// Foreground pixels in the 3×3 neighbourhood of `(x, y)`, centre included.
pub fn neighbourhood_support(mask: &EdgeMask, x: i32, y: i32) -> usize {
    let mut n = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if mask.is_set(x + dx, y + dy) {
                n += 1;
            }
        }
    }
    n
}

/// Supported runs along a single line, in walk order.
pub fn walk_line(mask: &EdgeMask, line: &PolarLine, params: &SegmentWalkParams) -> Vec<LineSegment> {
    let Some((a, b)) = line.clip_to_rect(mask.width(), mask.height()) else {
        return Vec::new();
    };
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

    let mut out = Vec::new();
    let mut run: Option<([i32; 2], [i32; 2])> = None;
    let mut gap = 0usize;
    let mut last: Option<[i32; 2]> = None;
    for k in 0..=steps {
        let t = k as f32 / steps as f32;
        let p = [
            (a[0] + t * dx).round() as i32,
            (a[1] + t * dy).round() as i32,
        ];
        if last == Some(p) {
            continue;
        }
        last = Some(p);

        if neighbourhood_support(mask, p[0], p[1]) >= params.min_support {
            run = Some(match run {
                Some((start, _)) => (start, p),
                None => (p, p),
            });
            gap = 0;
        } else if run.is_some() {
            gap += 1;
            if gap > params.max_gap {
                flush(&mut run, &mut out, params.min_length);
                gap = 0;
            }
        }
    }
    flush(&mut run, &mut out, params.min_length);
    out
}

fn flush(run: &mut Option<([i32; 2], [i32; 2])>, out: &mut Vec<LineSegment>, min_length: f32) {
    if let Some((start, end)) = run.take() {
        let seg = LineSegment::new(start, end);
        if seg.length() >= min_length {
            out.push(seg);
        }
    }
}

/// Walk every line and collect the segments in line order.
pub fn walk_segments(
    mask: &EdgeMask,
    lines: &[PolarLine],
    params: &SegmentWalkParams,
) -> Vec<LineSegment> {
    let segments: Vec<LineSegment> = lines
        .iter()
        .flat_map(|line| walk_line(mask, line, params))
        .collect();
    debug!(
        "walk_segments: {} line(s) -> {} segment(s)",
        lines.len(),
        segments.len()
    );
    segments
}
