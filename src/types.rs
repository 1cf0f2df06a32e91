//! Geometric primitives produced by the detectors.
//!
//! Lines use the normal form `ρ = x·cos θ + y·sin θ` with the origin at the
//! top-left pixel, `x` to the right and `y` down. Circles use `(row, col)`
//! centre coordinates in pixels.
use serde::{Deserialize, Serialize};

/// An infinite line in normal (ρ, θ) form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolarLine {
    /// Perpendicular distance from the origin, in pixels.
    pub rho: f32,
    /// Angle of the normal, in radians.
    pub theta: f32,
    /// Accumulator count at extraction time.
    pub votes: u32,
}

impl PolarLine {
    /// Unit normal `(cos θ, sin θ)`.
    #[inline]
    pub fn normal(&self) -> [f32; 2] {
        [self.theta.cos(), self.theta.sin()]
    }

    /// Unit direction along the line, perpendicular to the normal.
    #[inline]
    pub fn direction(&self) -> [f32; 2] {
        let [c, s] = self.normal();
        [-s, c]
    }

    /// Foot of the perpendicular from the origin.
    #[inline]
    pub fn anchor(&self) -> [f32; 2] {
        let [c, s] = self.normal();
        [self.rho * c, self.rho * s]
    }

    /// Signed distance from `(x, y)` to the line.
    #[inline]
    pub fn distance(&self, x: f32, y: f32) -> f32 {
        let [c, s] = self.normal();
        x * c + y * s - self.rho
    }

    /// Endpoints of the part of the line inside `[0, w-1] × [0, h-1]`.
    ///
    /// Returns `None` when the line misses the rectangle.
    pub fn clip_to_rect(&self, w: usize, h: usize) -> Option<([f32; 2], [f32; 2])> {
        if w == 0 || h == 0 {
            return None;
        }
        let p = self.anchor();
        let d = self.direction();
        let limits = [(w - 1) as f32, (h - 1) as f32];
        let mut t0 = f32::NEG_INFINITY;
        let mut t1 = f32::INFINITY;
        for axis in 0..2 {
            if d[axis].abs() < 1e-6 {
                // Parallel to this slab: either fully inside or missed.
                if p[axis] < -0.5 || p[axis] > limits[axis] + 0.5 {
                    return None;
                }
                continue;
            }
            let a = (0.0 - p[axis]) / d[axis];
            let b = (limits[axis] - p[axis]) / d[axis];
            t0 = t0.max(a.min(b));
            t1 = t1.min(a.max(b));
        }
        if t0 > t1 {
            return None;
        }
        let at = |t: f32| [p[0] + t * d[0], p[1] + t * d[1]];
        Some((at(t0), at(t1)))
    }
}

/// A circle in pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub row: i32,
    pub col: i32,
    pub radius: i32,
}

impl Circle {
    pub fn new(row: i32, col: i32, radius: i32) -> Self {
        Self { row, col, radius }
    }

    /// Scale every component and round to the nearest pixel.
    pub fn scaled(&self, rate: f32) -> Self {
        Self {
            row: (self.row as f32 * rate).round() as i32,
            col: (self.col as f32 * rate).round() as i32,
            radius: (self.radius as f32 * rate).round() as i32,
        }
    }
}

/// A circle hypothesis with the number of edge hits supporting it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleCandidate {
    pub circle: Circle,
    pub votes: u32,
}

/// A finite segment between two pixel positions `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    pub p0: [i32; 2],
    pub p1: [i32; 2],
}

impl LineSegment {
    pub fn new(p0: [i32; 2], p1: [i32; 2]) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn dx(&self) -> i32 {
        self.p1[0] - self.p0[0]
    }

    #[inline]
    pub fn dy(&self) -> i32 {
        self.p1[1] - self.p0[1]
    }

    pub fn length(&self) -> f32 {
        let (dx, dy) = (self.dx() as f32, self.dy() as f32);
        (dx * dx + dy * dy).sqrt()
    }

    /// Bounding box `[x_min, y_min, x_max, y_max]` grown by the segment's own
    /// extent on each axis.
    pub fn extended_bounds(&self) -> [i32; 4] {
        let (ax, ay) = (self.dx().abs(), self.dy().abs());
        [
            self.p0[0].min(self.p1[0]) - ax,
            self.p0[1].min(self.p1[1]) - ay,
            self.p0[0].max(self.p1[0]) + ax,
            self.p0[1].max(self.p1[1]) + ay,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn horizontal_line_clips_to_full_width() {
        let line = PolarLine {
            rho: 10.0,
            theta: FRAC_PI_2,
            votes: 0,
        };
        let (a, b) = line.clip_to_rect(40, 20).expect("inside");
        let xs = [a[0].min(b[0]), a[0].max(b[0])];
        assert!(xs[0].abs() < 1e-3 && (xs[1] - 39.0).abs() < 1e-3);
        assert!((a[1] - 10.0).abs() < 1e-3 && (b[1] - 10.0).abs() < 1e-3);
    }

    #[test]
    fn line_outside_rect_is_rejected() {
        let line = PolarLine {
            rho: 50.0,
            theta: 0.0,
            votes: 0,
        };
        assert!(line.clip_to_rect(40, 20).is_none());
    }

    #[test]
    fn diagonal_line_clips_to_corners() {
        // x + y = 19 through a 20×20 image touches (19, 0) and (0, 19)
        let theta = std::f32::consts::FRAC_PI_4;
        let line = PolarLine {
            rho: 19.0 * theta.cos(),
            theta,
            votes: 0,
        };
        let (a, b) = line.clip_to_rect(20, 20).expect("inside");
        assert!(line.distance(a[0], a[1]).abs() < 1e-3);
        let span = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt();
        assert!((span - 19.0 * 2f32.sqrt()).abs() < 1e-2);
    }

    #[test]
    fn extended_bounds_grow_by_span() {
        let seg = LineSegment::new([10, 20], [14, 18]);
        assert_eq!(seg.extended_bounds(), [6, 16, 18, 22]);
    }

    #[test]
    fn circle_scaling_rounds() {
        assert_eq!(Circle::new(25, 24, 15).scaled(2.0), Circle::new(50, 48, 30));
        assert_eq!(Circle::new(3, 3, 3).scaled(1.5), Circle::new(5, 5, 5));
    }
}
