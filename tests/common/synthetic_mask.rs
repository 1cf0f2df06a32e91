use hough_detector::accumulator::ArcSampling;
use hough_detector::mask::EdgeMask;
use hough_detector::types::LineSegment;

/// Sets every pixel of the line `x·cosθ + y·sinθ = ρ` that falls in the mask
/// and returns how many new pixels were drawn.
pub fn draw_polar_line(mask: &mut EdgeMask, rho: f32, theta: f32) -> usize {
    let before = mask.count();
    let (c, s) = (theta.cos(), theta.sin());
    if s.abs() >= c.abs() {
        for x in 0..mask.width() as i32 {
            let y = ((rho - x as f32 * c) / s).round() as i32;
            mask.set_checked(x, y);
        }
    } else {
        for y in 0..mask.height() as i32 {
            let x = ((rho - y as f32 * s) / c).round() as i32;
            mask.set_checked(x, y);
        }
    }
    mask.count() - before
}

/// Horizontal run of pixels `[x0, x1)` on row `y`.
pub fn draw_row(mask: &mut EdgeMask, y: usize, x0: usize, x1: usize) {
    for x in x0..x1 {
        mask.set(x, y, true);
    }
}

/// Circle outline sampled exactly like the circle accumulator samples it.
pub fn draw_ring(mask: &mut EdgeMask, row: i32, col: i32, radius: i32) {
    for (di, dj) in ArcSampling::full_circle(6).offsets(radius) {
        mask.set_checked(col + dj, row + di);
    }
}

/// Arc between `start` and `end` (fractions of a turn, measured like the
/// accumulator: angle 0 points down the rows, π/2 along the columns).
pub fn draw_arc(mask: &mut EdgeMask, row: i32, col: i32, radius: i32, start: f32, end: f32) {
    let arc = ArcSampling {
        angles_per_radius: 6,
        start_fraction: start,
        end_fraction: end,
    };
    for (di, dj) in arc.offsets(radius) {
        mask.set_checked(col + dj, row + di);
    }
}

/// Three parallel `+45°` and three parallel `-45°` segments crossing near
/// `(cx, cy)`, giving nine nearby intersections.
pub fn cross_at(cx: i32, cy: i32, half: i32) -> Vec<LineSegment> {
    let mut segs = Vec::new();
    for k in -1..=1 {
        segs.push(LineSegment::new(
            [cx - half, cy - half + k],
            [cx + half, cy + half + k],
        ));
    }
    for k in -1..=1 {
        segs.push(LineSegment::new(
            [cx - half, cy + half + k],
            [cx + half, cy - half + k],
        ));
    }
    segs
}
