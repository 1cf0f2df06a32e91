mod common;

use common::init_logger;
use common::synthetic_mask::{draw_arc, draw_ring};
use hough_detector::accumulator::{ArcSampling, AxisRange, CircleSearchRange};
use hough_detector::{detect_circle, Circle, EdgeMask, HoughCircleDetector, HoughCircleParams};

fn central_range() -> CircleSearchRange {
    CircleSearchRange::new(
        AxisRange::new(40, 60),
        AxisRange::new(40, 60),
        AxisRange::new(25, 35),
    )
}

fn assert_near(found: Circle, expected: Circle) {
    assert!(
        (found.row - expected.row).abs() <= 2
            && (found.col - expected.col).abs() <= 2
            && (found.radius - expected.radius).abs() <= 2,
        "found {found:?}, expected {expected:?}"
    );
}

#[test]
fn full_ring_is_found_in_two_stages() {
    init_logger();
    let mut mask = EdgeMask::new(100, 100);
    draw_ring(&mut mask, 50, 50, 30);

    let report = HoughCircleDetector::new(central_range(), HoughCircleParams::default())
        .detect(&mask)
        .unwrap();
    assert!((report.rate - 2.0).abs() < 1e-6);
    let coarse = report.coarse_range.expect("coarse range");
    assert_eq!(coarse.rows, AxisRange::new(20, 30));
    assert_eq!(coarse.radii, AxisRange::new(12, 18));
    assert!(!report.coarse_candidates.is_empty());
    assert!(report
        .coarse_candidates
        .iter()
        .all(|c| c.votes >= report.coarse_threshold && c.votes > 10));
    assert!(report.refined.iter().all(|c| c.votes > 20));

    let best = report.circle.expect("circle");
    assert_near(best.circle, Circle::new(50, 50, 30));
    assert!(report.timing.stage_ms("coarse_vote").is_some());
}

#[test]
fn sampled_arc_alone_is_enough() {
    init_logger();
    let mut mask = EdgeMask::new(100, 100);
    draw_arc(&mut mask, 48, 53, 28, 1.0 / 12.0, 0.75);
    let found = detect_circle(&mask, &central_range(), &HoughCircleParams::default())
        .unwrap()
        .expect("circle");
    assert_near(found, Circle::new(48, 53, 28));
}

#[test]
fn narrow_mask_runs_coarse_pass_at_full_resolution() {
    init_logger();
    let mut mask = EdgeMask::new(48, 48);
    draw_ring(&mut mask, 24, 23, 15);
    let range = CircleSearchRange::new(
        AxisRange::new(20, 28),
        AxisRange::new(20, 28),
        AxisRange::new(12, 18),
    );
    let report = HoughCircleDetector::new(range, HoughCircleParams::default())
        .detect(&mask)
        .unwrap();
    assert_eq!(report.rate, 1.0);
    assert_eq!(report.coarse_range, Some(range));
    assert_eq!(report.circle.map(|c| c.circle), Some(Circle::new(24, 23, 15)));
}

#[test]
fn sparse_noise_is_not_a_detection() {
    init_logger();
    let mut mask = EdgeMask::new(100, 100);
    for i in 0..12 {
        mask.set((i * 37) % 100, (i * 53) % 100, true);
    }
    let report = HoughCircleDetector::new(central_range(), HoughCircleParams::default())
        .detect(&mask)
        .unwrap();
    assert!(report.circle.is_none());
    assert!(report.refined.is_empty());
}

#[test]
fn detections_do_not_leak_between_runs() {
    init_logger();
    let detector = HoughCircleDetector::new(central_range(), HoughCircleParams::default());
    let mut first = EdgeMask::new(100, 100);
    draw_ring(&mut first, 45, 55, 27);
    let mut second = EdgeMask::new(100, 100);
    draw_ring(&mut second, 55, 46, 33);

    let a = detector.detect(&first).unwrap().circle.expect("first");
    let b = detector.detect(&second).unwrap().circle.expect("second");
    let a_again = detector.detect(&first).unwrap().circle.expect("first again");
    assert_near(a.circle, Circle::new(45, 55, 27));
    assert_near(b.circle, Circle::new(55, 46, 33));
    assert_eq!(a, a_again);
}

#[test]
fn full_circle_sampling_counts_every_angle() {
    let arc = ArcSampling::full_circle(6);
    let mut mask = EdgeMask::new(100, 100);
    draw_ring(&mut mask, 50, 50, 30);
    let params = HoughCircleParams {
        arc,
        ..Default::default()
    };
    let report = HoughCircleDetector::new(central_range(), params)
        .detect(&mask)
        .unwrap();
    let best = report.circle.expect("circle");
    assert_eq!(best.circle, Circle::new(50, 50, 30));
    assert_eq!(best.votes as usize, arc.sample_count(30));
}
