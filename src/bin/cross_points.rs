use hough_detector::config::cross::{self, CrossToolConfig};
use hough_detector::cross::{detect_cross_points, CrossParams, CrossReport};
use hough_detector::image::io::{load_grayscale_image, write_json_file};
use hough_detector::image::overlay::{GREEN, RED};
use hough_detector::image::Overlay;
use hough_detector::lines::HoughLineDetector;
use hough_detector::segments::walk_segments;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: CrossToolConfig = cross::load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let full = config.mask.build(&gray.as_view());
    let work = if config.work_width > 0 {
        full.downsample_to_width(config.work_width)
    } else {
        full.downsample_to_width(full.width())
    };
    let mask = &work.mask;

    let lines = HoughLineDetector::new(config.hough.clone())
        .detect(mask)
        .map_err(|e| format!("Line detection failed: {e}"))?;
    let segments = walk_segments(mask, &lines.lines, &config.segments);
    let params = CrossParams {
        scale: work.rate,
        ..config.cross.clone()
    };
    let report = detect_cross_points(&segments, mask.width(), mask.height(), &params)
        .map_err(|e| format!("Cross detection failed: {e}"))?;

    write_json_file(
        &config.output.cross_json,
        &CrossToolSummary {
            rate: work.rate,
            lines: lines.lines.len(),
            report: &report,
        },
    )?;

    if let Some(path) = &config.output.overlay_image {
        let mut overlay = Overlay::from_gray(&gray);
        let r = work.rate;
        for seg in &report.segments {
            overlay.draw_segment(
                [seg.p0[0] as f32 * r, seg.p0[1] as f32 * r],
                [seg.p1[0] as f32 * r, seg.p1[1] as f32 * r],
                GREEN,
            );
        }
        for c in &report.centers {
            overlay.draw_marker(c[0], c[1], 2, RED);
        }
        overlay.save(path)?;
    }

    println!(
        "{} segment(s), {} intersection(s), {} centre(s)",
        report.segments.len(),
        report.intersections.len(),
        report.centers.len()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: cross_points <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CrossToolSummary<'a> {
    rate: f32,
    lines: usize,
    report: &'a CrossReport,
}
