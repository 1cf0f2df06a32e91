use hough_detector::config::lines::{self, LineToolConfig};
use hough_detector::image::io::{load_grayscale_image, save_mask_png, write_json_file};
use hough_detector::image::overlay::{GREEN, RED};
use hough_detector::image::Overlay;
use hough_detector::lines::{HoughLineDetector, LineReport};
use hough_detector::segments::walk_segments;
use hough_detector::types::LineSegment;
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
    let config: LineToolConfig = lines::load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let mask = config.mask.build(&gray.as_view());
    let report = HoughLineDetector::new(config.hough.clone())
        .detect(&mask)
        .map_err(|e| format!("Line detection failed: {e}"))?;
    let segments = config
        .segments
        .as_ref()
        .map(|params| walk_segments(&mask, &report.lines, params))
        .unwrap_or_default();

    let summary = LineToolSummary {
        width: mask.width(),
        height: mask.height(),
        report: &report,
        segments: &segments,
    };
    write_json_file(&config.output.lines_json, &summary)?;

    if let Some(path) = &config.output.mask_image {
        save_mask_png(&mask, path)?;
    }
    if let Some(path) = &config.output.overlay_image {
        let mut overlay = Overlay::from_gray(&gray);
        for line in &report.lines {
            if let Some((a, b)) = line.clip_to_rect(mask.width(), mask.height()) {
                overlay.draw_segment(a, b, RED);
            }
        }
        for seg in &segments {
            overlay.draw_segment(
                [seg.p0[0] as f32, seg.p0[1] as f32],
                [seg.p1[0] as f32, seg.p1[1] as f32],
                GREEN,
            );
        }
        overlay.save(path)?;
    }

    println!(
        "Detected {} line(s) in {:.3} ms; summary written to {}",
        report.lines.len(),
        report.timing.total_ms,
        config.output.lines_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: hough_lines <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LineToolSummary<'a> {
    width: usize,
    height: usize,
    report: &'a LineReport,
    segments: &'a [LineSegment],
}
