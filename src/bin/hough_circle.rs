use hough_detector::accumulator::CircleSearchRange;
use hough_detector::circle::{CircleReport, HoughCircleDetector};
use hough_detector::config::circle::{self, CircleToolConfig};
use hough_detector::image::io::{load_grayscale_image, write_json_file};
use hough_detector::image::overlay::{RED, YELLOW};
use hough_detector::image::Overlay;
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
    let config: CircleToolConfig = circle::load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let mask = config.mask.build(&gray.as_view());
    let range = config
        .range
        .unwrap_or_else(|| CircleSearchRange::central(mask.width(), mask.height()));
    let report = HoughCircleDetector::new(range, config.hough.clone())
        .detect(&mask)
        .map_err(|e| format!("Circle detection failed: {e}"))?;

    write_json_file(
        &config.output.circle_json,
        &CircleToolSummary {
            range,
            report: &report,
        },
    )?;

    if let Some(path) = &config.output.overlay_image {
        let mut overlay = Overlay::from_gray(&gray);
        overlay.draw_mask(&mask, YELLOW);
        if let Some(best) = &report.circle {
            let c = best.circle;
            overlay.draw_circle(c.row, c.col, c.radius, RED);
            overlay.draw_marker(c.col, c.row, 1, RED);
        }
        overlay.save(path)?;
    }

    match &report.circle {
        Some(best) => println!(
            "Circle at row={} col={} r={} ({} votes)",
            best.circle.row, best.circle.col, best.circle.radius, best.votes
        ),
        None => println!("No circle found"),
    }
    Ok(())
}

fn usage() -> String {
    "Usage: hough_circle <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CircleToolSummary<'a> {
    range: CircleSearchRange,
    report: &'a CircleReport,
}
