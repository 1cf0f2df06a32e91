use super::edge::MaskSourceConfig;
use crate::accumulator::CircleSearchRange;
use crate::circle::HoughCircleParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct CircleToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub mask: MaskSourceConfig,
    /// Full-resolution search range. Defaults to the central band of the
    /// image when omitted.
    #[serde(default)]
    pub range: Option<CircleSearchRange>,
    #[serde(default)]
    pub hough: HoughCircleParams,
    pub output: CircleOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CircleOutputConfig {
    pub circle_json: PathBuf,
    #[serde(default)]
    pub overlay_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<CircleToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
