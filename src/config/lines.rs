use super::edge::MaskSourceConfig;
use crate::lines::HoughLineParams;
use crate::segments::SegmentWalkParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct LineToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub mask: MaskSourceConfig,
    #[serde(default)]
    pub hough: HoughLineParams,
    /// When present, lines are also cut into supported segments.
    #[serde(default)]
    pub segments: Option<SegmentWalkParams>,
    pub output: LineOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct LineOutputConfig {
    pub lines_json: PathBuf,
    #[serde(default)]
    pub overlay_image: Option<PathBuf>,
    #[serde(default)]
    pub mask_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<LineToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
