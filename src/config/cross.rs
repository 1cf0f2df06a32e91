use super::edge::MaskSourceConfig;
use crate::cross::CrossParams;
use crate::lines::HoughLineParams;
use crate::segments::SegmentWalkParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct CrossToolConfig {
    pub input: PathBuf,
    #[serde(default = "default_mask")]
    pub mask: MaskSourceConfig,
    /// Width the image is shrunk to before detection; 0 keeps full size.
    #[serde(default)]
    pub work_width: usize,
    #[serde(default = "default_hough")]
    pub hough: HoughLineParams,
    #[serde(default)]
    pub segments: SegmentWalkParams,
    #[serde(default)]
    pub cross: CrossParams,
    pub output: CrossOutputConfig,
}

fn default_mask() -> MaskSourceConfig {
    MaskSourceConfig::Gradient(Default::default())
}

fn default_hough() -> HoughLineParams {
    HoughLineParams {
        accumulator_threshold: 20,
        ..Default::default()
    }
}

#[derive(Debug, Deserialize)]
pub struct CrossOutputConfig {
    pub cross_json: PathBuf,
    #[serde(default)]
    pub overlay_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<CrossToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
