use crate::edges::{detect_edge_mask, EdgeParams};
use crate::image::{ImageF32, ImageU8};
use crate::mask::{EdgeMask, Polarity};
use serde::Deserialize;

/// How a tool turns its grayscale input into an `EdgeMask`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MaskSourceConfig {
    /// Binary threshold on raw intensities.
    Threshold {
        #[serde(default = "default_threshold")]
        threshold: u8,
        #[serde(default)]
        polarity: Polarity,
    },
    /// Gradient magnitude with optional non-maximum suppression.
    Gradient(EdgeParams),
}

fn default_threshold() -> u8 {
    100
}

impl Default for MaskSourceConfig {
    fn default() -> Self {
        MaskSourceConfig::Threshold {
            threshold: default_threshold(),
            polarity: Polarity::Bright,
        }
    }
}

impl MaskSourceConfig {
    pub fn build(&self, gray: &ImageU8<'_>) -> EdgeMask {
        match self {
            MaskSourceConfig::Threshold {
                threshold,
                polarity,
            } => EdgeMask::from_gray(gray, *threshold, *polarity),
            MaskSourceConfig::Gradient(params) => {
                detect_edge_mask(&ImageF32::from_u8(gray), params)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_modes() {
        let t: MaskSourceConfig =
            serde_json::from_str(r#"{ "mode": "threshold", "polarity": "dark" }"#).unwrap();
        assert!(matches!(
            t,
            MaskSourceConfig::Threshold {
                threshold: 100,
                polarity: Polarity::Dark
            }
        ));
        let g: MaskSourceConfig =
            serde_json::from_str(r#"{ "mode": "gradient", "magnitude_threshold": 0.2 }"#)
                .unwrap();
        match g {
            MaskSourceConfig::Gradient(p) => assert_eq!(p.magnitude_threshold, 0.2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn threshold_mode_builds_mask() {
        let data = [0u8, 200, 200, 0];
        let mask = MaskSourceConfig::default().build(&ImageU8::packed(2, 2, &data));
        assert_eq!(mask.count(), 2);
    }
}
