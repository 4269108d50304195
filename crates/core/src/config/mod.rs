use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{OverlayError, Result};

/// Tunables for a preview session. The defaults reproduce the reference
/// camera demo: 1280x720 frames, a 30 ms input poll and the fixed blend
/// weights for templates and reference images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    pub poll_timeout_ms: u64,
    /// Weight given to a catalog template when blended over the base image.
    pub template_alpha: f32,
    /// Weight given to a loaded reference image.
    pub reference_alpha: f32,
    /// Catalog entry shown once a surface has been detected.
    pub template: String,
    /// Directory for single-action snapshots. Snapshots are disabled when unset.
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_width: 1280,
            frame_height: 720,
            poll_timeout_ms: 30,
            template_alpha: 0.7,
            reference_alpha: 0.6,
            template: "circle".to_string(),
            snapshot_dir: None,
        }
    }
}

impl SessionConfig {
    /// Reads a JSON configuration file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(OverlayError::msg(format!(
                "frame size {}x{} must be non-zero",
                self.frame_width, self.frame_height
            )));
        }

        for (name, alpha) in [
            ("template_alpha", self.template_alpha),
            ("reference_alpha", self.reference_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(OverlayError::msg(format!(
                    "{name} must lie in [0, 1], got {alpha}"
                )));
            }
        }

        Ok(())
    }
}
