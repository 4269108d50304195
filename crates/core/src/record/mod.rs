use std::path::PathBuf;

use image::RgbImage;
use tracing::info;

use crate::{Mode, Result};

/// Writes composed frames to disk when the single-press action fires.
#[derive(Debug)]
pub struct SnapshotRecorder {
    dir: PathBuf,
    taken: usize,
}

impl SnapshotRecorder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            taken: 0,
        }
    }

    pub fn taken(&self) -> usize {
        self.taken
    }

    /// Saves `frame` as `snapshot-<mode>-<n>.png` and returns its path.
    pub fn capture(&mut self, frame: &RgbImage, mode: Mode) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("snapshot-{}-{}.png", mode.slug(), self.taken + 1));
        frame.save(&path)?;
        self.taken += 1;
        info!(path = %path.display(), "snapshot saved");
        Ok(path)
    }
}
