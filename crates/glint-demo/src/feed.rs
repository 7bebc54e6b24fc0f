//! Live feed collaborator: plays a directory of frames at a fixed rate.
//!
//! Frames are decoded up front, then a tokio task publishes them into a
//! [`FrameSlot`] in a loop. The session reads the slot as a live source and
//! sees no frame until the first publish.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glint_core::{FrameImage, FrameSlot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::frame_period;
use crate::error::DemoError;
use crate::image_loader::{is_supported_image, load_image};

/// Owns the running feed task, if any.
#[derive(Debug, Default)]
pub struct FeedController {
    slot: FrameSlot,
    task: Option<JoinHandle<()>>,
}

impl FeedController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop any running feed, then start playing `dir` at `fps`.
    ///
    /// An unreadable or empty directory is an acquisition failure; the caller
    /// decides how to fall back.
    pub async fn start(&mut self, dir: &Path, fps: f32) -> Result<FrameSlot, DemoError> {
        self.stop();
        let period = frame_period("feed fps", fps)?;

        let owned = dir.to_path_buf();
        let frames = tokio::task::spawn_blocking(move || load_sequence(&owned))
            .await
            .map_err(|err| DemoError::Acquisition(format!("frame loader task failed: {err}")))??;

        tracing::info!(dir = %dir.display(), frames = frames.len(), fps, "live feed started");

        let slot = self.slot.clone();
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            for frame in frames.iter().cycle() {
                ticker.tick().await;
                slot.publish(Arc::clone(frame));
            }
        }));
        Ok(self.slot.clone())
    }

    /// Abort the feed task and empty the slot.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!("live feed stopped");
        }
        self.slot.clear();
    }
}

impl Drop for FeedController {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Decode every supported image in `dir`, ordered by file name.
pub fn load_sequence(dir: &Path) -> Result<Vec<Arc<FrameImage>>, DemoError> {
    let entries = std::fs::read_dir(dir).map_err(|err| {
        DemoError::Acquisition(format!("cannot open feed directory {}: {err}", dir.display()))
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(DemoError::Acquisition(format!(
            "no frames found in {}",
            dir.display()
        )));
    }

    paths
        .iter()
        .map(|path| load_image(path).map(Arc::new).map_err(DemoError::from))
        .collect()
}
