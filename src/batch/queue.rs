//! Work queue feeding image paths to the worker threads.
//!
//! Uses a std::sync::mpsc channel filled up front; workers share the receiver
//! behind a mutex and pull items until the channel is drained and closed.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::config::AppConfig;

/// A work item for an image worker.
#[derive(Debug, Clone)]
pub struct ImageWorkItem {
    /// Position in the sorted input list (0-based)
    pub index: usize,
    /// Path to the image file
    pub path: PathBuf,
}

/// Creates a new work queue.
///
/// The channel is unbounded; the whole batch is queued before workers start.
pub fn create_work_queue() -> (Sender<ImageWorkItem>, Receiver<ImageWorkItem>) {
    channel()
}

/// Lists the input images in `dir`, sorted by path.
///
/// Only regular files whose extension is configured as an image are kept;
/// subdirectories are not searched.
pub fn collect_images(dir: &Path, config: &AppConfig) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .context(format!("Failed to read input folder: {}", dir.display()))?;

    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && config.is_image(path))
        .collect();

    images.sort();
    Ok(images)
}
