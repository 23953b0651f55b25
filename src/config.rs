//! Run configuration loaded from config.json.
//!
//! Missing or unparsable files fall back to defaults. The resulting value is
//! built once in `main` and passed by reference to every stage.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::extract::MatchPolicy;

/// Image preprocessing applied before recognition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Fraction of the width kept, measured from the left edge
    pub crop_width_fraction: f32,
    /// Neighbourhood size for adaptive thresholding (odd)
    pub block_size: u32,
    /// Constant subtracted from the local mean
    pub offset: i32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            crop_width_fraction: 0.75,
            block_size: 11,
            offset: 2,
        }
    }
}

/// Tesseract location and language.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseractConfig {
    /// Explicit path to the executable; searched for when unset
    pub executable: Option<PathBuf>,
    /// Passed as --tessdata-dir when set
    pub tessdata_dir: Option<PathBuf>,
    /// Tesseract language code
    pub language: String,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            executable: None,
            tessdata_dir: None,
            language: "eng".to_string(),
        }
    }
}

/// Complete run configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// File extensions treated as input images (case-insensitive, no dot)
    pub image_extensions: Vec<String>,
    pub preprocess: PreprocessConfig,
    pub tesseract: TesseractConfig,
    /// Identity acceptance rules
    pub policy: MatchPolicy,
    /// Worker threads; 0 uses available parallelism
    pub workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_extensions: vec!["jpg".to_string()],
            preprocess: PreprocessConfig::default(),
            tesseract: TesseractConfig::default(),
            policy: MatchPolicy::default(),
            workers: 0,
        }
    }
}

impl AppConfig {
    /// Load config from file, or return defaults if the file is missing or invalid.
    pub fn load(config_path: &Path) -> Self {
        if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => {
                        crate::log(&format!("Loaded config from {}", config_path.display()));
                        return config;
                    }
                    Err(e) => {
                        crate::log(&format!("Failed to parse config: {}. Using defaults.", e));
                    }
                },
                Err(e) => {
                    crate::log(&format!("Failed to read config: {}. Using defaults.", e));
                }
            }
        } else {
            crate::log(&format!(
                "{} not found. Using default config.",
                config_path.display()
            ));
        }
        Self::default()
    }

    /// Resolves the config path: explicit path, next to the executable, then
    /// the user config directory. Falls back to the executable location.
    pub fn locate(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        let beside_exe = crate::paths::get_exe_dir().join("config.json");
        if beside_exe.exists() {
            return beside_exe;
        }

        match crate::paths::get_user_config_path() {
            Some(user) if user.exists() => user,
            _ => beside_exe,
        }
    }

    /// Number of worker threads to start for `jobs` images.
    pub fn worker_count(&self, jobs: usize) -> usize {
        let wanted = if self.workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.workers
        };
        wanted.min(jobs).max(1)
    }

    /// True if `path` has one of the configured image extensions.
    pub fn is_image(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.image_extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}
