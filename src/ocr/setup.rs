use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::TesseractConfig;
use crate::log;

/// Default Windows install locations checked after the configured path.
const COMMON_PATHS: [&str; 2] = [
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

/// Locates the Tesseract executable.
///
/// Order: configured path, common install paths, then `tesseract` on PATH.
pub fn find_tesseract_executable(config: &TesseractConfig) -> Result<PathBuf> {
    if let Some(configured) = &config.executable {
        if configured.exists() {
            log(&format!("Using configured Tesseract: {}", configured.display()));
            return Ok(configured.clone());
        }
        log(&format!(
            "Configured Tesseract not found at {}, searching defaults",
            configured.display()
        ));
    }

    for path in COMMON_PATHS {
        if Path::new(path).exists() {
            log(&format!("Found Tesseract at: {}", path));
            return Ok(PathBuf::from(path));
        }
    }

    if responds_to_version(Path::new("tesseract")) {
        log("Found Tesseract in system PATH");
        return Ok(PathBuf::from("tesseract"));
    }

    Err(anyhow!(
        "Tesseract not found. Install it or set tesseract.executable in config.json"
    ))
}

/// Returns true if `<exe> --version` runs and exits successfully.
fn responds_to_version(executable: &Path) -> bool {
    Command::new(executable)
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
