pub mod engine;
pub mod preprocess;
pub mod setup;

pub use engine::{TesseractRecognizer, TextRecognizer};
pub use setup::find_tesseract_executable;

use anyhow::Result;

use crate::config::AppConfig;

/// Builds the Tesseract-backed recognizer described by the configuration.
pub fn build_recognizer(config: &AppConfig) -> Result<TesseractRecognizer> {
    let executable = find_tesseract_executable(&config.tesseract)?;
    Ok(TesseractRecognizer::new(
        executable,
        &config.tesseract,
        &config.preprocess,
    ))
}
