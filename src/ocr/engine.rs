use anyhow::{anyhow, Context, Result};
use image::GrayImage;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

use super::preprocess::prepare_for_ocr;
use crate::config::{PreprocessConfig, TesseractConfig};

/// Turns one image file into a raw transcript.
///
/// Implementations are shared across worker threads.
pub trait TextRecognizer: Sync {
    fn transcribe(&self, image_path: &Path) -> Result<String>;
}

/// Recognizer backed by the Tesseract command line tool.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    executable: PathBuf,
    tessdata_dir: Option<PathBuf>,
    language: String,
    preprocess: PreprocessConfig,
}

impl TesseractRecognizer {
    pub fn new(executable: PathBuf, tesseract: &TesseractConfig, preprocess: &PreprocessConfig) -> Self {
        Self {
            executable,
            tessdata_dir: tesseract.tessdata_dir.clone(),
            language: tesseract.language.clone(),
            preprocess: preprocess.clone(),
        }
    }

    /// Runs Tesseract on an already preprocessed image and returns stdout as text.
    pub fn recognize_image(&self, img: &GrayImage) -> Result<String> {
        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.save(temp_input.path())
            .context("Failed to write temporary OCR input")?;

        let mut command = Command::new(&self.executable);
        command.arg(temp_input.path()).arg("stdout");
        if let Some(tessdata) = &self.tessdata_dir {
            command.arg("--tessdata-dir").arg(tessdata);
        }
        command.arg("-l").arg(&self.language);

        let output = command
            .output()
            .context(format!("Failed to run {}", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn transcribe(&self, image_path: &Path) -> Result<String> {
        let img = image::open(image_path)
            .context(format!("Failed to load image {}", image_path.display()))?
            .to_luma8();

        let prepared = prepare_for_ocr(
            &img,
            self.preprocess.crop_width_fraction,
            self.preprocess.block_size,
            self.preprocess.offset,
        );

        self.recognize_image(&prepared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn recognizer(executable: &str) -> TesseractRecognizer {
        TesseractRecognizer::new(
            PathBuf::from(executable),
            &TesseractConfig::default(),
            &PreprocessConfig::default(),
        )
    }

    #[test]
    fn test_unreadable_image_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        let result = recognizer("tesseract").transcribe(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_executable_is_error() {
        let img = GrayImage::from_pixel(8, 8, image::Luma([255]));
        let result = recognizer("/nonexistent/tesseract-binary").recognize_image(&img);
        assert!(result.is_err());
    }
}
