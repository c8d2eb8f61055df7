use std::process::Stdio;

use bytes::Bytes;
use tokio::process::Command;
use tracing::{debug, info};

use super::ExtractionError;

/// Tesseract OCR through its command-line binary. The image is written to a
/// temporary file that lives until recognition finishes.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: String,
    language: String,
}

impl TesseractOcr {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    pub async fn recognize(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        let input = tempfile::Builder::new().prefix("ocr-input-").tempfile()?;
        tokio::fs::write(input.path(), &bytes).await?;

        debug!("Running {} on {} bytes", self.command, bytes.len());
        let output = Command::new(&self.command)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExtractionError::Ocr(format!("could not start '{}': {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Ocr(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        info!("OCR extracted {} characters", text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_ocr_error() {
        let ocr = TesseractOcr::new("definitely-not-an-ocr-binary-4821", "eng");
        let result = ocr.recognize(Bytes::from_static(b"\x89PNG")).await;
        assert!(matches!(result, Err(ExtractionError::Ocr(_))));
    }
}
