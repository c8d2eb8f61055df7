//! Document collaborators: everything that turns uploaded bytes into text or
//! image dimensions. The analysis core only sees the `TextExtractor` and
//! `ImageDecoder` traits; the local implementations live in the submodules.

pub mod ocr;
pub mod pdf;
pub mod raster;

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::ocr::TesseractOcr;
pub use self::raster::ImageCrateDecoder;

/// Declared format of an uploaded document, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    Pdf,
    Image,
    PlainText,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "tif", "bmp"];

impl DocumentFormat {
    /// Maps a file name to its format by extension (case-insensitive).
    /// Returns `None` for anything the service does not accept.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = file_extension(file_name).to_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::PlainText),
            e if IMAGE_EXTENSIONS.contains(&e) => Some(Self::Image),
            _ => None,
        }
    }
}

/// Extension of `file_name` without the dot, or an empty string.
pub fn file_extension(file_name: &str) -> &str {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("Image decoding failed: {0}")]
    Image(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Turns raw document bytes into text. Implement this to swap the OCR/PDF
/// backend without touching the pipeline or the handlers.
///
/// Carried by the pipeline as `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(
        &self,
        bytes: Bytes,
        format: DocumentFormat,
    ) -> Result<String, ExtractionError>;
}

/// Reads image dimensions. Pixel content is never inspected.
#[async_trait]
pub trait ImageDecoder: Send + Sync {
    async fn decode(&self, bytes: Bytes) -> Result<ImageDimensions, ExtractionError>;
}

/// Default extractor: pdf-extract for PDFs, Tesseract for images, lossy
/// UTF-8 for plain text.
pub struct LocalTextExtractor {
    ocr: TesseractOcr,
}

impl LocalTextExtractor {
    pub fn new(ocr: TesseractOcr) -> Self {
        Self { ocr }
    }
}

#[async_trait]
impl TextExtractor for LocalTextExtractor {
    async fn extract(
        &self,
        bytes: Bytes,
        format: DocumentFormat,
    ) -> Result<String, ExtractionError> {
        match format {
            DocumentFormat::Pdf => pdf::extract_pdf_text(bytes).await,
            DocumentFormat::Image => self.ocr.recognize(bytes).await,
            DocumentFormat::PlainText => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}
