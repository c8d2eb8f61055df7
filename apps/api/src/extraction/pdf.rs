use bytes::Bytes;
use tracing::{debug, info};

use super::ExtractionError;

/// Below this many non-whitespace characters the PDF is most likely a scan
/// with no text layer.
const MIN_TEXT_LAYER_CHARS: usize = 50;

/// Reads the embedded text layer of a PDF. Parsing is CPU-bound, so it runs
/// on the blocking pool.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, ExtractionError> {
    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
    })
    .await?
    .map_err(ExtractionError::Pdf)?;

    let visible = text.chars().filter(|c| !c.is_whitespace()).count();
    if visible < MIN_TEXT_LAYER_CHARS {
        info!("PDF text layer is nearly empty ({visible} chars); document is likely scanned");
    } else {
        debug!("Extracted {} characters from PDF text layer", text.chars().count());
    }

    Ok(text)
}
