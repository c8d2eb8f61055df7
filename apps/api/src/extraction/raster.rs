use std::io::Cursor;

use async_trait::async_trait;
use bytes::Bytes;

use super::{ExtractionError, ImageDecoder, ImageDimensions};

/// Reads image dimensions from the header using the `image` crate.
pub struct ImageCrateDecoder;

#[async_trait]
impl ImageDecoder for ImageCrateDecoder {
    async fn decode(&self, bytes: Bytes) -> Result<ImageDimensions, ExtractionError> {
        tokio::task::spawn_blocking(move || read_dimensions(&bytes)).await?
    }
}

fn read_dimensions(bytes: &[u8]) -> Result<ImageDimensions, ExtractionError> {
    let reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ExtractionError::Image(e.to_string()))?;
    Ok(ImageDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::new(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_decodes_png_dimensions() {
        let dims = ImageCrateDecoder
            .decode(Bytes::from(encode_png(640, 480)))
            .await
            .unwrap();
        assert_eq!(
            dims,
            ImageDimensions {
                width: 640,
                height: 480,
            }
        );
    }

    #[tokio::test]
    async fn test_non_image_bytes_fail() {
        let result = ImageCrateDecoder
            .decode(Bytes::from_static(b"plain text, not an image"))
            .await;
        assert!(matches!(result, Err(ExtractionError::Image(_))));
    }
}
