use crate::AnnotateError;
use image::RgbImage;
use std::io::Cursor;

/// Decode an uploaded image into RGB, whatever container it arrived in.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, AnnotateError> {
    let image = image::load_from_memory(bytes).map_err(AnnotateError::Decode)?;
    Ok(image.to_rgb8())
}

/// Re-encode the annotated image as JPEG (lossy is acceptable here).
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, AnnotateError> {
    let mut jpeg_bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut jpeg_bytes, image::ImageFormat::Jpeg)
        .map_err(AnnotateError::Encode)?;
    Ok(jpeg_bytes.into_inner())
}
