pub mod codec;
pub mod draw;

pub use codec::{decode_image, encode_jpeg};
pub use draw::{Annotator, label_text};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("failed to decode uploaded image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode annotated image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("failed to read font file {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font file {path}")]
    FontParse { path: PathBuf },
    #[error("no usable label font found; set GATEWAY_FONT_PATH to a TTF file")]
    FontUnavailable,
}
