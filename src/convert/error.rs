//! Conversion error types

use std::path::PathBuf;

use crate::codec::CodecError;

/// Errors raised while converting one source image.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image decoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("GIF decoding failed: {0}")]
    Gif(#[from] gif::DecodingError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Source has zero width or height, or no frames at all
    #[error("Source image is empty: {0}")]
    EmptySource(String),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}
