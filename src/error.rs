use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with [`PixvecError`].
pub type PixvecResult<T> = std::result::Result<T, PixvecError>;

/// Error types that can occur while turning a raster into a vector drawing.
///
/// Only the I/O boundaries can fail. Tiling, tracing and simplification are
/// total over any well-formed mask and never produce an error.
#[derive(Debug, Error)]
pub enum PixvecError {
    /// The input raster could not be opened or decoded.
    #[error("Cannot load file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Image encoding error, e.g. while exporting the mask PNG.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
    /// File system I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A conversion setting is outside its documented range.
    #[error("Invalid {name} `{value}`; expected {expected}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}
