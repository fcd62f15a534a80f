//! Error types for the raster library

use thiserror::Error;

/// Raster export error types
#[derive(Debug, Error)]
pub enum RasterError {
    /// Physical size or DPI produced a degenerate pixel box
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// PNG encoding failed
    #[error("PNG encode failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Pixel buffer construction failed
    #[error("Image buffer error: {0}")]
    Buffer(String),
}

/// Result type for raster operations
pub type RasterResult<T> = Result<T, RasterError>;
