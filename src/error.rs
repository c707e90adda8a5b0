use thiserror::Error;

/// Errors raised while bringing up the drawing surface
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid canvas dimensions: {width}x{height} at ratio {ratio}")]
    InvalidDimensions { width: f32, height: f32, ratio: f32 },

    #[error("Failed to allocate a {width}x{height} pixel buffer")]
    AllocationFailed { width: u32, height: u32 },
}

/// Errors that can occur while exporting the canvas
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Canvas has not been initialized yet")]
    NotInitialized,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser download failed: {0}")]
    Web(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
