use thiserror::Error;

/// Errors that can occur while exporting the drawing as an image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid export size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Export surface could not be allocated")]
    SurfaceUnavailable,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser download failed: {0}")]
    Browser(String),
}

/// Errors that can occur while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
