//! Export error types

use thiserror::Error;

/// Errors that can occur while capturing or writing an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Capture failed: {0}")]
    Capture(String),

    #[error("Capture of {width}x{height} px exceeds the {limit} px limit")]
    CaptureTooLarge { width: u64, height: u64, limit: u64 },

    #[error("Unknown image reference {0}")]
    UnknownImage(usize),

    #[error("PDF error: {0}")]
    Document(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(String),
}
