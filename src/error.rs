use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF processing error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Not a PDF file: {0}")]
    NotAPdf(PathBuf),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    #[error("Input path not found: {0}")]
    InputNotFound(String),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("Invalid size target: {0} KB")]
    InvalidTargetSize(u64),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
