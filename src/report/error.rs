//! Report generation error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while laying out or rendering a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// Nothing to render
    #[error("Validation error: {0}")]
    Validation(String),

    /// Font file missing or unreadable
    #[error("Failed to load font {}: {}", .path.display(), .reason)]
    Font { path: PathBuf, reason: String },

    /// Font file present but not a usable TrueType face
    #[error("Failed to parse font {}: {}", .path.display(), .reason)]
    FontParse { path: PathBuf, reason: String },

    /// PDF backend error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Renderer used out of order (e.g. drawing before the first page)
    #[error("Layout error: {0}")]
    Layout(String),
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;
