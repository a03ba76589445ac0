//! Error types for spreadsheet ingestion.

use thiserror::Error;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Failures while turning an upload into an incident table.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook contains no worksheets")]
    NoWorksheet,

    #[error("Spreadsheet has no header row")]
    NoHeader,

    #[error("Column '{0}' not found in upload")]
    MissingColumn(String),
}

impl IngestError {
    /// Whether the error was caused by unreadable upload content rather
    /// than by a missing expectation about its schema.
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            IngestError::Workbook(_) | IngestError::Csv(_) | IngestError::NoWorksheet
        )
    }
}
