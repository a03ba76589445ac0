//! Ingestion and cleaning of uploaded incident spreadsheets.
//!
//! ```text
//! bytes ──read_table──▶ IncidentTable ──clean──▶ CleanedIncidents ──daily_counts──▶ DailySeries
//! ```

pub mod cleaning;
pub mod dates;
pub mod error;
pub mod reader;

pub use cleaning::{clean, daily_counts, CleanedIncidents};
pub use dates::{coerce_date, parse_date_text};
pub use error::{IngestError, IngestResult};
pub use reader::{read_csv, read_table, read_workbook};

/// Read an upload and keep only the rows with a usable date.
pub fn load(file_name: &str, bytes: &[u8], date_column: &str) -> IngestResult<CleanedIncidents> {
    let table = read_table(file_name, bytes)?;
    clean(table, date_column)
}
