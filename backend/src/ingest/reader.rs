//! Decode uploaded bytes into an [`IncidentTable`].
//!
//! Workbook formats (xlsx, xlsm, xlsb, xls, ods) are read with `calamine`,
//! taking the first worksheet and its first row as headers. Files named
//! `*.csv` go through the `csv` crate.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use super::error::{IngestError, IngestResult};
use crate::models::{Cell, IncidentTable};

/// Read an uploaded file, choosing the decoder from its name.
pub fn read_table(file_name: &str, bytes: &[u8]) -> IngestResult<IncidentTable> {
    if is_csv(file_name) {
        read_csv(bytes)
    } else {
        read_workbook(bytes)
    }
}

fn is_csv(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".csv")
}

/// Read the first worksheet of a workbook.
pub fn read_workbook(bytes: &[u8]) -> IngestResult<IncidentTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(IngestError::NoHeader)?
        .iter()
        .map(|c| data_to_cell(c).to_string())
        .collect();

    let mut table = IncidentTable::new(headers);
    for row in rows {
        table.push_row(row.iter().map(data_to_cell).collect());
    }

    debug!(
        "Read workbook: {} columns, {} rows",
        table.headers.len(),
        table.len()
    );
    Ok(table)
}

/// Read a CSV file with a header row.
pub fn read_csv(bytes: &[u8]) -> IngestResult<IncidentTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.is_empty() {
        return Err(IngestError::NoHeader);
    }

    let mut table = IncidentTable::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(Cell::infer).collect());
    }

    debug!("Read CSV: {} columns, {} rows", table.headers.len(), table.len());
    Ok(table)
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if dt.is_datetime() => Cell::DateTime(value),
            _ => Cell::Number(dt.as_f64()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_types_cells() {
        let csv = "FlightDate,Wildlife: Species,Count\n2021-01-02,Gull,3\n,Hawk,\n";
        let table = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["FlightDate", "Wildlife: Species", "Count"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][0], Cell::Text("2021-01-02".into()));
        assert_eq!(table.rows[0][2], Cell::Number(3.0));
        assert_eq!(table.rows[1][0], Cell::Empty);
    }

    #[test]
    fn test_read_csv_strips_bom_and_pads_short_rows() {
        let csv = "\u{feff}FlightDate,Airport: Name\n2021-01-02\n";
        let table = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(table.headers[0], "FlightDate");
        assert_eq!(table.rows[0], vec![Cell::Text("2021-01-02".into()), Cell::Empty]);
    }

    #[test]
    fn test_read_table_dispatches_on_extension() {
        let csv = "FlightDate\n2021-01-02\n";
        assert!(read_table("strikes.CSV", csv.as_bytes()).is_ok());

        let err = read_table("strikes.xlsx", csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::Workbook(_)));
        assert!(err.is_unreadable());
    }
}
