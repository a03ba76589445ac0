use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::dates::coerce_date;
use super::error::{IngestError, IngestResult};
use crate::models::{DailyCount, DailySeries, IncidentTable};

/// Incident rows whose date parsed, with the parsed dates kept alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedIncidents {
    /// Surviving rows, in upload order
    pub table: IncidentTable,
    /// Parsed date of each surviving row (same order as `table.rows`)
    pub dates: Vec<NaiveDate>,
    /// Number of rows discarded because their date was missing or invalid
    pub dropped: usize,
}

/// Coerce the date column and drop rows where it is missing or unparseable.
///
/// Fails only when the date column is absent from the header row.
pub fn clean(table: IncidentTable, date_column: &str) -> IngestResult<CleanedIncidents> {
    let idx = table
        .column_index(date_column)
        .ok_or_else(|| IngestError::MissingColumn(date_column.to_string()))?;

    let total = table.len();
    let IncidentTable { headers, rows } = table;
    let mut kept = IncidentTable::new(headers);
    let mut dates = Vec::with_capacity(total);

    for row in rows {
        if let Some(date) = coerce_date(&row[idx]) {
            dates.push(date);
            kept.rows.push(row);
        }
    }

    let dropped = total - kept.len();
    if dropped > 0 {
        info!(
            "Dropped {} of {} rows with missing or invalid '{}'",
            dropped, total, date_column
        );
    }

    Ok(CleanedIncidents {
        table: kept,
        dates,
        dropped,
    })
}

/// Count incidents per calendar day.
///
/// The result is sorted by date, holds one point per distinct date, and
/// assigns each point its offset in days from the earliest date.
pub fn daily_counts(dates: &[NaiveDate]) -> DailySeries {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for date in dates {
        *counts.entry(*date).or_insert(0) += 1;
    }

    let Some(min_date) = counts.keys().next().copied() else {
        return DailySeries::default();
    };

    let points: Vec<DailyCount> = counts
        .into_iter()
        .map(|(date, count)| DailyCount {
            date,
            count,
            day: (date - min_date).num_days(),
        })
        .collect();

    debug!(
        "Aggregated {} incidents into {} daily counts",
        dates.len(),
        points.len()
    );
    DailySeries { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table(rows: &[(&str, &str)]) -> IncidentTable {
        let mut t = IncidentTable::new(vec!["FlightDate".into(), "Conditions: Sky".into()]);
        for (date, sky) in rows {
            t.push_row(vec![Cell::infer(date), Cell::infer(sky)]);
        }
        t
    }

    #[test]
    fn test_clean_drops_invalid_dates() {
        let t = table(&[
            ("2021-01-01", "No Cloud"),
            ("not a date", "Overcast"),
            ("", "Some Cloud"),
            ("2021-01-03", "Overcast"),
        ]);
        let cleaned = clean(t, "FlightDate").unwrap();

        assert_eq!(cleaned.dropped, 2);
        assert_eq!(cleaned.table.len(), 2);
        assert_eq!(cleaned.dates, vec![ymd(2021, 1, 1), ymd(2021, 1, 3)]);
        assert_eq!(cleaned.table.rows[1][1], Cell::Text("Overcast".into()));
    }

    #[test]
    fn test_clean_missing_date_column() {
        let t = IncidentTable::new(vec!["Date".into()]);
        let err = clean(t, "FlightDate").unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn(ref c) if c == "FlightDate"));
    }

    #[test]
    fn test_daily_counts_sorted_with_offsets() {
        let dates = vec![
            ymd(2021, 1, 5),
            ymd(2021, 1, 1),
            ymd(2021, 1, 5),
            ymd(2021, 1, 2),
            ymd(2021, 1, 5),
        ];
        let series = daily_counts(&dates);

        let summary: Vec<(i64, u32)> = series.points.iter().map(|p| (p.day, p.count)).collect();
        assert_eq!(summary, vec![(0, 1), (1, 1), (4, 3)]);
        assert_eq!(series.first_date(), Some(ymd(2021, 1, 1)));
        assert_eq!(series.last_date(), Some(ymd(2021, 1, 5)));
        assert_eq!(series.total(), 5);
    }

    #[test]
    fn test_daily_counts_empty() {
        assert!(daily_counts(&[]).is_empty());
    }
}
