//! Frequency counts of the optional categorical incident columns.

use std::collections::HashMap;

use crate::ingest::CleanedIncidents;
use crate::models::{CategoryCounts, IncidentTable};

/// An optional column that gets a bar chart when present in the upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalColumn {
    pub column: &'static str,
    pub title: &'static str,
    pub axis_label: &'static str,
}

/// Charted columns, in page order.
pub const CATEGORICAL_COLUMNS: &[CategoricalColumn] = &[
    CategoricalColumn {
        column: "Wildlife: Species",
        title: "Wildlife Strikes by Species",
        axis_label: "Wildlife Species",
    },
    CategoricalColumn {
        column: "Conditions: Sky",
        title: "Wildlife Strikes by Weather Condition",
        axis_label: "Weather Condition",
    },
    CategoricalColumn {
        column: "Airport: Name",
        title: "Wildlife Strikes by Airport",
        axis_label: "Airport Name",
    },
    CategoricalColumn {
        column: "Pilot warned of birds or wildlife?",
        title: "Pilot Warnings about Wildlife",
        axis_label: "Pilot Warned",
    },
];

/// Count the non-empty values of `spec.column`, or `None` if the column is absent.
///
/// Counts are ordered most frequent first; equal counts are ordered by value.
pub fn category_counts(table: &IncidentTable, spec: &CategoricalColumn) -> Option<CategoryCounts> {
    let idx = table.column_index(spec.column)?;

    let mut tally: HashMap<String, u32> = HashMap::new();
    for row in &table.rows {
        let cell = &row[idx];
        if cell.is_empty() {
            continue;
        }
        *tally.entry(cell.to_string()).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, u32)> = tally.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Some(CategoryCounts {
        column: spec.column.to_string(),
        title: spec.title.to_string(),
        axis_label: spec.axis_label.to_string(),
        counts,
    })
}

/// Frequency tables for every charted column present in the cleaned rows.
pub fn collect_categories(cleaned: &CleanedIncidents) -> Vec<CategoryCounts> {
    CATEGORICAL_COLUMNS
        .iter()
        .filter_map(|spec| category_counts(&cleaned.table, spec))
        .collect()
}
