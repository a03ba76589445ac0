//! Daily incident count series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of incidents on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
    /// Days since the earliest date in the series.
    pub day: i64,
}

/// Chronologically sorted daily counts with one entry per distinct date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySeries {
    pub points: Vec<DailyCount>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn last_day(&self) -> Option<i64> {
        self.points.last().map(|p| p.day)
    }

    /// Day offsets as regression features.
    pub fn features(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.day as f64).collect()
    }

    /// Counts as regression targets.
    pub fn targets(&self) -> Vec<f64> {
        self.points.iter().map(|p| f64::from(p.count)).collect()
    }

    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| u64::from(p.count)).sum()
    }
}
