#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{Duration, NaiveDate};
use rust_xlsxwriter::{Format, Workbook};

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const BOUNDARY: &str = "strike-forecast-test-boundary";

pub const SPECIES: &str = "Wildlife: Species";
pub const SKY: &str = "Conditions: Sky";
pub const AIRPORT: &str = "Airport: Name";
pub const PILOT_WARNED: &str = "Pilot warned of birds or wildlife?";

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

/// One incident row; `None` leaves the cell blank.
#[derive(Debug, Clone)]
pub struct Incident {
    pub date: String,
    pub species: Option<String>,
    pub sky: Option<String>,
    pub airport: Option<String>,
    pub warned: Option<String>,
}

/// `days` consecutive days from [`start_date`], with `day % 4 + 1` incidents
/// on each day and rotating categorical values.
pub fn incidents(days: u32) -> Vec<Incident> {
    let species = ["Gull", "Hawk", "Goose", "Sparrow"];
    let skies = ["No Cloud", "Some Cloud", "Overcast"];
    let airports = ["DENVER INTL", "CHICAGO O'HARE", "JFK <INTL> & CO"];
    let mut rows = Vec::new();
    for d in 0..days {
        let date = start_date() + Duration::days(i64::from(d));
        for k in 0..(d % 4 + 1) {
            let i = (d + k) as usize;
            rows.push(Incident {
                date: date.format("%Y-%m-%d").to_string(),
                species: Some(species[i % species.len()].to_string()),
                sky: Some(skies[i % skies.len()].to_string()),
                airport: Some(airports[i % airports.len()].to_string()),
                warned: Some(if i % 2 == 0 { "Y" } else { "N" }.to_string()),
            });
        }
    }
    rows
}

/// Number of incidents [`incidents`] generates for `days` days.
pub fn incident_count(days: u32) -> usize {
    (0..days).map(|d| (d % 4 + 1) as usize).sum()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// CSV with the date column and, when `with_categories`, the four optional columns.
pub fn incidents_csv(rows: &[Incident], with_categories: bool) -> Vec<u8> {
    let mut out = String::new();
    if with_categories {
        out.push_str(&format!(
            "FlightDate,{},{},{},{}\n",
            csv_field(SPECIES),
            csv_field(SKY),
            csv_field(AIRPORT),
            csv_field(PILOT_WARNED)
        ));
    } else {
        out.push_str("FlightDate,Record ID\n");
    }
    for (i, r) in rows.iter().enumerate() {
        if with_categories {
            let cols = [&r.species, &r.sky, &r.airport, &r.warned]
                .map(|c| csv_field(c.as_deref().unwrap_or("")));
            out.push_str(&format!("{},{}\n", csv_field(&r.date), cols.join(",")));
        } else {
            out.push_str(&format!("{},{}\n", csv_field(&r.date), i + 1));
        }
    }
    out.into_bytes()
}

/// An xlsx workbook with text dates in column A and the optional columns.
pub fn incidents_xlsx(rows: &[Incident]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["FlightDate", SPECIES, SKY, AIRPORT, PILOT_WARNED].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (i, r) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, r.date.as_str()).unwrap();
        for (col, value) in [&r.species, &r.sky, &r.airport, &r.warned].iter().enumerate() {
            if let Some(v) = value {
                sheet.write_string(row, (col + 1) as u16, v.as_str()).unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// An xlsx workbook whose dates are native date-formatted serial numbers.
///
/// Each entry of `serials` is one incident on that Excel serial day.
pub fn native_date_xlsx(serials: &[f64]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "FlightDate").unwrap();
    for (i, serial) in serials.iter().enumerate() {
        sheet
            .write_number_with_format((i + 1) as u32, 0, *serial, &date_format)
            .unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

/// A multipart body with one part named `field`.
///
/// `file_name` of `None` sends a plain form value instead of a file part.
pub fn multipart_body(field: &str, file_name: Option<&str>, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    match file_name {
        Some(name) => {
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    field, name
                )
                .as_bytes(),
            );
            body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        }
        None => {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field).as_bytes(),
            );
        }
    }
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
