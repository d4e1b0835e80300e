//! Fetch typhoon records for a year range and load them into the database.

use std::ops::RangeInclusive;

use anyhow::{ensure, Result};

use crate::db;
use crate::fetch::CwaTyphoonApi;

pub async fn load(database_url: &str, start: i32, end: Option<i32>) -> Result<String> {
    let years = year_range(start, end)?;
    let pool = db::connect(database_url).await?;
    let api = CwaTyphoonApi::new();

    let report = db::load::load_records(&pool, &api, years).await?;

    let mut message = format!(
        "{} records loaded, {} skipped without an id",
        report.inserted, report.skipped_missing_id
    );
    if !report.failed_years.is_empty() {
        message.push_str(&format!(", failed years: {:?}", report.failed_years));
    }

    Ok(message)
}

/// A missing end year means the single-year range `[start, start]`.
fn year_range(start: i32, end: Option<i32>) -> Result<RangeInclusive<i32>> {
    let end = end.unwrap_or(start);
    ensure!(start <= end, "start year {start} is after end year {end}");

    Ok(start..=end)
}

// -- Tests -------------------------------------------------------------------
