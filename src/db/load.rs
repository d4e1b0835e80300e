//! Loads fetched records into the `typhoon_records` table.

use std::ops::RangeInclusive;

use anyhow::Result;
use sqlx::{Any, AnyPool, Transaction};

use crate::cli::create_progress_bar;
use crate::record::{RecordSource, TyphoonRecord};

pub(crate) const CREATE_RECORDS_TABLE: &str = "CREATE TABLE typhoon_records (
    id BIGINT PRIMARY KEY,
    cht_name TEXT,
    eng_name TEXT,
    genesis_datetime TEXT,
    dead_datetime TEXT,
    max_wind_speed BIGINT,
    max_gust_speed BIGINT,
    min_pressure BIGINT,
    max_class7_radius BIGINT,
    max_class10_radius BIGINT,
    warning_count BIGINT
)";

const INSERT_RECORD: &str = "INSERT INTO typhoon_records (
    id, cht_name, eng_name, genesis_datetime, dead_datetime,
    max_wind_speed, max_gust_speed, min_pressure,
    max_class7_radius, max_class10_radius, warning_count
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// What a load run did, for the console summary.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub inserted: usize,
    pub skipped_missing_id: usize,
    pub failed_years: Vec<i32>,
}

/// Drops and recreates `typhoon_records`, then fetches and inserts every
/// year in the range. A year whose fetch fails is reported and skipped;
/// the other years' rows still land in the final table.
///
/// The inserts commit once after the whole range. A database failure late
/// in the loop therefore discards the run's inserts and leaves the table
/// empty, since the drop has already happened.
pub async fn load_records<S: RecordSource>(
    pool: &AnyPool,
    source: &S,
    years: RangeInclusive<i32>,
) -> Result<LoadReport> {
    sqlx::query("DROP TABLE IF EXISTS typhoon_records")
        .execute(pool)
        .await?;
    sqlx::query(CREATE_RECORDS_TABLE).execute(pool).await?;

    let bar = create_progress_bar(years.clone().count() as u64, "Loading records".to_string());

    let mut report = LoadReport::default();
    let mut tx = pool.begin().await?;

    for year in years {
        bar.set_message(format!("Fetching {year}"));

        let raws = match source.records_for_year(year).await {
            Ok(raws) => raws,
            Err(e) => {
                eprintln!("Failed to fetch records for {year}: {e:#}");
                report.failed_years.push(year);
                bar.inc(1);
                continue;
            }
        };

        for raw in &raws {
            match TyphoonRecord::from_raw(raw) {
                Some(record) => {
                    insert_record(&mut tx, &record).await?;
                    report.inserted += 1;
                }
                None => report.skipped_missing_id += 1,
            }
        }

        bar.inc(1);
    }

    tx.commit().await?;
    bar.finish_with_message("Records loaded");

    Ok(report)
}

async fn insert_record(tx: &mut Transaction<'_, Any>, record: &TyphoonRecord) -> Result<()> {
    sqlx::query(INSERT_RECORD)
        .bind(record.id)
        .bind(record.cht_name.clone())
        .bind(record.eng_name.clone())
        .bind(record.genesis_datetime.clone())
        .bind(record.dead_datetime.clone())
        .bind(record.max_wind_speed)
        .bind(record.max_gust_speed)
        .bind(record.min_pressure)
        .bind(record.max_class7_radius)
        .bind(record.max_class10_radius)
        .bind(record.warning_count)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use anyhow::bail;
    use sqlx::Row;

    use super::*;
    use crate::db::test_pool;
    use crate::record::RawTyphoon;

    struct StubSource {
        years: HashMap<i32, Vec<RawTyphoon>>,
        failing: Vec<i32>,
    }

    impl RecordSource for StubSource {
        async fn records_for_year(&self, year: i32) -> Result<Vec<RawTyphoon>> {
            if self.failing.contains(&year) {
                bail!("simulated transport failure for {year}");
            }
            Ok(self.years.get(&year).cloned().unwrap_or_default())
        }
    }

    fn raw(id: Option<i64>, year: i32) -> RawTyphoon {
        RawTyphoon {
            id,
            genesis_datetime: Some(format!("{year}-08-01 00:00:00")),
            ..RawTyphoon::default()
        }
    }

    async fn all_rows(pool: &AnyPool) -> Vec<(i64, Option<String>, Option<i64>, Option<i64>)> {
        sqlx::query(
            "SELECT id, genesis_datetime, max_wind_speed, warning_count \
             FROM typhoon_records ORDER BY id",
        )
        .fetch_all(pool)
        .await
        .unwrap()
        .iter()
        .map(|row| {
            (
                row.get("id"),
                row.get("genesis_datetime"),
                row.get("max_wind_speed"),
                row.get("warning_count"),
            )
        })
        .collect()
    }

    #[tokio::test]
    async fn should_skip_records_without_id() {
        let pool = test_pool().await;
        let source = StubSource {
            years: HashMap::from([(2023, vec![raw(Some(1), 2023), raw(None, 2023), raw(None, 2023)])]),
            failing: vec![],
        };

        let report = load_records(&pool, &source, 2023..=2023).await.unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped_missing_id, 2);
        assert_eq!(all_rows(&pool).await.len(), 1);
    }

    #[tokio::test]
    async fn should_retain_other_years_when_one_fails() {
        let pool = test_pool().await;
        let source = StubSource {
            years: HashMap::from([
                (2022, vec![raw(Some(1), 2022)]),
                (2024, vec![raw(Some(2), 2024)]),
            ]),
            failing: vec![2023],
        };

        let report = load_records(&pool, &source, 2022..=2024).await.unwrap();

        assert_eq!(report.failed_years, vec![2023]);
        let ids: Vec<i64> = all_rows(&pool).await.iter().map(|r| r.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn should_reload_identically() {
        let pool = test_pool().await;
        let source = StubSource {
            years: HashMap::from([(2023, vec![raw(Some(1), 2023), raw(Some(2), 2023)])]),
            failing: vec![],
        };

        load_records(&pool, &source, 2023..=2023).await.unwrap();
        let first = all_rows(&pool).await;

        load_records(&pool, &source, 2023..=2023).await.unwrap();
        let second = all_rows(&pool).await;

        assert_eq!(first, second);
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn should_load_normalised_record_and_report_failed_year() {
        let pool = test_pool().await;
        let mut record = raw(Some(1), 2023);
        record.max_intensity = Some("45".to_string());
        record.warning_count = None;
        let source = StubSource {
            years: HashMap::from([(2023, vec![record])]),
            failing: vec![2024],
        };

        let report = load_records(&pool, &source, 2023..=2024).await.unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.failed_years, vec![2024]);

        let rows = all_rows(&pool).await;
        assert_eq!(rows.len(), 1);
        let (id, _, max_wind_speed, warning_count) = &rows[0];
        assert_eq!(*id, 1);
        assert_eq!(*max_wind_speed, Some(45));
        assert_eq!(*warning_count, None);
    }
}
