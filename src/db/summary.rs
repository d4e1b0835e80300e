//! Derives the per-year `number_of_typhoons` summary table.

use anyhow::Result;
use sqlx::{AnyPool, Row};

// The genesis year is taken lexically from the timestamp text so the same
// statement runs on MySQL and SQLite; the sums are cast back to integers
// because MySQL's SUM yields DECIMAL.
const CREATE_SUMMARY_TABLE: &str = "CREATE TABLE number_of_typhoons AS
    SELECT
        CAST(SUBSTR(genesis_datetime, 1, 4) AS SIGNED) AS year,
        CAST(COUNT(*) AS SIGNED) AS total_count,
        CAST(SUM(CASE WHEN warning_count IS NOT NULL THEN 1 ELSE 0 END) AS SIGNED)
            AS count_entered
    FROM typhoon_records
    GROUP BY year
    ORDER BY year";

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlySummary {
    pub year: i64,
    pub total_count: i64,
    pub count_entered: i64,
}

/// Drops and recreates the summary table from `typhoon_records` with a
/// single grouped query. Pure derivation; rerunning it over the same
/// records gives the same table.
pub async fn rebuild_summary(pool: &AnyPool) -> Result<()> {
    sqlx::query("DROP TABLE IF EXISTS number_of_typhoons")
        .execute(pool)
        .await?;
    sqlx::query(CREATE_SUMMARY_TABLE).execute(pool).await?;

    Ok(())
}

/// Reads the summary table, year ascending. Records with no genesis time
/// group under a NULL year; that bucket is not meaningful for the charts
/// and is skipped here.
pub async fn yearly_summaries(pool: &AnyPool) -> Result<Vec<YearlySummary>> {
    let rows = sqlx::query(
        "SELECT year, total_count, count_entered FROM number_of_typhoons ORDER BY year",
    )
    .fetch_all(pool)
    .await?;

    let summaries = rows
        .iter()
        .filter_map(|row| {
            let year: Option<i64> = row.get("year");
            year.map(|year| YearlySummary {
                year,
                total_count: row.get("total_count"),
                count_entered: row.get("count_entered"),
            })
        })
        .collect();

    Ok(summaries)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::load::CREATE_RECORDS_TABLE;
    use crate::db::test_pool;

    async fn insert(pool: &AnyPool, id: i64, genesis: Option<&str>, warnings: Option<i64>) {
        sqlx::query(
            "INSERT INTO typhoon_records (id, genesis_datetime, warning_count) VALUES (?, ?, ?)",
        )
        .bind(id)
        .bind(genesis.map(str::to_string))
        .bind(warnings)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn populated_pool() -> AnyPool {
        let pool = test_pool().await;
        sqlx::query(CREATE_RECORDS_TABLE)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn should_count_totals_and_entered_per_year() {
        let pool = populated_pool().await;
        insert(&pool, 1, Some("2020-07-01 00:00:00"), Some(5)).await;
        insert(&pool, 2, Some("2020-09-10 06:00:00"), None).await;
        insert(&pool, 3, Some("2021-08-02 12:00:00"), Some(2)).await;

        rebuild_summary(&pool).await.unwrap();
        let summaries = yearly_summaries(&pool).await.unwrap();

        assert_eq!(
            summaries,
            vec![
                YearlySummary { year: 2020, total_count: 2, count_entered: 1 },
                YearlySummary { year: 2021, total_count: 1, count_entered: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn should_rebuild_idempotently() {
        let pool = populated_pool().await;
        insert(&pool, 1, Some("2020-07-01 00:00:00"), Some(1)).await;

        rebuild_summary(&pool).await.unwrap();
        let first = yearly_summaries(&pool).await.unwrap();
        rebuild_summary(&pool).await.unwrap();
        let second = yearly_summaries(&pool).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn should_skip_rows_without_genesis_time() {
        let pool = populated_pool().await;
        insert(&pool, 1, Some("2020-07-01 00:00:00"), None).await;
        insert(&pool, 2, None, Some(3)).await;

        rebuild_summary(&pool).await.unwrap();
        let summaries = yearly_summaries(&pool).await.unwrap();

        assert_eq!(
            summaries,
            vec![YearlySummary { year: 2020, total_count: 1, count_entered: 0 }]
        );
    }
}
