//! Rebuild the per-year summary table.

use anyhow::Result;

use crate::cli::create_spinner;
use crate::db;

pub async fn summarize(database_url: &str) -> Result<String> {
    let pool = db::connect(database_url).await?;

    let bar = create_spinner("Rebuilding summary table...".to_string());
    db::summary::rebuild_summary(&pool).await?;
    bar.finish_with_message("Summary table rebuilt");

    Ok("Summary table `number_of_typhoons` rebuilt".to_string())
}
