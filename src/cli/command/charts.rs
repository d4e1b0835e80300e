//! Render charts from the summary table and print the correlation.

use std::path::Path;

use anyhow::Result;

use crate::charts::render_charts;
use crate::db;
use crate::stats::pearson;

pub async fn charts(database_url: &str, out_dir: &Path) -> Result<String> {
    let pool = db::connect(database_url).await?;
    let summaries = db::summary::yearly_summaries(&pool).await?;

    let set = render_charts(&summaries, out_dir)?;

    let totals: Vec<f64> = summaries.iter().map(|s| s.total_count as f64).collect();
    let entered: Vec<f64> = summaries.iter().map(|s| s.count_entered as f64).collect();
    match pearson(&totals, &entered) {
        Some(r) => println!("Correlation between total and warned typhoon counts: {r:.2}"),
        None => println!("Correlation between total and warned counts is not defined"),
    }

    Ok(format!(
        "Charts saved to `{}`, `{}` and `{}`",
        set.scatter.display(),
        set.counts.display(),
        set.ratio.display()
    ))
}
