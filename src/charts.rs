//! Renders the summary table as static charts.
//!
//! SVG output keeps the renderer free of system font and image libraries,
//! so the charts also render in headless test environments.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use plotters::prelude::*;

use crate::db::summary::YearlySummary;
use crate::stats::least_squares;

/// Paths of the rendered chart files.
#[derive(Debug)]
pub struct ChartSet {
    pub scatter: PathBuf,
    pub counts: PathBuf,
    pub ratio: PathBuf,
}

/// Renders the three charts into `out_dir`, creating it if needed.
pub fn render_charts(summaries: &[YearlySummary], out_dir: &Path) -> Result<ChartSet> {
    if summaries.is_empty() {
        bail!("summary table is empty; run `summarize` first");
    }

    fs::create_dir_all(out_dir)?;

    let set = ChartSet {
        scatter: out_dir.join("scatter.svg"),
        counts: out_dir.join("counts.svg"),
        ratio: out_dir.join("ratio.svg"),
    };

    scatter_chart(&set.scatter, summaries)?;
    counts_chart(&set.counts, summaries)?;
    ratio_chart(&set.ratio, summaries)?;

    Ok(set)
}

/// Total vs warned counts, one point per year, with a least-squares trend line.
fn scatter_chart(path: &Path, summaries: &[YearlySummary]) -> Result<()> {
    let totals: Vec<f64> = summaries.iter().map(|s| s.total_count as f64).collect();
    let entered: Vec<f64> = summaries.iter().map(|s| s.count_entered as f64).collect();
    let max_total = totals.iter().cloned().fold(0.0, f64::max);
    let max_entered = entered.iter().cloned().fold(0.0, f64::max);

    let root = SVGBackend::new(path, (600, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Total vs warned typhoons per year", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..max_total + 1.0, 0.0..max_entered + 1.0)?;

    chart
        .configure_mesh()
        .x_desc("Total typhoons")
        .y_desc("Typhoons with warnings")
        .draw()?;

    chart
        .draw_series(
            totals
                .iter()
                .zip(&entered)
                .map(|(&x, &y)| Circle::new((x, y), 4, BLUE.filled())),
        )?
        .label("yearly counts")
        .legend(|(x, y)| Circle::new((x, y), 4, BLUE.filled()));

    if let Some(fit) = least_squares(&totals, &entered) {
        let min_total = totals.iter().cloned().fold(f64::INFINITY, f64::min);
        chart
            .draw_series(LineSeries::new(
                [min_total, max_total]
                    .iter()
                    .map(|&x| (x, fit.predict(x))),
                RED.stroke_width(2),
            ))?
            .label("trend")
            .legend(|(x, y)| PathElement::new(vec![(x - 10, y), (x + 10, y)], &RED));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;

    Ok(())
}

/// Both counts over time.
fn counts_chart(path: &Path, summaries: &[YearlySummary]) -> Result<()> {
    let (min_year, max_year) = year_span(summaries);
    let max_count = summaries
        .iter()
        .map(|s| s.total_count)
        .max()
        .unwrap_or(0) as f64;

    let root = SVGBackend::new(path, (700, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Typhoon counts per year", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(min_year - 1..max_year + 1, 0.0..max_count + 1.0)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Typhoons")
        .draw()?;

    chart
        .draw_series(
            LineSeries::new(
                summaries
                    .iter()
                    .map(|s| (s.year as i32, s.total_count as f64)),
                &BLUE,
            )
            .point_size(3),
        )?
        .label("total")
        .legend(|(x, y)| PathElement::new(vec![(x - 10, y), (x + 10, y)], &BLUE));

    chart
        .draw_series(
            LineSeries::new(
                summaries
                    .iter()
                    .map(|s| (s.year as i32, s.count_entered as f64)),
                &RED,
            )
            .point_size(3),
        )?
        .label("with warnings")
        .legend(|(x, y)| PathElement::new(vec![(x - 10, y), (x + 10, y)], &RED));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;

    Ok(())
}

/// Share of warned typhoons over time.
fn ratio_chart(path: &Path, summaries: &[YearlySummary]) -> Result<()> {
    let (min_year, max_year) = year_span(summaries);

    let root = SVGBackend::new(path, (700, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Share of typhoons with warnings", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(min_year - 1..max_year + 1, 0.0..1.05)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Warned / total")
        .draw()?;

    chart.draw_series(
        LineSeries::new(
            summaries.iter().map(|s| {
                let ratio = s.count_entered as f64 / s.total_count as f64;
                (s.year as i32, ratio)
            }),
            &GREEN,
        )
        .point_size(3),
    )?;

    root.present()?;

    Ok(())
}

fn year_span(summaries: &[YearlySummary]) -> (i32, i32) {
    let min = summaries.iter().map(|s| s.year).min().unwrap_or(0) as i32;
    let max = summaries.iter().map(|s| s.year).max().unwrap_or(0) as i32;
    (min, max)
}

// -- Tests -------------------------------------------------------------------
