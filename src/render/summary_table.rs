//! ASCII tables of chart contents and run outcomes, using the [`tabled`] crate.

use crate::aggregate::chart_data::ChartData;
use crate::pipeline::{RunReport, SourceReport};
use tabled::builder::Builder;
use tabled::{Table, Tabled};

/// One row of the run summary.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct SourceSummary {
    #[tabled(rename = "Source")]
    pub source: String,
    #[tabled(rename = "Drive")]
    pub drive: String,
    #[tabled(rename = "Loaded")]
    pub loaded: usize,
    #[tabled(rename = "Missing")]
    pub missing: usize,
    #[tabled(rename = "Failed")]
    pub failed: usize,
    #[tabled(rename = "Samples")]
    pub samples: usize,
    #[tabled(rename = "Output")]
    pub output: String,
}

impl From<&SourceReport> for SourceSummary {
    fn from(report: &SourceReport) -> Self {
        Self {
            source: report.source.clone(),
            drive: report.drive.to_string(),
            loaded: report.files.loaded,
            missing: report.files.missing,
            failed: report.files.failed,
            samples: report.chart.sample_count(),
            output: match (&report.output, &report.error) {
                (Some(path), _) => path.display().to_string(),
                (None, Some(_)) => "failed".to_string(),
                (None, None) => "skipped".to_string(),
            },
        }
    }
}

/// Formats a table with its title underlined.
fn with_title(table: String, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("{}\n{}\n{}", title, "=".repeat(title.len()), table),
        None => table,
    }
}

/// Formats the means of a chart: one row per category, one column per series.
pub fn format_means_table(chart: &ChartData, title: Option<&str>) -> String {
    if chart.categories().is_empty() {
        return "No data available for this source".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once(String::new()).chain(chart.series().iter().cloned()),
    );
    for (category, label) in chart.categories().iter().enumerate() {
        builder.push_record(
            std::iter::once(label.clone()).chain(
                (0..chart.series().len())
                    .map(|series| format!("{:.4}", chart.mean(series, category))),
            ),
        );
    }

    with_title(builder.build().to_string(), title)
}

/// Formats one row per source of a run.
pub fn format_run_table(report: &RunReport, title: Option<&str>) -> String {
    if report.sources.is_empty() {
        return "No sources were processed".to_string();
    }

    let rows: Vec<SourceSummary> = report.sources.iter().map(SourceSummary::from).collect();
    with_title(Table::new(rows).to_string(), title)
}
