//! Batch driver: for every configured source, load its files, aggregate them
//! and render one chart.
//!
//! Input problems never stop a run. Missing and malformed files are logged and
//! contribute no samples. A chart that fails to render is logged and recorded
//! on its source, and the run moves on. Only configuration errors and an
//! unusable output directory are returned as errors.

use crate::aggregate::bucket_set::BucketSet;
use crate::aggregate::chart_data::ChartData;
use crate::api::config::{ChartConfig, ConfigError, InputSpec, SourceConfig};
use crate::api::enums::drive_type::DriveType;
use crate::api::enums::empty_source_policy::EmptySourcePolicy;
use crate::layout::bar_layout::BarLayout;
use crate::loader::errors::{LoadError, LoadOutcome};
use crate::loader::named::try_load_named;
use crate::loader::positional::try_load_positional;
use crate::render::plots::{draw_grouped_bar_chart, ChartStyle, PlotError};
use crate::utilities::file_names::{chart_file_name, chart_title};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create output directory {path}: {error}")]
    OutputDir {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

type Result<T> = core::result::Result<T, PipelineError>;

/// Tally of file outcomes while collecting one source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileTally {
    pub loaded: usize,
    pub missing: usize,
    pub failed: usize,
}

impl FileTally {
    /// Logs a load outcome, counts it, and returns the loaded data if any.
    fn record<T>(
        &mut self,
        path: &Path,
        outcome: core::result::Result<LoadOutcome<T>, LoadError>,
    ) -> Option<T> {
        match outcome {
            Ok(LoadOutcome::Loaded(data)) => {
                tracing::debug!("Loaded {}", path.display());
                self.loaded += 1;
                Some(data)
            }
            Ok(LoadOutcome::Missing) => {
                tracing::warn!("File {} not found. Skipping.", path.display());
                self.missing += 1;
                None
            }
            Err(e) => {
                tracing::error!("Error reading {}: {}", path.display(), e);
                self.failed += 1;
                None
            }
        }
    }

    pub fn total(&self) -> usize {
        self.loaded + self.missing + self.failed
    }
}

/// Everything read from one source, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedSource {
    pub chart: ChartData,
    pub files: FileTally,
}

/// Outcome of one source in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    pub source: String,
    pub drive: DriveType,
    pub chart: ChartData,
    pub files: FileTally,

    /// Image written for this source; `None` when it was skipped or failed.
    pub output: Option<PathBuf>,

    /// Why the chart could not be drawn.
    pub error: Option<String>,
}

/// Outcome of a whole run, in configuration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub sources: Vec<SourceReport>,
}

impl RunReport {
    /// Paths of every image written.
    pub fn outputs(&self) -> impl Iterator<Item = &Path> + '_ {
        self.sources
            .iter()
            .filter_map(|report| report.output.as_deref())
    }

    pub fn rendered(&self) -> usize {
        self.outputs().count()
    }

    /// Sources whose chart failed to render.
    pub fn failed(&self) -> usize {
        self.sources
            .iter()
            .filter(|report| report.error.is_some())
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.sources.len() - self.rendered() - self.failed()
    }
}

/// Loads every file of one source, in order, and aggregates the result.
pub fn collect_source(source: &SourceConfig) -> CollectedSource {
    let mut files = FileTally::default();

    let chart = match &source.input {
        InputSpec::IndexedFiles {
            series_keys,
            columns,
            ..
        } => {
            let mut categories = Vec::new();
            let mut buckets = Vec::new();
            for (label, path) in source.input.files() {
                let outcome = try_load_positional(&path, columns, series_keys, source.unit);
                buckets.push(
                    files
                        .record(&path, outcome)
                        .unwrap_or_else(|| BucketSet::new(series_keys)),
                );
                categories.push(label);
            }
            ChartData::from_files(&source.name, categories, series_keys, &buckets)
        }
        InputSpec::NamedColumns {
            path,
            columns,
            keys,
        } => {
            let outcome = try_load_named(path, columns, keys.as_deref(), source.unit);
            let samples = files.record(path, outcome).unwrap_or_default();
            ChartData::from_named(&source.name, &samples, keys.as_deref())
        }
    };

    CollectedSource { chart, files }
}

/// Runs a whole chart pass over `config`.
pub fn run(config: &ChartConfig) -> Result<RunReport> {
    config.validate()?;
    std::fs::create_dir_all(&config.output_dir).map_err(|error| PipelineError::OutputDir {
        path: config.output_dir.clone(),
        error,
    })?;

    let mut report = RunReport::default();
    for source in &config.sources {
        let collected = collect_source(source);
        let drive = DriveType::from_source_name(&source.name);
        let (output, error) = match render_source(config, source, drive, &collected.chart) {
            Ok(output) => (output, None),
            Err(e) => {
                tracing::error!("Failed to render chart for {}: {}", source.name, e);
                (None, Some(e.to_string()))
            }
        };

        report.sources.push(SourceReport {
            source: source.name.clone(),
            drive,
            chart: collected.chart,
            files: collected.files,
            output,
            error,
        });
    }

    Ok(report)
}

fn render_source(
    config: &ChartConfig,
    source: &SourceConfig,
    drive: DriveType,
    chart: &ChartData,
) -> core::result::Result<Option<PathBuf>, PlotError> {
    if chart.categories().is_empty() {
        tracing::warn!("Source {} has no data to chart. Skipping.", source.name);
        return Ok(None);
    }

    if chart.is_empty() {
        match config.empty_source_policy {
            EmptySourcePolicy::Skip => {
                tracing::warn!("Source {} has no samples. Skipping.", source.name);
                return Ok(None);
            }
            EmptySourcePolicy::RenderZeros => {
                tracing::warn!("Source {} has no samples. Rendering zeros.", source.name);
            }
        }
    }

    let layout = BarLayout::new(
        chart.categories().len(),
        chart.series().len(),
        config.layout.bar_width,
        config.layout.offset_span,
    );
    let style = ChartStyle {
        title: chart_title(&source.labels.title, drive, &source.name),
        x_label: source.labels.x_label.clone(),
        y_label: source.labels.y_label.clone(),
        series_prefix: source.labels.series_prefix.clone(),
        width: config.layout.width,
        height: config.layout.height,
    };
    let output_path = config
        .output_dir
        .join(chart_file_name(&source.name, drive, config.format));

    draw_grouped_bar_chart(chart, &layout, &style, &output_path, config.format)?;

    tracing::info!("Saved chart for {} to {}", source.name, output_path.display());
    Ok(Some(output_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{AxisLabels, LayoutConfig, DEFAULT_FILE_PREFIX};
    use crate::api::enums::image_format::ImageFormat;
    use crate::api::enums::unit_policy::UnitPolicy;
    use crate::loader::group_key::keys;
    use crate::loader::named::NamedColumns;
    use crate::loader::positional::PositionalColumns;
    use std::fs;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Log output shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn labels() -> AxisLabels {
        AxisLabels {
            title: "Lookup Times".to_string(),
            x_label: "File Size".to_string(),
            y_label: "Average Lookup Time (ms)".to_string(),
            series_prefix: "Hash Size ".to_string(),
        }
    }

    fn indexed(name: &str, folder: &Path, unit: UnitPolicy) -> SourceConfig {
        SourceConfig {
            name: name.to_string(),
            unit,
            labels: labels(),
            input: InputSpec::IndexedFiles {
                folder: folder.to_path_buf(),
                file_prefix: DEFAULT_FILE_PREFIX.to_string(),
                first_index: 25,
                last_index: 28,
                series_keys: keys([3, 4, 5]),
                columns: PositionalColumns::two_column(),
            },
        }
    }

    fn named(name: &str, path: &Path) -> SourceConfig {
        SourceConfig {
            name: name.to_string(),
            unit: UnitPolicy::SecondsToMilliseconds,
            labels: labels(),
            input: InputSpec::NamedColumns {
                path: path.to_path_buf(),
                columns: NamedColumns {
                    key_column: "K".to_string(),
                    value_column: "lookup_time".to_string(),
                    series_column: Some("hash_size".to_string()),
                },
                keys: None,
            },
        }
    }

    fn config(sources: Vec<SourceConfig>, output_dir: &Path) -> ChartConfig {
        ChartConfig {
            sources,
            output_dir: output_dir.to_path_buf(),
            format: ImageFormat::Png,
            empty_source_policy: EmptySourcePolicy::Skip,
            layout: LayoutConfig::default(),
        }
    }

    #[test]
    fn collects_loaded_missing_and_failed_files() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("nvme_lookup");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("lookup_times25.csv"), "3,0.002\n3,0.004\n4,0.01\n").unwrap();
        fs::write(folder.join("lookup_times26.csv"), "3,0.5\n4,oops\n").unwrap();
        fs::write(folder.join("lookup_times28.csv"), "5,0.25\n64,9.0\n").unwrap();

        let collected = collect_source(&indexed(
            "nvme_lookup",
            &folder,
            UnitPolicy::SecondsToMilliseconds,
        ));

        assert_eq!(
            collected.files,
            FileTally {
                loaded: 2,
                missing: 1,
                failed: 1
            }
        );
        assert_eq!(collected.files.total(), 4);

        let chart = &collected.chart;
        assert_eq!(chart.categories(), &["25", "26", "27", "28"]);
        assert_eq!(chart.series(), &["3", "4", "5"]);
        assert!((chart.mean(0, 0) - 3.0).abs() < 1e-9);
        assert!((chart.mean(1, 0) - 10.0).abs() < 1e-9);
        // Malformed file contributes nothing, not even its good first row.
        assert_eq!(chart.mean(0, 1), 0.0);
        assert_eq!(chart.mean(0, 2), 0.0);
        assert!((chart.mean(2, 3) - 250.0).abs() < 1e-9);
        assert_eq!(chart.sample_count(), 4);
    }

    #[test]
    fn missing_and_malformed_files_are_logged() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("ssd_lookup");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("lookup_times25.csv"), "3,0.5\n").unwrap();
        fs::write(folder.join("lookup_times26.csv"), "3,0.5,0.7\n").unwrap();
        fs::write(folder.join("lookup_times28.csv"), "4,0.25\n").unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        let collected = tracing::subscriber::with_default(subscriber, || {
            collect_source(&indexed("ssd_lookup", &folder, UnitPolicy::PassThrough))
        });

        let text = logs.text();
        let missing = folder.join("lookup_times27.csv");
        let malformed = folder.join("lookup_times26.csv");
        assert!(text.contains(&format!("File {} not found. Skipping.", missing.display())));
        assert!(text.contains(&format!("Error reading {}:", malformed.display())));
        assert!(text.contains("WARN"));
        assert!(text.contains("ERROR"));
        assert_eq!(
            collected.files,
            FileTally {
                loaded: 2,
                missing: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn named_columns_keep_only_fixed_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("m2.csv");
        fs::write(
            &path,
            "K,hash_size,lookup_time\n26,4,0.002\n27,4,n/a\nK,hash_size,lookup_time\n26,8,0.004\n",
        )
        .unwrap();
        let mut source = named("m2", &path);
        if let InputSpec::NamedColumns { keys: fixed, .. } = &mut source.input {
            *fixed = Some(keys([26]));
        }

        let collected = collect_source(&source);

        assert_eq!(collected.files.loaded, 1);
        assert_eq!(collected.files.failed, 0);
        assert_eq!(collected.chart.categories(), &["26"]);
        assert!((collected.chart.mean(0, 0) - 2.0).abs() < 1e-9);
        assert!((collected.chart.mean(1, 0) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn collects_named_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("epyc.csv");
        fs::write(
            &path,
            "K,hash_size,lookup_time\n30,4,0.002\n26,4,0.001\n26,8,0.003\n",
        )
        .unwrap();

        let collected = collect_source(&named("epyc", &path));

        assert_eq!(collected.files.loaded, 1);
        assert_eq!(collected.chart.categories(), &["26", "30"]);
        assert_eq!(collected.chart.series(), &["4", "8"]);
        assert!((collected.chart.mean(0, 1) - 2.0).abs() < 1e-9);
        assert!((collected.chart.mean(1, 0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn absent_sources_are_skipped_when_requested() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("charts");
        let config = config(
            vec![
                indexed("hdd_lookup", &temp_dir.path().join("hdd_lookup"), UnitPolicy::PassThrough),
                named("epyc", &temp_dir.path().join("epyc.csv")),
            ],
            &output_dir,
        );

        let report = run(&config).unwrap();

        assert!(output_dir.is_dir());
        assert_eq!(report.sources.len(), 2);
        assert_eq!(report.rendered(), 0);
        assert_eq!(report.skipped(), 2);
        assert_eq!(report.sources[0].drive, DriveType::Hdd);
        assert_eq!(report.sources[0].files.missing, 4);
        assert_eq!(report.sources[1].files.missing, 1);
        assert!(report.sources[1].chart.categories().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_before_any_io() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("charts");
        let mut config = config(vec![], &output_dir);

        assert!(matches!(
            run(&config),
            Err(PipelineError::Config(ConfigError::NoSources))
        ));

        config.sources.push(indexed("a", temp_dir.path(), UnitPolicy::PassThrough));
        config.layout.bar_width = 0.0;
        assert!(matches!(
            run(&config),
            Err(PipelineError::Config(ConfigError::InvalidBarWidth(_)))
        ));
        assert!(!output_dir.exists());
    }

    #[test]
    fn render_failure_does_not_stop_the_run() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("charts");
        let folder = temp_dir.path().join("nvme_lookup");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("lookup_times25.csv"), "3,0.5\n4,0.75\n").unwrap();
        // The first chart's output path is taken by a directory.
        let blocked = output_dir.join("nvme_lookup_nvme_lookup_times_bar_graph.svg");
        fs::create_dir_all(&blocked).unwrap();

        let mut config = config(
            vec![
                indexed("nvme_lookup", &folder, UnitPolicy::PassThrough),
                indexed("hdd_lookup", &temp_dir.path().join("hdd_lookup"), UnitPolicy::PassThrough),
            ],
            &output_dir,
        );
        config.format = ImageFormat::Svg;

        let report = run(&config).unwrap();

        assert_eq!(report.sources.len(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.rendered(), 0);
        assert_eq!(report.skipped(), 1);
        assert!(report.sources[0].output.is_none());
        assert!(report.sources[0].error.is_some());
        assert_eq!(report.sources[0].files.loaded, 1);
        assert_eq!(report.sources[1].source, "hdd_lookup");
        assert_eq!(report.sources[1].files.missing, 4);
        assert!(report.sources[1].error.is_none());
        assert!(blocked.is_dir());
    }

    #[test]
    fn repeated_collection_is_identical() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("lookup_times25.csv"), "3,1.5\n4,2.5\n").unwrap();
        let source = indexed("ssd_lookup", temp_dir.path(), UnitPolicy::PassThrough);

        assert_eq!(collect_source(&source), collect_source(&source));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn renders_zero_chart_for_absent_source() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("charts");
        let mut config = config(
            vec![indexed(
                "nvme_lookup",
                &temp_dir.path().join("nvme_lookup"),
                UnitPolicy::PassThrough,
            )],
            &output_dir,
        );
        config.empty_source_policy = EmptySourcePolicy::RenderZeros;

        let report = run(&config).unwrap();

        let expected = output_dir.join("nvme_lookup_nvme_lookup_times_bar_graph.png");
        assert_eq!(report.sources[0].output.as_deref(), Some(expected.as_path()));
        assert!(expected.exists());
    }
}
