//! Explicit run configuration.
//!
//! Everything the chart pass needs (which sources to read, which keys to
//! recognize, how to convert units, how to lay out and where to write the
//! images) lives in a [`ChartConfig`] that is passed in, rather than in global
//! lists. Configurations can be built in code (see [`crate::api::presets`]) or
//! read from JSON.

use super::enums::empty_source_policy::EmptySourcePolicy;
use super::enums::image_format::ImageFormat;
use super::enums::unit_policy::UnitPolicy;
use crate::loader::group_key::GroupKey;
use crate::loader::named::NamedColumns;
use crate::loader::positional::PositionalColumns;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default width of a single bar, in category units.
pub const DEFAULT_BAR_WIDTH: f64 = 0.1;

/// Default half-width of the interval series offsets are spread over.
pub const DEFAULT_OFFSET_SPAN: f64 = 0.35;

/// Default file name prefix of indexed lookup files.
pub const DEFAULT_FILE_PREFIX: &str = "lookup_times";

/// Errors in a configuration, found while reading or validating it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration contains no sources")]
    NoSources,

    #[error("Source name '{0}' is used more than once")]
    DuplicateSource(String),

    #[error("Bar width must be positive, got {0}")]
    InvalidBarWidth(f64),

    #[error("Offset span must be in (0, 0.5), got {0}")]
    InvalidOffsetSpan(f64),

    #[error("Canvas must be at least 1x1 pixels, got {0}x{1}")]
    InvalidCanvas(u32, u32),

    #[error("Source '{source_name}': first index {first} is after last index {last}")]
    InvalidIndexRange {
        source_name: String,
        first: u32,
        last: u32,
    },

    #[error("Source '{0}' recognizes no series keys")]
    NoSeriesKeys(String),

    #[error("Source '{0}' reads the key and the value from the same column")]
    SameColumns(String),

    #[error("Unknown preset '{name}', expected one of: {expected}")]
    UnknownPreset { name: String, expected: String },
}

type Result<T> = core::result::Result<T, ConfigError>;

/// Complete description of one chart generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Sources to chart, one image each, in this order.
    pub sources: Vec<SourceConfig>,

    /// Directory the images are written to. Created if missing.
    pub output_dir: PathBuf,

    #[serde(default)]
    pub format: ImageFormat,

    #[serde(default)]
    pub empty_source_policy: EmptySourcePolicy,

    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Bar placement and canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one bar, in category units.
    pub bar_width: f64,

    /// Series offsets are spread over `[-offset_span, +offset_span]`.
    pub offset_span: f64,

    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            offset_span: DEFAULT_OFFSET_SPAN,
            width: 1400,
            height: 800,
        }
    }
}

/// One named source of samples, rendered to one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Identifies the source in file names, titles and logs.
    /// The drive type is inferred from it.
    pub name: String,

    #[serde(default)]
    pub unit: UnitPolicy,

    pub labels: AxisLabels,

    pub input: InputSpec,
}

/// Text drawn around a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,

    /// Prepended to each series label in the legend (e.g. `"Hash Size "`).
    #[serde(default)]
    pub series_prefix: String,
}

/// Where a source's samples come from and how they map onto the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputSpec {
    /// One header-less file per x-axis category:
    /// `<folder>/<file_prefix><index>.csv` for every index in
    /// `first_index..=last_index`. Series are the recognized keys.
    IndexedFiles {
        folder: PathBuf,

        #[serde(default = "default_file_prefix")]
        file_prefix: String,

        first_index: u32,
        last_index: u32,

        /// Recognized keys, in legend order. Rows with other keys are ignored.
        series_keys: Vec<GroupKey>,

        #[serde(default)]
        columns: PositionalColumns,
    },

    /// A single file with a header row. X-axis categories are group keys,
    /// series come from the optional series column.
    NamedColumns {
        path: PathBuf,

        columns: NamedColumns,

        /// Recognized keys. When absent, the sorted unique keys in the file.
        #[serde(default)]
        keys: Option<Vec<GroupKey>>,
    },
}

fn default_file_prefix() -> String {
    DEFAULT_FILE_PREFIX.to_string()
}

impl InputSpec {
    /// Files this input reads, paired with their x-axis category label
    /// (empty for named-column inputs, whose categories come from the data).
    pub fn files(&self) -> Vec<(String, PathBuf)> {
        match self {
            InputSpec::IndexedFiles {
                folder,
                file_prefix,
                first_index,
                last_index,
                ..
            } => (*first_index..=*last_index)
                .map(|index| {
                    let path = folder.join(format!("{}{}.csv", file_prefix, index));
                    (index.to_string(), path)
                })
                .collect(),
            InputSpec::NamedColumns { path, .. } => vec![(String::new(), path.clone())],
        }
    }
}

impl ChartConfig {
    /// Reads a configuration from a JSON file. The result is not yet validated.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the configuration for values that cannot produce a chart.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }

        let layout = &self.layout;
        if !(layout.bar_width > 0.0 && layout.bar_width.is_finite()) {
            return Err(ConfigError::InvalidBarWidth(layout.bar_width));
        }
        if !(layout.offset_span > 0.0 && layout.offset_span < 0.5) {
            return Err(ConfigError::InvalidOffsetSpan(layout.offset_span));
        }
        if layout.width == 0 || layout.height == 0 {
            return Err(ConfigError::InvalidCanvas(layout.width, layout.height));
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            if !names.insert(source.name.as_str()) {
                return Err(ConfigError::DuplicateSource(source.name.clone()));
            }
            source.validate()?;
        }

        Ok(())
    }
}

impl SourceConfig {
    fn validate(&self) -> Result<()> {
        match &self.input {
            InputSpec::IndexedFiles {
                first_index,
                last_index,
                series_keys,
                columns,
                ..
            } => {
                if first_index > last_index {
                    return Err(ConfigError::InvalidIndexRange {
                        source_name: self.name.clone(),
                        first: *first_index,
                        last: *last_index,
                    });
                }
                if series_keys.is_empty() {
                    return Err(ConfigError::NoSeriesKeys(self.name.clone()));
                }
                if columns.key_column == columns.value_column {
                    return Err(ConfigError::SameColumns(self.name.clone()));
                }
            }
            InputSpec::NamedColumns { columns, keys, .. } => {
                if columns.key_column == columns.value_column {
                    return Err(ConfigError::SameColumns(self.name.clone()));
                }
                if matches!(keys, Some(keys) if keys.is_empty()) {
                    return Err(ConfigError::NoSeriesKeys(self.name.clone()));
                }
            }
        }

        Ok(())
    }
}
