//! Configurations for the benchmark layouts in use.

use super::config::*;
use super::enums::empty_source_policy::EmptySourcePolicy;
use super::enums::image_format::ImageFormat;
use super::enums::unit_policy::UnitPolicy;
use crate::loader::group_key::{keys, GroupKey};
use crate::loader::named::NamedColumns;
use crate::loader::positional::PositionalColumns;
use std::path::{Path, PathBuf};

/// Hash sizes (in bits) the lookup benchmark is run with.
pub const HASH_SIZES: [i64; 8] = [3, 4, 5, 6, 7, 8, 16, 32];

/// Names accepted by [`by_name`].
pub const PRESET_NAMES: [&str; 3] = ["hash-sizes", "hash-sizes-ms", "k-values"];

const LOOKUP_TIME_LABEL: &str = "Average Lookup Time (ms)";

pub fn hash_size_keys() -> Vec<GroupKey> {
    keys(HASH_SIZES)
}

/// Per-drive folders of `lookup_times25.csv` ..= `lookup_times35.csv`, with
/// times already in milliseconds.
pub fn hash_sizes(input_dir: &Path, output_dir: &Path) -> ChartConfig {
    indexed_config(
        &["hdd_lookup", "nvme_lookup"],
        25,
        35,
        UnitPolicy::PassThrough,
        input_dir,
        output_dir,
    )
}

/// Per-drive folders of `lookup_times25.csv` ..= `lookup_times40.csv`, with
/// times recorded in seconds.
pub fn hash_sizes_ms(input_dir: &Path, output_dir: &Path) -> ChartConfig {
    indexed_config(
        &["hdd_lookup", "ssd_lookup", "nvme_lookup"],
        25,
        40,
        UnitPolicy::SecondsToMilliseconds,
        input_dir,
        output_dir,
    )
}

/// One chart per `K,lookup_time,hash_size` file, named after the file stem.
/// Categories are the K values present in each file.
pub fn k_values(csv_paths: &[PathBuf], output_dir: &Path) -> ChartConfig {
    let sources = csv_paths
        .iter()
        .map(|path| SourceConfig {
            name: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            unit: UnitPolicy::SecondsToMilliseconds,
            labels: AxisLabels {
                title: "Lookup Times by K Value and Hash Size".to_string(),
                x_label: "K Value".to_string(),
                y_label: LOOKUP_TIME_LABEL.to_string(),
                series_prefix: "Hash Size ".to_string(),
            },
            input: InputSpec::NamedColumns {
                path: path.clone(),
                columns: NamedColumns {
                    key_column: "K".to_string(),
                    value_column: "lookup_time".to_string(),
                    series_column: Some("hash_size".to_string()),
                },
                keys: None,
            },
        })
        .collect();

    base_config(sources, output_dir)
}

/// Looks a preset up by its command line name.
pub fn by_name(
    name: &str,
    input_dir: &Path,
    csv_paths: &[PathBuf],
    output_dir: &Path,
) -> Result<ChartConfig, ConfigError> {
    match name {
        "hash-sizes" => Ok(hash_sizes(input_dir, output_dir)),
        "hash-sizes-ms" => Ok(hash_sizes_ms(input_dir, output_dir)),
        "k-values" => Ok(k_values(csv_paths, output_dir)),
        _ => Err(ConfigError::UnknownPreset {
            name: name.to_string(),
            expected: PRESET_NAMES.join(", "),
        }),
    }
}

fn indexed_config(
    folders: &[&str],
    first_index: u32,
    last_index: u32,
    unit: UnitPolicy,
    input_dir: &Path,
    output_dir: &Path,
) -> ChartConfig {
    let sources = folders
        .iter()
        .map(|folder| SourceConfig {
            name: folder.to_string(),
            unit,
            labels: AxisLabels {
                title: "Lookup Times by File Size and Hash Size".to_string(),
                x_label: format!("File Size ({}-{})", first_index, last_index),
                y_label: LOOKUP_TIME_LABEL.to_string(),
                series_prefix: "Hash Size ".to_string(),
            },
            input: InputSpec::IndexedFiles {
                folder: input_dir.join(folder),
                file_prefix: DEFAULT_FILE_PREFIX.to_string(),
                first_index,
                last_index,
                series_keys: hash_size_keys(),
                columns: PositionalColumns::two_column(),
            },
        })
        .collect();

    base_config(sources, output_dir)
}

fn base_config(sources: Vec<SourceConfig>, output_dir: &Path) -> ChartConfig {
    ChartConfig {
        sources,
        output_dir: output_dir.to_path_buf(),
        format: ImageFormat::Png,
        empty_source_policy: EmptySourcePolicy::RenderZeros,
        layout: LayoutConfig::default(),
    }
}
