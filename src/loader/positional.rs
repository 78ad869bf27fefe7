//! Header-less delimited files where the group key and lookup time sit at fixed
//! column positions.
//!
//! The default layout is the two-column `hash_size,lookup_time` format written
//! to `<folder>/lookup_times<index>.csv`.

use super::errors::{parse_value, read_whole_file, LoadError, LoadOutcome};
use super::group_key::GroupKey;
use super::sample::Sample;
use crate::aggregate::bucket_set::BucketSet;
use crate::api::enums::unit_policy::UnitPolicy;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

type Result<T> = core::result::Result<T, LoadError>;

/// Column layout of a header-less file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionalColumns {
    /// Field separator.
    pub delimiter: char,

    /// Zero-based index of the group key column.
    pub key_column: usize,

    /// Zero-based index of the lookup time column.
    pub value_column: usize,

    /// Exact number of columns every record must have.
    /// `None` only requires enough columns to reach both indices.
    pub expected_columns: Option<usize>,
}

impl Default for PositionalColumns {
    fn default() -> Self {
        Self::two_column()
    }
}

impl PositionalColumns {
    /// `group_key,lookup_time` with nothing else on the line.
    pub fn two_column() -> Self {
        Self {
            delimiter: ',',
            key_column: 0,
            value_column: 1,
            expected_columns: Some(2),
        }
    }

    /// Space separated result lines printed by the lookup benchmark:
    ///
    /// `file threads filesize buckets records_per_bucket lookups search_size found not_found seconds ms_per_lookup`
    ///
    /// Keyed by `search_size`, valued by `ms_per_lookup`.
    pub fn benchmark_summary() -> Self {
        Self {
            delimiter: ' ',
            key_column: 6,
            value_column: 10,
            expected_columns: Some(11),
        }
    }

    /// Smallest number of columns a record needs.
    pub fn min_columns(&self) -> usize {
        self.key_column.max(self.value_column) + 1
    }

    fn delimiter_byte(&self) -> u8 {
        // Only ASCII delimiters are meaningful to the CSV reader.
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}

/// Parses the recognized rows of `data`.
///
/// Rows whose key does not parse or is not in `recognized` are skipped without
/// looking at their value. A record with the wrong number of columns, or a
/// recognized row with an unreadable lookup time, fails the whole input.
pub fn parse_positional(
    data: &[u8],
    columns: &PositionalColumns,
    recognized: &[GroupKey],
    unit: UnitPolicy,
) -> Result<Vec<Sample>> {
    let recognized: HashSet<GroupKey> = recognized.iter().copied().collect();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(columns.delimiter_byte())
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut records = 0usize;
    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        // Blank lines come through as a single empty field.
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        records += 1;

        let column_count_ok = match columns.expected_columns {
            Some(expected) => record.len() == expected,
            None => record.len() >= columns.min_columns(),
        };
        if !column_count_ok {
            return Err(LoadError::ColumnCount {
                line,
                expected: columns.expected_columns.unwrap_or(columns.min_columns()),
                found: record.len(),
            });
        }

        let key = match GroupKey::parse(&record[columns.key_column]) {
            Some(key) if recognized.contains(&key) => key,
            _ => continue,
        };
        let value = parse_value(&record[columns.value_column], line)?;

        samples.push(Sample::new(key, unit.apply(value)));
    }

    if records == 0 {
        return Err(LoadError::Empty);
    }

    Ok(samples)
}

/// Loads a positional file and buckets its samples under the recognized keys.
///
/// A missing file is reported as [`LoadOutcome::Missing`]. The file is parsed
/// completely before bucketing, so a malformed record leaves no partial data.
pub fn try_load_positional(
    path: &Path,
    columns: &PositionalColumns,
    recognized: &[GroupKey],
    unit: UnitPolicy,
) -> Result<LoadOutcome<BucketSet>> {
    let data = match read_whole_file(path)? {
        LoadOutcome::Loaded(data) => data,
        LoadOutcome::Missing => return Ok(LoadOutcome::Missing),
    };

    let samples = parse_positional(&data, columns, recognized, unit)?;
    Ok(LoadOutcome::Loaded(BucketSet::from_samples(recognized, samples)))
}
