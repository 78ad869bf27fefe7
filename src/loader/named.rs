//! Delimited files with a header row, where columns are located by name.

use super::errors::{parse_value, read_whole_file, LoadError, LoadOutcome};
use super::group_key::GroupKey;
use super::sample::{NamedSample, Sample};
use crate::api::enums::unit_policy::UnitPolicy;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

type Result<T> = core::result::Result<T, LoadError>;

/// Names of the columns to read from a header-based file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColumns {
    /// Column holding the group key (e.g. `K`).
    pub key_column: String,

    /// Column holding the lookup time.
    pub value_column: String,

    /// Optional column splitting rows into series (e.g. `hash_size`).
    #[serde(default)]
    pub series_column: Option<String>,
}

/// Column positions resolved against a header row.
struct ResolvedColumns {
    key: usize,
    value: usize,
    series: Option<usize>,
}

impl NamedColumns {
    fn resolve(&self, headers: &csv::StringRecord) -> Result<ResolvedColumns> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        Ok(ResolvedColumns {
            key: find(&self.key_column)?,
            value: find(&self.value_column)?,
            series: self.series_column.as_deref().map(find).transpose()?,
        })
    }
}

/// Parses the rows of `data` whose key is recognized.
///
/// With `keys` set, rows whose key does not parse or is not listed are skipped
/// without looking at their value. Without it, every row with an integer key
/// is kept. A ragged record, a missing header column, or a kept row with an
/// unreadable lookup time fails the whole input.
pub fn parse_named(
    data: &[u8],
    columns: &NamedColumns,
    keys: Option<&[GroupKey]>,
    unit: UnitPolicy,
) -> Result<Vec<NamedSample>> {
    let recognized: Option<HashSet<GroupKey>> = keys.map(|keys| keys.iter().copied().collect());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let resolved = columns.resolve(reader.headers()?)?;

    let mut records = 0usize;
    let mut samples = Vec::new();
    for record in reader.records() {
        // Mismatched record lengths surface here as csv errors.
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        records += 1;

        let key = match GroupKey::parse(&record[resolved.key]) {
            Some(key) if recognized.as_ref().map_or(true, |set| set.contains(&key)) => key,
            _ => continue,
        };
        let value = parse_value(&record[resolved.value], line)?;
        let series = resolved.series.map(|index| record[index].to_string());

        samples.push(NamedSample::new(series, Sample::new(key, unit.apply(value))));
    }

    if records == 0 {
        return Err(LoadError::Empty);
    }

    Ok(samples)
}

/// Loads a header-based file, keeping the rows `keys` recognizes
/// (all integer-keyed rows when `None`).
///
/// A missing file is reported as [`LoadOutcome::Missing`]. The file is parsed
/// completely before anything is returned, so a malformed record leaves no
/// partial data.
pub fn try_load_named(
    path: &Path,
    columns: &NamedColumns,
    keys: Option<&[GroupKey]>,
    unit: UnitPolicy,
) -> Result<LoadOutcome<Vec<NamedSample>>> {
    match read_whole_file(path)? {
        LoadOutcome::Loaded(data) => Ok(LoadOutcome::Loaded(parse_named(
            &data, columns, keys, unit,
        )?)),
        LoadOutcome::Missing => Ok(LoadOutcome::Missing),
    }
}
