//! Per-source matrix of aggregates, ready to be laid out and drawn.

use super::bucket_set::BucketSet;
use crate::loader::group_key::GroupKey;
use crate::loader::sample::NamedSample;
use hashbrown::HashMap;

/// Means (and sample counts) for every (series, category) pair of one source.
///
/// Categories run along the x axis; series are the bars drawn side by side
/// within a category, in legend order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    source: String,
    categories: Vec<String>,
    series: Vec<String>,
    /// Indexed `[series][category]`.
    means: Vec<Vec<f64>>,
    /// Indexed `[series][category]`.
    counts: Vec<Vec<usize>>,
}

impl ChartData {
    /// Builds chart data where each x-axis category is one file and each series
    /// is one recognized key within it.
    ///
    /// `files[i]` holds the buckets of the file for `categories[i]`; a file
    /// that was missing or malformed should be passed as empty buckets.
    pub fn from_files(
        source: &str,
        categories: Vec<String>,
        series_keys: &[GroupKey],
        files: &[BucketSet],
    ) -> Self {
        debug_assert_eq!(categories.len(), files.len());

        let means = series_keys
            .iter()
            .map(|&key| files.iter().map(|file| file.mean(key)).collect())
            .collect();
        let counts = series_keys
            .iter()
            .map(|&key| files.iter().map(|file| file.values(key).len()).collect())
            .collect();

        Self {
            source: source.to_string(),
            categories,
            series: series_keys.iter().map(GroupKey::to_string).collect(),
            means,
            counts,
        }
    }

    /// Builds chart data from a header-based file, where each x-axis category
    /// is a group key and each series is a value of the series column.
    ///
    /// `keys` fixes the categories; `None` uses the sorted unique keys present
    /// in `samples`. Series are sorted, numerically when every label is a group
    /// key, so row order in the file does not matter. Without a series column
    /// all samples form one series named after the source.
    pub fn from_named(source: &str, samples: &[NamedSample], keys: Option<&[GroupKey]>) -> Self {
        let categories = match keys {
            Some(keys) => keys.to_vec(),
            None => discover_keys(samples),
        };

        let label = |named: &NamedSample| named.series.as_deref().unwrap_or(source).to_string();

        let mut series: Vec<String> = samples.iter().map(label).collect();
        sort_series(&mut series);
        series.dedup();
        if series.is_empty() {
            series.push(source.to_string());
        }

        let slots: HashMap<&str, usize> = series
            .iter()
            .enumerate()
            .map(|(slot, label)| (label.as_str(), slot))
            .collect();
        let mut buckets = vec![BucketSet::new(&categories); series.len()];
        for named in samples {
            if let Some(&slot) = slots.get(named.series.as_deref().unwrap_or(source)) {
                buckets[slot].push(named.sample);
            }
        }
        drop(slots);

        Self {
            source: source.to_string(),
            categories: buckets
                .first()
                .map(|b| b.keys().iter().map(GroupKey::to_string).collect())
                .unwrap_or_default(),
            series,
            means: buckets.iter().map(BucketSet::means).collect(),
            counts: buckets.iter().map(BucketSet::counts).collect(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// X-axis category labels, in drawing order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Series labels, in legend order.
    pub fn series(&self) -> &[String] {
        &self.series
    }

    /// Means of one series across all categories.
    pub fn series_means(&self, series: usize) -> &[f64] {
        &self.means[series]
    }

    pub fn mean(&self, series: usize, category: usize) -> f64 {
        self.means[series][category]
    }

    pub fn count(&self, series: usize, category: usize) -> usize {
        self.counts[series][category]
    }

    /// Total number of samples behind the chart.
    pub fn sample_count(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Whether the chart is backed by no samples at all.
    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Largest mean in the chart; `0.0` when there is none.
    pub fn max_mean(&self) -> f64 {
        self.means
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

/// Orders series labels as numbers when all of them are group keys, otherwise
/// as text.
fn sort_series(labels: &mut [String]) {
    if labels.iter().all(|label| GroupKey::parse(label).is_some()) {
        labels.sort_by_cached_key(|label| GroupKey::parse(label));
    } else {
        labels.sort();
    }
}

/// Sorted unique keys present in `samples`.
fn discover_keys(samples: &[NamedSample]) -> Vec<GroupKey> {
    let mut keys: Vec<GroupKey> = samples.iter().map(|named| named.sample.key).collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}
