//! Buckets of lookup times keyed by a fixed set of recognized group keys.
//!
//! The recognized key set acts as a filter: samples for any other key are
//! dropped without complaint. Every recognized key always has a bucket, even
//! if it never receives a sample, and an empty bucket averages to zero.

use crate::loader::group_key::GroupKey;
use crate::loader::sample::Sample;
use hashbrown::HashMap;

/// Arithmetic mean of `values`, or `0.0` for an empty slice.
///
/// Summation runs in slice order.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

/// Lookup-time samples grouped by recognized [`GroupKey`].
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSet {
    /// Recognized keys, in the order they were supplied (duplicates removed).
    keys: Vec<GroupKey>,
    /// Maps a key to its slot in `keys`/`values`.
    index: HashMap<GroupKey, usize>,
    /// Values per key, in the order they were pushed.
    values: Vec<Vec<f64>>,
}

impl BucketSet {
    /// Creates empty buckets for every recognized key.
    pub fn new(recognized: &[GroupKey]) -> Self {
        let mut keys = Vec::with_capacity(recognized.len());
        let mut index = HashMap::with_capacity(recognized.len());
        for &key in recognized {
            if !index.contains_key(&key) {
                index.insert(key, keys.len());
                keys.push(key);
            }
        }

        let values = vec![Vec::new(); keys.len()];
        Self {
            keys,
            index,
            values,
        }
    }

    /// Buckets `samples` in order, ignoring unrecognized keys.
    pub fn from_samples<I>(recognized: &[GroupKey], samples: I) -> Self
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut buckets = Self::new(recognized);
        buckets.extend(samples);
        buckets
    }

    /// Adds a sample. Returns `false` if its key is not recognized.
    pub fn push(&mut self, sample: Sample) -> bool {
        match self.index.get(&sample.key) {
            Some(&slot) => {
                self.values[slot].push(sample.value);
                true
            }
            None => false,
        }
    }

    /// Recognized keys in their configured order.
    pub fn keys(&self) -> &[GroupKey] {
        &self.keys
    }

    /// Values recorded for `key`; empty for unrecognized keys.
    pub fn values(&self, key: GroupKey) -> &[f64] {
        match self.index.get(&key) {
            Some(&slot) => &self.values[slot],
            None => &[],
        }
    }

    /// Mean of the bucket for `key`; `0.0` when empty or unrecognized.
    pub fn mean(&self, key: GroupKey) -> f64 {
        mean(self.values(key))
    }

    /// Means of every bucket, in key order.
    pub fn means(&self) -> Vec<f64> {
        self.values.iter().map(|values| mean(values)).collect()
    }

    /// Number of samples for each key, in key order.
    pub fn counts(&self) -> Vec<usize> {
        self.values.iter().map(Vec::len).collect()
    }

    /// Total number of samples held.
    pub fn sample_count(&self) -> usize {
        self.values.iter().map(Vec::len).sum()
    }

    /// Whether no bucket holds a sample.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Vec::is_empty)
    }
}

impl Extend<Sample> for BucketSet {
    fn extend<T: IntoIterator<Item = Sample>>(&mut self, iter: T) {
        for sample in iter {
            self.push(sample);
        }
    }
}
