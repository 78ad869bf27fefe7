use super::group_key::GroupKey;
use derive_new::new;

/// A single lookup-time measurement.
#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct Sample {
    /// Bucket this sample belongs to.
    pub key: GroupKey,

    /// Lookup time, already converted by the source's unit policy.
    pub value: f64,
}

/// A sample read from a header-based file, tagged with the series it belongs to.
///
/// `series` is `None` when the file has no series column.
#[derive(Debug, Clone, PartialEq, new)]
pub struct NamedSample {
    pub series: Option<String>,
    pub sample: Sample,
}
