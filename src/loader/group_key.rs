use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Category a sample is bucketed under: a hash size or a K value.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(pub i64);

impl GroupKey {
    /// Parses a key out of a CSV cell.
    ///
    /// Surrounding whitespace is ignored, and integral float spellings
    /// (`"3.0"`, which some writers emit for integer columns) are accepted.
    pub fn parse(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if let Ok(value) = cell.parse::<i64>() {
            return Some(GroupKey(value));
        }

        let value = cell.parse::<f64>().ok()?;
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Some(GroupKey(value as i64))
        } else {
            None
        }
    }
}

impl From<i64> for GroupKey {
    fn from(value: i64) -> Self {
        GroupKey(value)
    }
}

impl FromStr for GroupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupKey::parse(s).ok_or_else(|| format!("'{}' is not an integer group key", s))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a list of plain integers into keys.
pub fn keys<I: IntoIterator<Item = i64>>(values: I) -> Vec<GroupKey> {
    values.into_iter().map(GroupKey).collect()
}
