use serde::{Deserialize, Serialize};

/// Conversion applied to every lookup time read from a source.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitPolicy {
    /// Values are used as written in the file.
    #[default]
    PassThrough,

    /// Values are seconds and are multiplied by 1000.
    SecondsToMilliseconds,
}

impl UnitPolicy {
    /// Multiplicative factor applied to raw values.
    pub fn factor(self) -> f64 {
        match self {
            UnitPolicy::PassThrough => 1.0,
            UnitPolicy::SecondsToMilliseconds => 1000.0,
        }
    }

    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        value * self.factor()
    }
}
