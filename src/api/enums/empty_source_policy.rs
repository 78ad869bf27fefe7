use serde::{Deserialize, Serialize};

/// What to do with a source that produced no samples at all
/// (every file missing or malformed).
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySourcePolicy {
    /// Draw the chart anyway; every bar has zero height.
    #[default]
    RenderZeros,

    /// Do not produce an image for the source.
    Skip,
}
