pub use crate::aggregate::bucket_set::{mean, BucketSet};
pub use crate::aggregate::chart_data::ChartData;
pub use crate::api::config::*;
pub use crate::api::enums::drive_type::DriveType;
pub use crate::api::enums::empty_source_policy::EmptySourcePolicy;
pub use crate::api::enums::image_format::ImageFormat;
pub use crate::api::enums::unit_policy::UnitPolicy;
pub use crate::layout::bar_layout::BarLayout;
pub use crate::loader::errors::{LoadError, LoadOutcome};
pub use crate::loader::group_key::GroupKey;
pub use crate::loader::sample::Sample;
pub use crate::pipeline::{
    collect_source, run, CollectedSource, FileTally, PipelineError, RunReport, SourceReport,
};
pub use crate::render::plots::{ChartStyle, PlotError};
