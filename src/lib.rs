//! # lookup-chart
//! Turns lookup-time benchmark CSVs into grouped bar charts.
//!
//! Samples are loaded per source, bucketed by group key, averaged, and drawn as
//! side-by-side bars (one bar per series within each x-axis category).

/// Public High Level API
pub mod api {
    /// Run configuration: sources, layout, output.
    pub mod config;

    /// Ready-made configurations for the known benchmark layouts.
    pub mod presets;

    pub mod enums {
        pub mod drive_type;
        pub mod empty_source_policy;
        pub mod image_format;
        pub mod unit_policy;
    }
}

/// Reading samples out of delimited text files.
pub mod loader {
    pub mod errors;
    pub mod group_key;
    pub mod named;
    pub mod positional;
    pub mod sample;
}

/// Bucketing of samples and computation of per-bucket means.
pub mod aggregate {
    pub mod bucket_set;
    pub mod chart_data;
}

/// Placement of grouped bars along the x axis.
pub mod layout {
    pub mod bar_layout;
}

/// Chart and table output.
pub mod render {
    pub mod plots;
    pub mod summary_table;
}

/// Batch driver tying loading, aggregation and rendering together.
pub mod pipeline;

pub mod prelude;

pub mod utilities {
    pub mod file_names;
}
