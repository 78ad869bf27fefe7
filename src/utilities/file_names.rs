use crate::api::enums::drive_type::DriveType;
use crate::api::enums::image_format::ImageFormat;

/// Suffix shared by every chart image.
pub const CHART_FILE_SUFFIX: &str = "lookup_times_bar_graph";

/// File name of the chart for one source, e.g.
/// `nvme_lookup_nvme_lookup_times_bar_graph.png`.
pub fn chart_file_name(source: &str, drive: DriveType, format: ImageFormat) -> String {
    format!(
        "{}_{}_{}.{}",
        source,
        drive.file_label(),
        CHART_FILE_SUFFIX,
        format.extension()
    )
}

/// Caption of the chart for one source, e.g.
/// `Lookup Times by File Size and Hash Size (NVMe: nvme_lookup)`.
pub fn chart_title(title: &str, drive: DriveType, source: &str) -> String {
    format!("{} ({}: {})", title, drive.label(), source)
}
