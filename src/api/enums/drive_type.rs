use core::fmt;
use serde::{Deserialize, Serialize};

/// Storage medium a benchmark source was recorded on.
///
/// Inferred from the source name, since the benchmark folders are named after
/// the drive they ran against (e.g. `nvme_lookup`, `hdd_lookup`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum DriveType {
    /// NVMe solid state drive.
    NVMe,

    /// SATA/SAS solid state drive.
    Ssd,

    /// Spinning disk. Used whenever the name matches nothing else.
    Hdd,
}

impl DriveType {
    /// Infers the drive type from a source name by case-insensitive substring match.
    ///
    /// `nvme` is checked before `ssd`, anything else is an HDD.
    pub fn from_source_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.contains("nvme") {
            DriveType::NVMe
        } else if name.contains("ssd") {
            DriveType::Ssd
        } else {
            DriveType::Hdd
        }
    }

    /// Label used on charts.
    pub fn label(self) -> &'static str {
        match self {
            DriveType::NVMe => "NVMe",
            DriveType::Ssd => "SSD",
            DriveType::Hdd => "HDD",
        }
    }

    /// Label used in output file names.
    pub fn file_label(self) -> &'static str {
        match self {
            DriveType::NVMe => "nvme",
            DriveType::Ssd => "ssd",
            DriveType::Hdd => "hdd",
        }
    }
}

impl fmt::Display for DriveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("nvme_lookup", DriveType::NVMe)]
    #[case("NVMe-Samsung", DriveType::NVMe)]
    #[case("ssd_lookup", DriveType::Ssd)]
    #[case("machine_SSD_2", DriveType::Ssd)]
    #[case("hdd_lookup", DriveType::Hdd)]
    #[case("lookup_times", DriveType::Hdd)]
    #[case("", DriveType::Hdd)]
    #[case("nvme_vs_ssd", DriveType::NVMe)]
    fn infers_drive_from_name(#[case] name: &str, #[case] expected: DriveType) {
        assert_eq!(DriveType::from_source_name(name), expected);
    }

    #[test]
    fn labels_match_display() {
        assert_eq!(DriveType::NVMe.to_string(), "NVMe");
        assert_eq!(DriveType::Ssd.to_string(), "SSD");
        assert_eq!(DriveType::Hdd.to_string(), "HDD");
        assert_eq!(DriveType::NVMe.file_label(), "nvme");
    }
}
