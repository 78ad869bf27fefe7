use thiserror::Error;

/// Errors that make a single input file unusable.
///
/// None of these abort a batch; the file is skipped and contributes no samples.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Header has no column named '{0}'")]
    MissingColumn(String),

    #[error("Line {line}: '{value}' is not a valid lookup time")]
    InvalidValue { line: u64, value: String },

    #[error("File contains no records")]
    Empty,
}

/// Result of attempting to load a file that may not exist.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    /// The file existed and was parsed.
    Loaded(T),

    /// The file does not exist. Not an error; the caller treats it as no data.
    Missing,
}

impl<T> LoadOutcome<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, LoadOutcome::Missing)
    }
}

/// Reads a whole file, mapping `NotFound` to [`LoadOutcome::Missing`].
pub(crate) fn read_whole_file(
    path: &std::path::Path,
) -> core::result::Result<LoadOutcome<Vec<u8>>, LoadError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(LoadOutcome::Loaded(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LoadOutcome::Missing),
        Err(e) => Err(LoadError::Io(e)),
    }
}

/// Parses a lookup time cell.
pub(crate) fn parse_value(cell: &str, line: u64) -> core::result::Result<f64, LoadError> {
    let cell = cell.trim();
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LoadError::InvalidValue {
            line,
            value: cell.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = read_whole_file(&dir.path().join("nope.csv")).unwrap();
        assert!(outcome.is_missing());
    }

    #[test]
    fn parses_values() {
        assert_eq!(parse_value(" 0.004 ", 1).unwrap(), 0.004);
        assert!(matches!(
            parse_value("fast", 7),
            Err(LoadError::InvalidValue { line: 7, .. })
        ));
        assert!(parse_value("inf", 1).is_err());
    }
}
