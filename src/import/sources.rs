use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Result, StatsError};

/// Deserialize every row of a CSV stream with a header line.
pub fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let rows = csv::Reader::from_reader(reader)
        .deserialize()
        .collect::<std::result::Result<_, csv::Error>>()?;
    Ok(rows)
}

/// Deserialize every row of a CSV file, tagging failures with its path.
pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let csv_error = |source| StatsError::Csv {
        path: path.display().to_string(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    reader
        .deserialize()
        .collect::<std::result::Result<_, csv::Error>>()
        .map_err(csv_error)
}
