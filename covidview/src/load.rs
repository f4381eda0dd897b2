//! Reads the source CSV into a `DataFrame`.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use polars::prelude::*;

use crate::error::CovidViewError;

/// Reads the whole file at `path` and parses it as CSV with a header row. The schema is
/// inferred from every row so that sparse columns are not mistyped.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CovidViewError::DataNotFound(path.display().to_string()).into());
    }
    info!("Attempting to load dataframe from {}", path.display());
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    let df = read_csv(bytes).with_context(|| format!("Failed to parse '{}'", path.display()))?;
    info!("Loaded dataframe with shape: {:?}", df.shape());
    Ok(df)
}

/// Parses an in-memory CSV buffer.
pub fn read_csv(bytes: Vec<u8>) -> Result<DataFrame> {
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None);
    let df = options
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(CovidViewError::from)?;
    debug!("schema: {:#?}", df.schema());
    Ok(df)
}
