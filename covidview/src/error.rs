//! Error types.

#[derive(thiserror::Error, Debug)]
pub enum CovidViewError {
    #[error("Data file not found: {0}")]
    DataNotFound(String),
    #[error("Required column missing from dataset: {0}")]
    MissingColumn(String),
    #[error("No rows with total cases available for: {0}")]
    NoRows(String),
    #[error("Failed to draw chart: {0}")]
    Chart(String),
    #[error("Wrapped polars error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}
