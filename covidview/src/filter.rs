use anyhow::Result;
use log::{info, warn};
use polars::prelude::*;

use crate::COL;

/// Returns a copy of `df` holding only the rows whose `location` is exactly `country`
/// (case-sensitive). No match gives an empty frame rather than an error.
pub fn filter_country(df: &DataFrame, country: &str) -> Result<DataFrame> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col(COL::LOCATION).eq(lit(country)))
        .collect()?;
    if filtered.height() == 0 {
        warn!("No rows found for location '{country}'");
    } else {
        info!("Filtered to '{country}' with shape: {:?}", filtered.shape());
    }
    Ok(filtered)
}
