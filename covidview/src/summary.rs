//! Structural summaries of the raw dataset and the latest figures for a country.

use std::fmt::Display;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use itertools::Itertools;
use polars::prelude::{DataFrame, SortMultipleOptions};

use crate::{error::CovidViewError, COL};

/// Per-column entry of `DatasetInfo`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub dtype: String,
}

/// Shape, column types and memory footprint of a `DataFrame`
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    pub estimated_size: usize,
}

impl DatasetInfo {
    pub fn from_df(df: &DataFrame) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .map(|series| ColumnInfo {
                name: series.name().to_string(),
                non_null: series.len() - series.null_count(),
                dtype: series.dtype().to_string(),
            })
            .collect();
        Self {
            rows: df.height(),
            columns,
            estimated_size: df.estimated_size(),
        }
    }
}

/// The `top` columns with the most nulls, descending. Ties keep column order.
pub fn null_counts(df: &DataFrame, top: usize) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|series| (series.name().to_string(), series.null_count()))
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(top)
        .collect()
}

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// The most recent row of a country with a known case count.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestStats {
    pub date: Option<NaiveDate>,
    pub total_cases: f64,
    pub total_deaths: Option<f64>,
    pub people_vaccinated: Option<f64>,
    pub people_fully_vaccinated: Option<f64>,
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}

impl LatestStats {
    /// Column name and formatted value pairs, in `COL::LATEST` order
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let date = self
            .date
            .map_or_else(|| "NaT".to_string(), |date| date.to_string());
        COL::LATEST
            .into_iter()
            .zip([
                date,
                fmt_value(Some(self.total_cases)),
                fmt_value(self.total_deaths),
                fmt_value(self.people_vaccinated),
                fmt_value(self.people_fully_vaccinated),
            ])
            .collect()
    }
}

impl Display for LatestStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, value) in self.fields() {
            writeln!(f, "{name:<25}{value:>20}")?;
        }
        Ok(())
    }
}

/// Sorts `df` by date (null dates last), drops rows without `total_cases` and reads the
/// last remaining row. `country` only labels the error when no row is left.
pub fn latest(df: &DataFrame, country: &str) -> Result<LatestStats> {
    let sorted = df
        .sort(
            [COL::DATE],
            SortMultipleOptions::default()
                .with_nulls_last(true)
                .with_maintain_order(true),
        )?
        .drop_nulls(Some(&[COL::TOTAL_CASES]))?;
    let idx = sorted
        .height()
        .checked_sub(1)
        .ok_or_else(|| CovidViewError::NoRows(country.to_string()))?;

    let count = |name: &str| -> Result<Option<f64>> { Ok(sorted.column(name)?.f64()?.get(idx)) };
    let date = sorted
        .column(COL::DATE)?
        .date()?
        .as_date_iter()
        .nth(idx)
        .flatten();

    Ok(LatestStats {
        date,
        total_cases: count(COL::TOTAL_CASES)?
            .with_context(|| format!("Null total_cases in row {idx} after dropping nulls"))?,
        total_deaths: count(COL::TOTAL_DEATHS)?,
        people_vaccinated: count(COL::PEOPLE_VACCINATED)?,
        people_fully_vaccinated: count(COL::PEOPLE_FULLY_VACCINATED)?,
    })
}
