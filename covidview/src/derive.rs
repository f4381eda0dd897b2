//! Ratio columns computed from the country rows.
//!
//! Division by zero and null operands are not corrected: a zero `total_cases` gives NaN or
//! infinity and a null one gives null, both of which show up as gaps in the charts.

use anyhow::Result;
use polars::prelude::*;

use crate::COL;

/// `total_deaths / total_cases * 100`
pub fn case_fatality_rate() -> Expr {
    (col(COL::TOTAL_DEATHS) / col(COL::TOTAL_CASES) * lit(100.0)).alias(COL::CASE_FATALITY_RATE)
}

/// `column / population * 100`, aliased to `alias`
pub fn coverage(column: &str, population: u64, alias: &str) -> Expr {
    (col(column) / lit(population as f64) * lit(100.0)).alias(alias)
}

pub fn with_case_fatality_rate(df: DataFrame) -> Result<DataFrame> {
    Ok(df.lazy().with_column(case_fatality_rate()).collect()?)
}

pub fn with_vaccination_coverage(df: DataFrame, population: u64) -> Result<DataFrame> {
    Ok(df
        .lazy()
        .with_columns([
            coverage(COL::PEOPLE_VACCINATED, population, COL::VACCINATED_PCT),
            coverage(
                COL::PEOPLE_FULLY_VACCINATED,
                population,
                COL::FULLY_VACCINATED_PCT,
            ),
        ])
        .collect()?)
}

/// Appends all derived columns, leaving the source columns in place.
pub fn derive(df: DataFrame, population: u64) -> Result<DataFrame> {
    with_vaccination_coverage(with_case_fatality_rate(df)?, population)
}
