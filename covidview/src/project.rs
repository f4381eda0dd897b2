//! Narrows the raw dataset to the columns the analysis uses and fixes their types.

use anyhow::Result;
use log::debug;
use polars::prelude::*;

use crate::{error::CovidViewError, COL};

/// Format of the `date` column in the source data.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lenient: values that do not match `DATE_FORMAT` become null.
fn date_options() -> StrptimeOptions {
    StrptimeOptions {
        format: Some(DATE_FORMAT.into()),
        strict: false,
        exact: true,
        cache: true,
    }
}

/// Selects `COL::REQUIRED` in order, parses `date` into a `Date` column and casts the count
/// columns to `Float64`. Fails on the first required column that is absent.
pub fn project(df: &DataFrame) -> Result<DataFrame> {
    if let Some(missing) = COL::REQUIRED
        .into_iter()
        .find(|name| df.column(name).is_err())
    {
        return Err(CovidViewError::MissingColumn(missing.to_string()).into());
    }

    let date = match df.column(COL::DATE)?.dtype() {
        DataType::Date => col(COL::DATE),
        _ => col(COL::DATE)
            .cast(DataType::String)
            .str()
            .to_date(date_options()),
    };
    let mut exprs = vec![col(COL::LOCATION).cast(DataType::String), date];
    exprs.extend(
        COL::COUNTS
            .into_iter()
            .map(|name| col(name).cast(DataType::Float64)),
    );

    let projected = df.clone().lazy().select(exprs).collect()?;
    debug!("projected schema: {:#?}", projected.schema());
    Ok(projected)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use polars::df;

    use super::*;

    fn raw_df() -> DataFrame {
        df!(
            "iso_code" => &["IND", "IND", "FRA"],
            COL::PEOPLE_FULLY_VACCINATED => &[None, Some(5i64), Some(1)],
            COL::LOCATION => &["India", "India", "France"],
            COL::DATE => &["2021-01-01", "not a date", "2021-01-03"],
            COL::TOTAL_CASES => &[Some(100i64), None, Some(50)],
            COL::NEW_CASES => &[Some(10i64), Some(0), Some(5)],
            COL::TOTAL_DEATHS => &[Some(1.0), Some(2.0), None],
            COL::NEW_DEATHS => &[Some(1i64), Some(1), Some(0)],
            COL::TOTAL_VACCINATIONS => &[None::<f64>, None, None],
            COL::PEOPLE_VACCINATED => &[None, Some(10.0), Some(2.0)],
            "population" => &[1i64, 2, 3]
        )
        .unwrap()
    }

    #[test]
    fn test_project_selects_required_columns_in_order() -> anyhow::Result<()> {
        let projected = project(&raw_df())?;
        let names: Vec<String> = projected
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, COL::REQUIRED);
        assert_eq!(projected.height(), 3);
        Ok(())
    }

    #[test]
    fn test_project_parses_dates_leniently() -> anyhow::Result<()> {
        let projected = project(&raw_df())?;
        let dates: Vec<Option<NaiveDate>> = projected
            .column(COL::DATE)?
            .date()?
            .as_date_iter()
            .collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2021, 1, 1),
                None,
                NaiveDate::from_ymd_opt(2021, 1, 3)
            ]
        );
        Ok(())
    }

    #[test]
    fn test_project_casts_counts_to_float() -> anyhow::Result<()> {
        let projected = project(&raw_df())?;
        for name in COL::COUNTS {
            assert_eq!(
                projected.column(name)?.dtype(),
                &DataType::Float64,
                "{name} should be cast to Float64"
            );
        }
        let total_cases: Vec<Option<f64>> =
            projected.column(COL::TOTAL_CASES)?.f64()?.into_iter().collect();
        assert_eq!(total_cases, vec![Some(100.0), None, Some(50.0)]);
        Ok(())
    }

    #[test]
    fn test_project_nulls_counts_that_do_not_cast() -> anyhow::Result<()> {
        let mut df = raw_df();
        df.with_column(Series::new(COL::TOTAL_CASES, &["1.5", "n/a", "3"]))?;
        assert_eq!(df.column(COL::TOTAL_CASES)?.dtype(), &DataType::String);

        let projected = project(&df)?;
        let total_cases: Vec<Option<f64>> =
            projected.column(COL::TOTAL_CASES)?.f64()?.into_iter().collect();
        assert_eq!(total_cases, vec![Some(1.5), None, Some(3.0)]);
        Ok(())
    }

    #[test]
    fn test_project_fails_on_missing_column() -> anyhow::Result<()> {
        let df = raw_df().drop(COL::NEW_DEATHS)?;
        let err = project(&df).unwrap_err();
        match err.downcast_ref::<CovidViewError>() {
            Some(CovidViewError::MissingColumn(name)) => assert_eq!(name, COL::NEW_DEATHS),
            other => panic!("Expected MissingColumn, got: {other:?}"),
        }
        Ok(())
    }
}
