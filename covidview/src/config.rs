use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// CSV in the Our World in Data layout
    pub data_path: PathBuf,
    /// Exact `location` value to report on
    pub country: String,
    /// Denominator for the vaccination coverage columns. Not read from the dataset, so it
    /// must be kept in step with `country` by hand.
    pub population: u64,
    pub chart_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: "data/covid-data.csv".into(),
            country: "India".into(),
            population: 1_400_000_000,
            chart_dir: "charts".into(),
            chart_width: 1200,
            chart_height: 600,
        }
    }
}

impl Config {
    pub fn chart_size(&self) -> (u32, u32) {
        (self.chart_width, self.chart_height)
    }
}
