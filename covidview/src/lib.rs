use anyhow::Result;
use chart::ChartKind;
use log::debug;
use polars::frame::DataFrame;
use summary::{DatasetInfo, LatestStats};

use crate::config::Config;

// Re-exports
pub use column_names as COL;

// Modules
pub mod chart;
pub mod column_names;
pub mod config;
pub mod derive;
pub mod error;
pub mod filter;
pub mod load;
pub mod project;
pub mod summary;

/// Number of columns listed by `CovidView::null_counts`
pub const NULL_COUNTS_TOP: usize = 10;

/// The loaded dataset and the analysis-ready rows for the configured country
pub struct CovidView {
    pub config: Config,
    /// The dataset as read, before projection
    pub raw: DataFrame,
    /// Projected, filtered to `config.country` and with the derived columns appended
    pub country_data: DataFrame,
}

impl CovidView {
    /// Load the dataset with default configuration
    pub fn new() -> Result<Self> {
        Self::new_with_config(Config::default())
    }

    /// Load the dataset at `config.data_path` and prepare the country rows
    pub fn new_with_config(config: Config) -> Result<Self> {
        debug!("config: {config:?}");
        let raw = load::load_csv(&config.data_path)?;
        Self::from_df(config, raw)
    }

    /// Prepare the country rows from an already loaded dataset
    pub fn from_df(config: Config, raw: DataFrame) -> Result<Self> {
        let projected = project::project(&raw)?;
        let filtered = filter::filter_country(&projected, &config.country)?;
        let country_data = derive::derive(filtered, config.population)?;
        debug!("country_data: {country_data:#?}");
        Ok(Self {
            config,
            raw,
            country_data,
        })
    }

    /// Render one chart of the country rows as an SVG document
    pub fn render_chart(&self, kind: ChartKind) -> Result<String> {
        chart::render_svg(
            kind,
            &self.country_data,
            &self.config.country,
            self.config.chart_size(),
        )
    }

    pub fn dataset_info(&self) -> DatasetInfo {
        DatasetInfo::from_df(&self.raw)
    }

    pub fn null_counts(&self) -> Vec<(String, usize)> {
        summary::null_counts(&self.raw, NULL_COUNTS_TOP)
    }

    pub fn column_names(&self) -> Vec<String> {
        summary::column_names(&self.raw)
    }

    pub fn latest(&self) -> Result<LatestStats> {
        summary::latest(&self.country_data, &self.config.country)
    }
}
