use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use covidview::{chart::ChartKind, config::Config, CovidView};
use enum_dispatch::enum_dispatch;
use log::{debug, info};
use spinners::{Spinner, Spinners};
use strum::IntoEnumIterator;

use crate::display::{
    display_charts, display_columns, display_dataset_info, display_latest, display_null_counts,
};
use crate::error::CovidViewCliResult;

const DEFAULT_PROGRESS_SPINNER: Spinners = Spinners::Dots;
const COMPLETE_PROGRESS_STRING: &str = "✔";
const RUNNING_TAIL_STRING: &str = "...";
const LOADING_STRING: &str = "Loading dataset";

/// Trait that defines what to run when a given subcommand is invoked.
#[enum_dispatch]
pub trait RunCommand {
    fn run(&self, config: Config) -> CovidViewCliResult<()>;
}

fn load(config: Config, quiet: bool) -> CovidViewCliResult<CovidView> {
    let sp = (!quiet).then(|| {
        Spinner::with_timer(
            DEFAULT_PROGRESS_SPINNER,
            LOADING_STRING.to_string() + RUNNING_TAIL_STRING,
        )
    });
    let covidview = CovidView::new_with_config(config);
    if let Some(mut s) = sp {
        s.stop_with_symbol(COMPLETE_PROGRESS_STRING);
    }
    Ok(covidview?)
}

/// Renders every chart in order, writing each one to the chart directory before the next
/// is rendered.
fn write_charts(covidview: &CovidView) -> CovidViewCliResult<Vec<(ChartKind, PathBuf)>> {
    let chart_dir = &covidview.config.chart_dir;
    std::fs::create_dir_all(chart_dir).with_context(|| {
        format!("Failed to create chart directory: {}", chart_dir.display())
    })?;
    let mut written = vec![];
    for (idx, kind) in ChartKind::iter().enumerate() {
        let svg = covidview.render_chart(kind)?;
        let path = chart_dir.join(kind.file_name(idx));
        std::fs::write(&path, svg)
            .with_context(|| format!("Failed to write chart: {}", path.display()))?;
        info!("Wrote `{kind}` chart to {}", path.display());
        written.push((kind, path));
    }
    Ok(written)
}

fn print_info(covidview: &CovidView) {
    display_dataset_info(&covidview.dataset_info());
    display_null_counts(&covidview.null_counts());
    display_columns(&covidview.column_names());
}

fn print_latest(covidview: &CovidView) -> CovidViewCliResult<()> {
    let latest = covidview.latest()?;
    debug!("latest: {latest:?}");
    display_latest(&covidview.config.country, &latest);
    Ok(())
}

/// The `report` command renders all charts and then prints the full summary. This is what
/// runs when no subcommand is given.
#[derive(Args, Debug)]
pub struct ReportCommand {
    #[arg(from_global)]
    pub quiet: bool,
}

impl RunCommand for ReportCommand {
    fn run(&self, config: Config) -> CovidViewCliResult<()> {
        info!("Running `report` subcommand");
        let covidview = load(config, self.quiet)?;
        let charts = write_charts(&covidview)?;
        display_charts(&covidview.config.country, &charts);
        print_info(&covidview);
        print_latest(&covidview)
    }
}

/// The `charts` command only renders the charts.
#[derive(Args, Debug)]
pub struct ChartsCommand {
    #[arg(from_global)]
    quiet: bool,
}

impl RunCommand for ChartsCommand {
    fn run(&self, config: Config) -> CovidViewCliResult<()> {
        info!("Running `charts` subcommand");
        let covidview = load(config, self.quiet)?;
        let charts = write_charts(&covidview)?;
        display_charts(&covidview.config.country, &charts);
        Ok(())
    }
}

/// The `info` command describes the dataset as loaded, before any column selection.
#[derive(Args, Debug)]
pub struct InfoCommand {
    #[arg(from_global)]
    quiet: bool,
}

impl RunCommand for InfoCommand {
    fn run(&self, config: Config) -> CovidViewCliResult<()> {
        info!("Running `info` subcommand");
        let covidview = load(config, self.quiet)?;
        print_info(&covidview);
        Ok(())
    }
}

/// The `latest` command prints the most recent figures for the configured country.
#[derive(Args, Debug)]
pub struct LatestCommand {
    #[arg(from_global)]
    quiet: bool,
}

impl RunCommand for LatestCommand {
    fn run(&self, config: Config) -> CovidViewCliResult<()> {
        info!("Running `latest` subcommand");
        let covidview = load(config, self.quiet)?;
        print_latest(&covidview)
    }
}

/// The entrypoint for the CLI.
#[derive(Parser, Debug)]
#[command(version, about="Charts and summary figures of COVID-19 data for a single country", long_about = None, name="covidview")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[arg(
        short = 'q',
        long = "quiet",
        help = "\
            Do not print progress bar to stdout. Results and logs (when `RUST_LOG` is set)\n\
            will still be printed.",
        global = true
    )]
    pub quiet: bool,
}

/// Commands contains the list of subcommands avaliable for use in the CLI.
/// Each command should implmement the RunCommand trait and specify the list
/// of required args for that command.
#[derive(Subcommand, Debug)]
#[enum_dispatch(RunCommand)]
pub enum Commands {
    /// Render all charts, then print the dataset summary and latest figures
    Report(ReportCommand),
    /// Render the charts for the configured country
    Charts(ChartsCommand),
    /// Describe the columns of the dataset
    Info(InfoCommand),
    /// Print the latest figures for the configured country
    Latest(LatestCommand),
}
