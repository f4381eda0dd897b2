//! Line charts of the country time series, rendered to SVG with plotters.
//!
//! Charts are drawn into an in-memory string so callers decide where they end up. Text is
//! laid out without loading system fonts.

use std::ops::Range;

use anyhow::Result;
use chrono::NaiveDate;
use nonempty::{nonempty, NonEmpty};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::DataFrame;
use strum_macros::{Display, EnumIter};

use crate::{error::CovidViewError, COL};

pub const DEFAULT_BLUE: RGBColor = RGBColor(31, 119, 180);
pub const ORANGE: RGBColor = RGBColor(255, 127, 14);

const FONT: &str = "sans-serif";

type DrawResult<T> = Result<T, DrawingAreaErrorKind<std::io::Error>>;

/// A plottable point
pub type Point = (NaiveDate, f64);

/// One line on a chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSpec {
    pub column: &'static str,
    /// Legend entry, only set on charts with more than one series
    pub label: Option<&'static str>,
    pub color: RGBColor,
}

impl SeriesSpec {
    const fn new(column: &'static str, color: RGBColor) -> Self {
        Self {
            column,
            label: None,
            color,
        }
    }

    const fn labelled(column: &'static str, label: &'static str, color: RGBColor) -> Self {
        Self {
            column,
            label: Some(label),
            color,
        }
    }
}

/// The charts produced for a country, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ChartKind {
    TotalCases,
    NewCases,
    VaccinationProgress,
    NewDeaths,
    CaseFatalityRate,
    VaccinationCoverage,
}

impl ChartKind {
    pub fn title(&self, country: &str) -> String {
        match self {
            Self::TotalCases => format!("Total COVID-19 Cases Over Time in {country}"),
            Self::NewCases => format!("Daily New COVID-19 Cases in {country}"),
            Self::VaccinationProgress => format!("COVID-19 Vaccination Progress in {country}"),
            Self::NewDeaths => format!("Daily New COVID-19 Deaths in {country}"),
            Self::CaseFatalityRate => format!("Case Fatality Rate (%) Over Time in {country}"),
            Self::VaccinationCoverage => format!("COVID-19 Vaccination Coverage (%) in {country}"),
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            Self::TotalCases => "Total Cases",
            Self::NewCases => "New Cases",
            Self::VaccinationProgress => "People Vaccinated",
            Self::NewDeaths => "New Deaths",
            Self::CaseFatalityRate => "Fatality Rate (%)",
            Self::VaccinationCoverage => "Coverage (%)",
        }
    }

    pub fn series(&self) -> NonEmpty<SeriesSpec> {
        match self {
            Self::TotalCases => nonempty![SeriesSpec::new(COL::TOTAL_CASES, DEFAULT_BLUE)],
            Self::NewCases => nonempty![SeriesSpec::new(COL::NEW_CASES, ORANGE)],
            Self::VaccinationProgress => nonempty![
                SeriesSpec::labelled(COL::PEOPLE_VACCINATED, "People Vaccinated", DEFAULT_BLUE),
                SeriesSpec::labelled(COL::PEOPLE_FULLY_VACCINATED, "Fully Vaccinated", ORANGE)
            ],
            Self::NewDeaths => nonempty![SeriesSpec::new(COL::NEW_DEATHS, BLACK)],
            Self::CaseFatalityRate => nonempty![SeriesSpec::new(COL::CASE_FATALITY_RATE, RED)],
            Self::VaccinationCoverage => nonempty![
                SeriesSpec::labelled(COL::VACCINATED_PCT, "At least one dose", DEFAULT_BLUE),
                SeriesSpec::labelled(COL::FULLY_VACCINATED_PCT, "Fully vaccinated", ORANGE)
            ],
        }
    }

    /// File name for the chart at position `index` (0-based) of the display order
    pub fn file_name(&self, index: usize) -> String {
        format!("{}_{self}.svg", index + 1)
    }
}

/// Splits the values of `column` against `date` into runs of plottable points, sorted by
/// date. Rows with a null date are skipped; null or non-finite values end a run.
pub fn series_segments(df: &DataFrame, column: &str) -> Result<Vec<Vec<Point>>> {
    let dates = df.column(COL::DATE)?.date()?;
    let values = df.column(column)?.f64()?;
    let mut points: Vec<(NaiveDate, Option<f64>)> = dates
        .as_date_iter()
        .zip(values)
        .filter_map(|(date, value)| date.map(|date| (date, value.filter(|v| v.is_finite()))))
        .collect();
    points.sort_by_key(|(date, _)| *date);

    let mut segments = vec![];
    let mut current = vec![];
    for (date, value) in points {
        match value {
            Some(value) => current.push((date, value)),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    Ok(segments)
}

/// Axis ranges covering every point, or `None` when there is nothing to plot.
fn bounds<'a, I>(points: I) -> Option<(Range<NaiveDate>, Range<f64>)>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut points = points.into_iter();
    let &(first_date, first_value) = points.next()?;
    let (mut start, mut end, mut low, mut high) = (first_date, first_date, first_value, first_value);
    for &(date, value) in points {
        start = start.min(date);
        end = end.max(date);
        low = low.min(value);
        high = high.max(value);
    }
    if end == start {
        end = end.succ_opt().unwrap_or(end);
    }
    let pad = if high > low {
        (high - low) * 0.05
    } else {
        (high.abs() * 0.05).max(1.0)
    };
    Some((start..end, (low - pad)..(high + pad)))
}

/// Compact tick label: `1.5M`, `230K`, `12.5`.
pub fn format_tick(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    let (scaled, suffix) = if magnitude >= 1e9 {
        (value / 1e9, "B")
    } else if magnitude >= 1e6 {
        (value / 1e6, "M")
    } else if magnitude >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    let formatted = format!("{scaled:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    // normalize `-0`
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    format!("{trimmed}{suffix}")
}

fn draw_chart(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    title: &str,
    y_label: &str,
    series: &[(SeriesSpec, Vec<Vec<Point>>)],
) -> DrawResult<()> {
    root.fill(&WHITE)?;

    let Some((x_range, y_range)) = bounds(
        series
            .iter()
            .flat_map(|(_, segments)| segments.iter().flatten()),
    ) else {
        let (width, height) = root.dim_in_pixel();
        root.draw(&Text::new(
            format!("{title}: no data"),
            (width as i32 / 4, height as i32 / 2),
            (FONT, 20).into_font().color(&BLACK),
        ))?;
        root.present()?;
        return Ok(());
    };

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 22))
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(y_label)
        .x_labels(12)
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .x_label_formatter(&|date| date.format("%Y-%m-%d").to_string())
        .y_label_formatter(&|value| format_tick(*value))
        .draw()?;

    for (spec, segments) in series {
        let color = spec.color;
        for (idx, segment) in segments.iter().enumerate() {
            let annotation =
                chart.draw_series(LineSeries::new(segment.iter().copied(), color.stroke_width(2)))?;
            // One legend entry per series, not per segment
            if let (0, Some(label)) = (idx, spec.label) {
                annotation
                    .label(label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
        }
    }

    if series.iter().any(|(spec, _)| spec.label.is_some()) {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Renders `kind` for the rows of `df` as an SVG document of `size` pixels. An empty frame
/// renders a placeholder rather than failing.
pub fn render_svg(
    kind: ChartKind,
    df: &DataFrame,
    country: &str,
    size: (u32, u32),
) -> Result<String> {
    let series = kind
        .series()
        .into_iter()
        .map(|spec| Ok((spec, series_segments(df, spec.column)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_chart(&root, &kind.title(country), kind.y_label(), &series)
            .map_err(|e| CovidViewError::Chart(e.to_string()))?;
    }
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use polars::df;
    use strum::IntoEnumIterator;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 5, day).unwrap()
    }

    fn test_df() -> DataFrame {
        df!(
            COL::DATE => &[Some(date(3)), Some(date(1)), None, Some(date(2)), Some(date(4)), Some(date(5))],
            COL::TOTAL_CASES => &[Some(30.0), Some(10.0), Some(99.0), None, Some(f64::NAN), Some(50.0)],
            COL::NEW_CASES => &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0)]
        )
        .unwrap()
    }

    #[test]
    fn test_chart_order_and_files() {
        let names: Vec<String> = ChartKind::iter()
            .enumerate()
            .map(|(idx, kind)| kind.file_name(idx))
            .collect();
        assert_eq!(
            names,
            [
                "1_total_cases.svg",
                "2_new_cases.svg",
                "3_vaccination_progress.svg",
                "4_new_deaths.svg",
                "5_case_fatality_rate.svg",
                "6_vaccination_coverage.svg",
            ]
        );
    }

    #[test]
    fn test_two_series_charts_have_legends() {
        for kind in ChartKind::iter() {
            let series = kind.series();
            let labelled = series.iter().filter(|spec| spec.label.is_some()).count();
            match kind {
                ChartKind::VaccinationProgress | ChartKind::VaccinationCoverage => {
                    assert_eq!((series.len(), labelled), (2, 2), "{kind}")
                }
                _ => assert_eq!((series.len(), labelled), (1, 0), "{kind}"),
            }
        }
        assert_eq!(ChartKind::NewCases.series().head.color, ORANGE);
        assert_eq!(ChartKind::CaseFatalityRate.series().head.color, RED);
    }

    #[test]
    fn test_series_segments_sorted_with_gaps() -> anyhow::Result<()> {
        let segments = series_segments(&test_df(), COL::TOTAL_CASES)?;
        assert_eq!(
            segments,
            vec![
                vec![(date(1), 10.0)],
                vec![(date(3), 30.0)],
                vec![(date(5), 50.0)],
            ]
        );
        let segments = series_segments(&test_df(), COL::NEW_CASES)?;
        assert_eq!(
            segments,
            vec![vec![
                (date(1), 2.0),
                (date(2), 4.0),
                (date(3), 1.0),
                (date(4), 5.0),
                (date(5), 6.0),
            ]]
        );
        Ok(())
    }

    #[test]
    fn test_bounds() {
        let points = [(date(2), 5.0), (date(1), 15.0)];
        let (x, y) = bounds(&points).unwrap();
        assert_eq!(x, date(1)..date(2));
        assert_eq!(y, 4.5..15.5);

        let single = [(date(2), 0.0)];
        let (x, y) = bounds(&single).unwrap();
        assert_eq!(x, date(2)..date(3));
        assert_eq!(y, -1.0..1.0);

        assert!(bounds(std::iter::empty()).is_none());
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(12.5), "12.5");
        assert_eq!(format_tick(230_000.0), "230K");
        assert_eq!(format_tick(1_500_000.0), "1.5M");
        assert_eq!(format_tick(1_400_000_000.0), "1.4B");
        assert_eq!(format_tick(-0.001), "0");
    }

    #[test]
    fn test_render_svg() -> anyhow::Result<()> {
        let svg = render_svg(ChartKind::TotalCases, &test_df(), "India", (800, 400))?;
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Total COVID-19 Cases Over Time in India"));
        assert!(svg.contains("Total Cases"));
        Ok(())
    }

    #[test]
    fn test_render_svg_empty_placeholder() -> anyhow::Result<()> {
        let empty = test_df().head(Some(0));
        let svg = render_svg(ChartKind::NewCases, &empty, "Atlantis", (800, 400))?;
        assert!(svg.contains("Daily New COVID-19 Cases in Atlantis: no data"));
        Ok(())
    }

    #[test]
    fn test_render_svg_missing_column_fails() {
        assert!(render_svg(ChartKind::NewDeaths, &test_df(), "India", (800, 400)).is_err());
    }
}
