//! Renders a pipeline outcome: diagnostics, the accumulated table, the total and a chart.
//!
//! Errors from any stage are written as messages; the views that depend on the
//! missing data are skipped.

#[cfg(feature = "chart")]
mod chart;

use crate::session::PipelineOutcome;
use crate::types::enriched::EnrichedTable;
use crate::weather_data::error::FormatError;
use log::{error, warn};
use polars::prelude::{Column, DataFrame, PolarsResult};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

pub const TITLE: &str = "Accumulated precipitation from NASA POWER satellite data";
pub const INSTRUCTIONS: &str =
    "Select a location and a date range to see the accumulated precipitation.";
pub const DATE_COLUMN: &str = "DATE";

/// Where the chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartTarget {
    /// Open the chart in the default browser.
    Browser,
    /// Write a standalone HTML file.
    Html(PathBuf),
    None,
}

#[derive(Debug, Clone)]
pub struct Presenter {
    pub chart: ChartTarget,
    /// How many raw rows the diagnostics section shows.
    pub preview_rows: usize,
}

impl Default for Presenter {
    fn default() -> Self {
        Self {
            chart: ChartTarget::Browser,
            preview_rows: 5,
        }
    }
}

impl Presenter {
    pub fn new(chart: ChartTarget) -> Self {
        Self {
            chart,
            ..Self::default()
        }
    }

    pub fn render_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", TITLE)?;
        writeln!(out, "{}", INSTRUCTIONS)?;
        writeln!(out)
    }

    /// Renders one outcome. Only I/O errors on `out` are returned.
    pub fn render<W: Write>(&self, out: &mut W, outcome: &PipelineOutcome) -> io::Result<()> {
        let run = match outcome {
            Ok(run) => run,
            Err(e) => return render_error(out, e),
        };

        writeln!(
            out,
            "Location ({}, {}), {} to {}",
            run.query.location.latitude(),
            run.query.location.longitude(),
            run.query.start,
            run.query.end
        )?;
        writeln!(out)?;

        writeln!(out, "Parsed frame structure:")?;
        writeln!(out, "{}", run.observations.head(self.preview_rows))?;
        writeln!(
            out,
            "Available columns: {}",
            run.observations.column_names().join(", ")
        )?;
        writeln!(out)?;

        let table = match &run.enriched {
            Ok(table) => table,
            Err(e) => return render_error(out, e),
        };

        let frame = match enriched_frame(table) {
            Ok(frame) => frame,
            Err(e) => return render_error(out, &FormatError::DataFrameProcessing(e)),
        };

        writeln!(out, "Data table")?;
        writeln!(out, "{}", frame)?;
        writeln!(out)?;
        render_summary(out, table)?;
        self.render_chart(out, &frame, table)
    }

    #[cfg(feature = "chart")]
    fn render_chart<W: Write>(
        &self,
        out: &mut W,
        frame: &DataFrame,
        table: &EnrichedTable,
    ) -> io::Result<()> {
        if table.is_empty() || self.chart == ChartTarget::None {
            return Ok(());
        }
        chart::render(frame, table.parameter, &self.chart);
        if let ChartTarget::Html(path) = &self.chart {
            writeln!(out, "Chart written to `{}`", path.display())?;
        }
        Ok(())
    }

    #[cfg(not(feature = "chart"))]
    fn render_chart<W: Write>(
        &self,
        _out: &mut W,
        _frame: &DataFrame,
        _table: &EnrichedTable,
    ) -> io::Result<()> {
        if self.chart != ChartTarget::None {
            warn!("Built without the `chart` feature, skipping chart");
        }
        Ok(())
    }
}

/// Writes the total line, or a notice when the range produced no rows.
pub fn render_summary<W: Write>(out: &mut W, table: &EnrichedTable) -> io::Result<()> {
    match table.total() {
        Some(total) => writeln!(
            out,
            "Total accumulated precipitation over the selected period: {:.2} {}",
            total,
            table.parameter.unit()
        ),
        None => {
            warn!("No observations in the selected period");
            writeln!(out, "No observations were returned for the selected period.")
        }
    }
}

/// Writes a user-facing message for `e` and each of its causes.
pub fn render_error<W: Write>(out: &mut W, e: &(dyn Error + 'static)) -> io::Result<()> {
    error!("{}", e);
    writeln!(out, "Error: {}", e)?;
    let mut source = e.source();
    while let Some(cause) = source {
        writeln!(out, "  caused by: {}", cause)?;
        source = cause.source();
    }
    Ok(())
}

/// The table view: display date, daily value and running total.
pub fn enriched_frame(table: &EnrichedTable) -> PolarsResult<DataFrame> {
    let dates: Vec<&str> = table
        .rows
        .iter()
        .map(|row| row.display_date.as_str())
        .collect();
    let values: Vec<f64> = table.rows.iter().map(|row| row.precipitation).collect();

    DataFrame::new(vec![
        Column::new(DATE_COLUMN.into(), dates),
        Column::new(table.parameter.code().into(), values),
        Column::new(
            table.parameter.cumulative_column().into(),
            table.cumulative(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::query::InputState;
    use crate::power_rain::PowerRain;
    use crate::weather_data::fetcher::tests::StubSource;
    use crate::weather_data::source::POWER_DAILY_POINT_URL;
    use chrono::NaiveDate;

    fn render_with(response: &str, inputs: InputState) -> Result<String, Box<dyn Error>> {
        let (source, _) = StubSource::new(response);
        let client = PowerRain::with_source(source, POWER_DAILY_POINT_URL);
        let outcome = client.run(inputs);

        let mut out = Vec::new();
        Presenter::new(ChartTarget::None).render(&mut out, &outcome)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_render_full_outcome() -> Result<(), Box<dyn Error>> {
        let text = render_with(
            "-END HEADER-\nYEAR,MO,DY,PRECTOTCORR\n2023,4,1,2.0\n2023,4,2,0.0\n2023,4,3,5.5\n",
            InputState::default(),
        )?;

        assert!(text.contains("Parsed frame structure:"));
        assert!(text.contains("Available columns: YEAR, MO, DY, PRECTOTCORR"));
        assert!(text.contains("01/04/2023"));
        assert!(text.contains("CUMULATIVE_PRECTOTCORR"));
        assert!(text.contains(
            "Total accumulated precipitation over the selected period: 7.50 mm"
        ));
        Ok(())
    }

    #[test]
    fn test_render_validation_error() -> Result<(), Box<dyn Error>> {
        let inputs = InputState {
            start: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            ..InputState::default()
        };
        let text = render_with("unused", inputs)?;

        assert!(text.starts_with("Error: The start date (2024-07-10) must not be after"));
        assert!(!text.contains("Total accumulated"));
        Ok(())
    }

    #[test]
    fn test_render_missing_date_columns_keeps_diagnostics() -> Result<(), Box<dyn Error>> {
        let text = render_with(
            "-END HEADER-\nYEAR,MO,PRECTOTCORR\n2023,4,2.0\n",
            InputState::default(),
        )?;

        assert!(text.contains("Available columns: YEAR, MO, PRECTOTCORR"));
        assert!(text.contains("Error: Cannot construct date: missing column(s) DY"));
        assert!(!text.contains("Data table"));
        Ok(())
    }

    #[test]
    fn test_render_summary_for_empty_table() -> Result<(), Box<dyn Error>> {
        let table = EnrichedTable {
            parameter: crate::Parameter::PRECIPITATION,
            rows: Vec::new(),
        };
        let mut out = Vec::new();
        render_summary(&mut out, &table)?;
        assert_eq!(
            String::from_utf8(out)?,
            "No observations were returned for the selected period.\n"
        );
        Ok(())
    }

    #[test]
    fn test_enriched_frame_columns() -> Result<(), Box<dyn Error>> {
        let table = EnrichedTable {
            parameter: crate::Parameter::PRECIPITATION,
            rows: vec![crate::EnrichedRow {
                date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
                display_date: "01/04/2023".to_string(),
                precipitation: 2.0,
                cumulative_precipitation: 2.0,
            }],
        };
        let frame = enriched_frame(&table)?;
        let names: Vec<String> = frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["DATE", "PRECTOTCORR", "CUMULATIVE_PRECTOTCORR"]);
        assert_eq!(frame.height(), 1);
        Ok(())
    }
}
