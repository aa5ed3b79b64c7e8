//! Command line interface.

pub mod interactive;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use power_rain::{ChartTarget, FetchConfig, InputState, LatLon, POWER_DAILY_POINT_URL};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Accumulated daily precipitation for a point, from NASA POWER
pub struct Cli {
    /// Latitude in degrees, clamped to [-90, 90]
    #[arg(long, default_value_t = InputState::DEFAULT_LATITUDE, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude in degrees, clamped to [-180, 180]
    #[arg(long, default_value_t = InputState::DEFAULT_LONGITUDE, allow_negative_numbers = true)]
    pub longitude: f64,

    /// First day of the range (YYYY-MM-DD)
    #[arg(long, default_value_t = InputState::default_start())]
    pub start: NaiveDate,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long, default_value_t = InputState::default_end())]
    pub end: NaiveDate,

    /// Where to render the chart
    #[arg(long, value_enum, default_value_t = ChartMode::Browser)]
    pub chart: ChartMode,

    /// Output file for `--chart html`
    #[arg(long, default_value = "accumulated_precipitation.html")]
    pub chart_path: PathBuf,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// POWER daily point endpoint
    #[arg(long, default_value = POWER_DAILY_POINT_URL)]
    pub base_url: String,

    /// Print every row of the table
    #[arg(long)]
    pub full_table: bool,

    /// Prompt for the inputs and re-render after each change
    #[arg(long)]
    pub interactive: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartMode {
    /// Open the chart in the default browser
    Browser,
    /// Write the chart to `--chart-path`
    Html,
    /// Do not draw a chart
    #[value(name = "none")]
    Skip,
}

impl Cli {
    pub fn input_state(&self) -> InputState {
        InputState {
            location: LatLon(self.latitude, self.longitude),
            start: self.start,
            end: self.end,
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..FetchConfig::default()
        }
    }

    pub fn chart_target(&self) -> ChartTarget {
        match self.chart {
            ChartMode::Browser => ChartTarget::Browser,
            ChartMode::Html => ChartTarget::Html(self.chart_path.clone()),
            ChartMode::Skip => ChartTarget::None,
        }
    }
}
