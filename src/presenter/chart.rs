use crate::presenter::{ChartTarget, DATE_COLUMN};
use crate::types::parameter::Parameter;
use log::info;
use plotlars::{Line, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::DataFrame;

const CHART_TITLE: &str = "Accumulated precipitation over time";

/// Plots the running total against the display date.
pub(crate) fn render(frame: &DataFrame, parameter: Parameter, target: &ChartTarget) {
    let cumulative_column = parameter.cumulative_column();
    let y_title = format!("Accumulated precipitation ({})", parameter.unit());

    let plot = TimeSeriesPlot::builder()
        .data(frame)
        .x(DATE_COLUMN)
        .y(cumulative_column.as_str())
        .colors(vec![Rgb(69, 157, 230)])
        .lines(vec![Line::Solid])
        .plot_title(Text::from(CHART_TITLE).font("Arial").size(18))
        .x_title("Date")
        .y_title(Text::from(y_title.as_str()))
        .build();

    match target {
        ChartTarget::Browser => {
            info!("Opening chart in browser");
            plot.plot();
        }
        ChartTarget::Html(path) => {
            info!("Writing chart to {}", path.display());
            plot.write_html(path.to_string_lossy().to_string());
        }
        ChartTarget::None => {}
    }
}
