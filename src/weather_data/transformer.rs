//! Cleans an [`ObservationTable`] and derives the accumulated series from it.

use crate::types::enriched::{EnrichedRow, EnrichedTable, DISPLAY_DATE_FORMAT};
use crate::types::observation::{
    ObservationTable, DATE_COLUMNS, DAY_COLUMN, MONTH_COLUMN, YEAR_COLUMN,
};
use crate::types::parameter::Parameter;
use crate::weather_data::error::FormatError;
use chrono::NaiveDate;
use log::info;
use polars::prelude::*;

/// Fills missing precipitation with `0.0`, accumulates it in row order and builds
/// `DD/MM/YYYY` dates from the `YEAR`, `MO` and `DY` columns.
///
/// Produces exactly one [`EnrichedRow`] per input row. The running sum is only
/// non-decreasing when every daily value is non-negative, which the source does not
/// promise.
///
/// # Errors
///
/// * [`FormatError::MissingColumn`] if the precipitation column is absent.
/// * [`FormatError::MissingDateColumns`] if any of `YEAR`, `MO`, `DY` is absent;
///   no table is produced in that case.
/// * [`FormatError::InvalidDate`] if a row's parts do not form a calendar date.
pub fn transform(table: &ObservationTable) -> Result<EnrichedTable, FormatError> {
    let parameter = Parameter::PRECIPITATION;
    let value_column = parameter.code();
    let cumulative_column = parameter.cumulative_column();

    if !table.has_column(value_column) {
        return Err(FormatError::MissingColumn(value_column.to_string()));
    }
    let missing: Vec<String> = DATE_COLUMNS
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(FormatError::MissingDateColumns { missing });
    }

    let frame = table
        .frame()
        .clone()
        .lazy()
        .with_column(col(value_column).fill_null(lit(0.0)).cast(DataType::Float64))
        .with_column(
            col(value_column)
                .cum_sum(false)
                .alias(cumulative_column.as_str()),
        )
        .select([
            col(YEAR_COLUMN).cast(DataType::Int32),
            col(MONTH_COLUMN).cast(DataType::UInt32),
            col(DAY_COLUMN).cast(DataType::UInt32),
            col(value_column),
            col(cumulative_column.as_str()),
        ])
        .collect()?;

    let years = frame.column(YEAR_COLUMN)?.i32()?;
    let months = frame.column(MONTH_COLUMN)?.u32()?;
    let days = frame.column(DAY_COLUMN)?.u32()?;
    let values = frame.column(value_column)?.f64()?;
    let cumulative = frame.column(cumulative_column.as_str())?.f64()?;

    let rows = years
        .into_iter()
        .zip(months)
        .zip(days)
        .zip(values)
        .zip(cumulative)
        .enumerate()
        .map(|(row, ((((year, month), day), value), total))| {
            let date = build_date(year, month, day).ok_or(FormatError::InvalidDate {
                row,
                year,
                month,
                day,
            })?;
            Ok(EnrichedRow {
                date,
                display_date: date.format(DISPLAY_DATE_FORMAT).to_string(),
                precipitation: value.unwrap_or(0.0),
                cumulative_precipitation: total.unwrap_or(0.0),
            })
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    info!("Accumulated {} over {} days", parameter, rows.len());
    Ok(EnrichedTable { parameter, rows })
}

/// Joins the parts as zero-padded `YEAR-MO-DY` and parses that as a calendar date.
fn build_date(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Option<NaiveDate> {
    let iso = format!("{}-{:02}-{:02}", year?, month?, day?);
    NaiveDate::parse_from_str(&iso, "%Y-%m-%d").ok()
}
