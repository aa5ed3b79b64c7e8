//! Turns a raw POWER response into an [`ObservationTable`].

use crate::types::observation::ObservationTable;
use crate::weather_data::error::FormatError;
use crate::weather_data::fetcher::RawResponse;
use log::debug;
use polars::prelude::*;
use std::io::Cursor;

/// Line that ends the metadata block of a POWER CSV response.
pub const HEADER_END_MARKER: &str = "-END HEADER-";

/// Value the source uses for "no observation", in any column.
pub const MISSING_SENTINEL: f64 = -999.0;

/// Returns the CSV body of a response: everything after the first header marker, trimmed.
pub fn split_body(raw: &RawResponse) -> Result<&str, FormatError> {
    let (_header, body) = raw
        .text
        .split_once(HEADER_END_MARKER)
        .ok_or(FormatError::MissingHeaderMarker {
            marker: HEADER_END_MARKER,
        })?;
    Ok(body.trim())
}

/// Parses a raw response into a table, with every `-999` replaced by null.
///
/// # Errors
///
/// * [`FormatError::MissingHeaderMarker`] if the text has no `-END HEADER-` line.
/// * [`FormatError::EmptyBody`] if nothing follows the marker.
/// * [`FormatError::CsvRead`] if the body is not valid CSV.
pub fn parse(raw: &RawResponse) -> Result<ObservationTable, FormatError> {
    let body = split_body(raw)?;
    if body.is_empty() {
        return Err(FormatError::EmptyBody);
    }

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(body.as_bytes().to_vec()))
        .finish()
        .map_err(FormatError::CsvRead)?;
    debug!(
        "Parsed CSV body: {} rows, columns {:?}",
        frame.height(),
        frame.get_column_names()
    );

    Ok(ObservationTable::new(replace_sentinels(frame)?))
}

/// Nulls out the missing-value sentinel in every numeric column.
fn replace_sentinels(frame: DataFrame) -> Result<DataFrame, FormatError> {
    let replacements: Vec<Expr> = frame
        .get_columns()
        .iter()
        .filter(|column| column.dtype().is_primitive_numeric())
        .map(|column| {
            let name = column.name().clone();
            when(col(name.clone()).eq(lit(MISSING_SENTINEL)))
                .then(lit(NULL))
                .otherwise(col(name.clone()))
                .alias(name)
        })
        .collect();

    if replacements.is_empty() {
        return Ok(frame);
    }
    Ok(frame.lazy().with_columns(replacements).collect()?)
}
