use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {0}")]
    BodyRead(String, #[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Response does not contain the '{marker}' header marker")]
    MissingHeaderMarker { marker: &'static str },

    #[error("Response contains no tabular data after the header block")]
    EmptyBody,

    #[error("Failed to parse CSV body")]
    CsvRead(#[source] PolarsError),

    #[error("Required column '{0}' not found in response")]
    MissingColumn(String),

    #[error("Cannot construct date: missing column(s) {}", .missing.join(", "))]
    MissingDateColumns { missing: Vec<String> },

    #[error("Cannot construct date for row {row}: {year:?}-{month:?}-{day:?}")]
    InvalidDate {
        row: usize,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
