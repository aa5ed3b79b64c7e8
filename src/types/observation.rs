use polars::prelude::DataFrame;

pub const YEAR_COLUMN: &str = "YEAR";
pub const MONTH_COLUMN: &str = "MO";
pub const DAY_COLUMN: &str = "DY";

/// Columns a calendar date is built from, in `YEAR-MO-DY` order.
pub const DATE_COLUMNS: [&str; 3] = [YEAR_COLUMN, MONTH_COLUMN, DAY_COLUMN];

/// The parsed CSV body of a response, one row per day in source order.
///
/// Sentinel values have already been replaced by nulls. The frame keeps every column
/// the source returned, so it can be shown as-is for diagnostics.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    frame: DataFrame,
}

impl ObservationTable {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.get_column_index(name).is_some()
    }

    /// The first `n` rows, untouched.
    pub fn head(&self, n: usize) -> DataFrame {
        self.frame.head(Some(n))
    }
}
