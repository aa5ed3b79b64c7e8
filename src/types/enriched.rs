use crate::types::parameter::Parameter;
use chrono::NaiveDate;

/// Format of [`EnrichedRow::display_date`]: `DD/MM/YYYY`.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// One day of the accumulated series.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRow {
    pub date: NaiveDate,
    pub display_date: String,
    /// Daily value, with missing observations counted as `0.0`.
    pub precipitation: f64,
    /// Sum of `precipitation` over this row and every row before it.
    pub cumulative_precipitation: f64,
}

/// The observation table after cleaning, accumulation and date derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTable {
    pub parameter: Parameter,
    pub rows: Vec<EnrichedRow>,
}

impl EnrichedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Accumulated value at the end of the range, `None` when no day was returned.
    pub fn total(&self) -> Option<f64> {
        self.rows.last().map(|row| row.cumulative_precipitation)
    }

    pub fn cumulative(&self) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row.cumulative_precipitation)
            .collect()
    }
}
