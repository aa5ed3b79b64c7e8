use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("The start date ({start}) must not be after the end date ({end})")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}
