//! Collects and validates the inputs of a precipitation query.
//!
//! [`InputState`] mirrors what the user currently has typed in; [`collect_inputs`]
//! turns it into [`QueryParameters`] or rejects it before anything is fetched.

use crate::inputs::error::ValidationError;
use crate::types::parameter::Parameter;
use chrono::NaiveDate;
use log::warn;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use power_rain::LatLon;
///
/// let presidente_prudente = LatLon(-22.12, -51.39);
/// assert_eq!(presidente_prudente.0, -22.12); // Latitude
/// assert_eq!(presidente_prudente.1, -51.39); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
    pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Returns the coordinate with both components clamped into their valid ranges.
    ///
    /// ```
    /// use power_rain::LatLon;
    ///
    /// assert_eq!(LatLon(95.0, -200.0).clamped(), LatLon(90.0, -180.0));
    /// ```
    pub fn clamped(self) -> LatLon {
        LatLon(
            self.0.clamp(Self::LATITUDE_RANGE.0, Self::LATITUDE_RANGE.1),
            self.1.clamp(Self::LONGITUDE_RANGE.0, Self::LONGITUDE_RANGE.1),
        )
    }
}

/// The raw values held by the input surface, before validation.
///
/// `Default` gives the values the application starts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    pub location: LatLon,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl InputState {
    pub const DEFAULT_LATITUDE: f64 = -22.805694;
    pub const DEFAULT_LONGITUDE: f64 = -50.481333;

    pub fn default_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 1).unwrap_or_default()
    }

    pub fn default_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 9).unwrap_or_default()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            location: LatLon(Self::DEFAULT_LATITUDE, Self::DEFAULT_LONGITUDE),
            start: Self::default_start(),
            end: Self::default_end(),
        }
    }
}

/// A validated query: everything the fetcher needs to build one request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameters {
    pub parameters: Vec<Parameter>,
    pub location: LatLon,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Validates the current input state and produces the query for it.
///
/// Coordinates outside their ranges are clamped, like a bounded numeric field
/// would do. The date range is inclusive, so `start == end` is a valid one-day query.
///
/// # Errors
///
/// Returns [`ValidationError::StartAfterEnd`] if `start` is after `end`.
///
/// # Examples
///
/// ```
/// use power_rain::{collect_inputs, InputState, ValidationError};
/// use chrono::NaiveDate;
///
/// let mut state = InputState::default();
/// state.end = NaiveDate::from_ymd_opt(2023, 3, 31).unwrap();
/// assert!(matches!(
///     collect_inputs(state),
///     Err(ValidationError::StartAfterEnd { .. })
/// ));
/// ```
pub fn collect_inputs(state: InputState) -> Result<QueryParameters, ValidationError> {
    let location = state.location.clamped();
    if location != state.location {
        warn!(
            "Clamped coordinate ({}, {}) to ({}, {})",
            state.location.0, state.location.1, location.0, location.1
        );
    }

    if state.start > state.end {
        return Err(ValidationError::StartAfterEnd {
            start: state.start,
            end: state.end,
        });
    }

    Ok(QueryParameters {
        parameters: vec![Parameter::PRECIPITATION],
        location,
        start: state.start,
        end: state.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_default_state() {
        let state = InputState::default();
        assert_eq!(state.location, LatLon(-22.805694, -50.481333));
        assert_eq!(state.start, date(2023, 4, 1));
        assert_eq!(state.end, date(2024, 7, 9));
    }

    #[test]
    fn test_same_day_is_accepted() -> Result<(), Box<dyn std::error::Error>> {
        let state = InputState {
            start: date(2024, 1, 15),
            end: date(2024, 1, 15),
            ..InputState::default()
        };
        let query = collect_inputs(state)?;
        assert_eq!(query.start, query.end);
        assert_eq!(query.parameters, vec![Parameter::CorrectedPrecipitation]);
        Ok(())
    }

    #[test]
    fn test_start_one_day_after_end_is_rejected() {
        let state = InputState {
            start: date(2024, 1, 16),
            end: date(2024, 1, 15),
            ..InputState::default()
        };
        assert_eq!(
            collect_inputs(state),
            Err(ValidationError::StartAfterEnd {
                start: date(2024, 1, 16),
                end: date(2024, 1, 15),
            })
        );
    }

    #[test]
    fn test_out_of_range_coordinates_are_clamped() -> Result<(), Box<dyn std::error::Error>> {
        let state = InputState {
            location: LatLon(-123.0, 181.5),
            ..InputState::default()
        };
        let query = collect_inputs(state)?;
        assert_eq!(query.location, LatLon(-90.0, 180.0));
        Ok(())
    }
}
