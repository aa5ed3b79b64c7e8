//! The main entry point: one client that runs a whole precipitation query.
//!
//! [`PowerRain`] owns the memoizing fetcher and chains collect → fetch → parse →
//! transform. The returned [`PipelineRun`] carries both the parsed table and the
//! transform result, so a presenter can still show the raw data when the
//! transform fails.

use crate::error::PowerRainError;
use crate::inputs::query::{collect_inputs, InputState, LatLon, QueryParameters};
use crate::types::enriched::EnrichedTable;
use crate::types::observation::ObservationTable;
use crate::weather_data::error::FormatError;
use crate::weather_data::fetcher::PowerFetcher;
use crate::weather_data::parser::parse;
use crate::weather_data::source::{FetchConfig, HttpSource, RawSource};
use crate::weather_data::transformer::transform;
use bon::bon;
use chrono::NaiveDate;
use log::info;

/// Everything one pass of the pipeline produced.
#[derive(Debug)]
pub struct PipelineRun {
    pub query: QueryParameters,
    /// The parsed response, before cleaning.
    pub observations: ObservationTable,
    /// The accumulated series, or why it could not be built from `observations`.
    pub enriched: Result<EnrichedTable, FormatError>,
}

/// The client for accumulated NASA POWER precipitation.
///
/// Responses are memoized per query for as long as the client lives, so re-running
/// an earlier query does not touch the network again.
///
/// # Examples
///
/// ```no_run
/// # use power_rain::{PowerRain, PowerRainError, LatLon};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), PowerRainError> {
/// let client = PowerRain::new()?;
/// let run = client
///     .accumulated()
///     .location(LatLon(-22.805694, -50.481333))
///     .start(NaiveDate::from_ymd_opt(2023, 4, 1).unwrap())
///     .end(NaiveDate::from_ymd_opt(2024, 7, 9).unwrap())
///     .call()?;
///
/// let table = run.enriched?;
/// println!("Total: {:.2} mm", table.total().unwrap_or(0.0));
/// # Ok(())
/// # }
/// ```
pub struct PowerRain<S = HttpSource> {
    fetcher: PowerFetcher<S>,
}

impl PowerRain<HttpSource> {
    /// Creates a client talking to the public POWER endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`PowerRainError::Network`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, PowerRainError> {
        Self::with_config(&FetchConfig::default())
    }

    /// Creates a client with a custom endpoint, timeout or user agent.
    pub fn with_config(config: &FetchConfig) -> Result<Self, PowerRainError> {
        Ok(Self {
            fetcher: PowerFetcher::new(config)?,
        })
    }
}

#[bon]
impl<S: RawSource> PowerRain<S> {
    /// Creates a client on top of any [`RawSource`].
    pub fn with_source(source: S, base_url: &str) -> Self {
        Self {
            fetcher: PowerFetcher::with_source(source, base_url),
        }
    }

    pub fn fetcher(&self) -> &PowerFetcher<S> {
        &self.fetcher
    }

    /// Fetches and accumulates precipitation at `location` from `start` to `end`, inclusive.
    ///
    /// Builder entry point; finish with `.call()`.
    ///
    /// # Errors
    ///
    /// * [`PowerRainError::Validation`] if `start` is after `end`; nothing is fetched.
    /// * [`PowerRainError::Network`] if the request fails or returns a non-success status.
    /// * [`PowerRainError::Format`] if the response has no header marker or no parsable body.
    ///
    /// Transform failures are reported in [`PipelineRun::enriched`] instead.
    #[builder]
    pub fn accumulated(
        &self,
        location: LatLon,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PipelineRun, PowerRainError> {
        self.run(InputState {
            location,
            start,
            end,
        })
    }

    /// Runs the whole pipeline for one input state.
    pub fn run(&self, state: InputState) -> Result<PipelineRun, PowerRainError> {
        let query = collect_inputs(state)?;
        let raw = self.fetcher.fetch(&query)?;
        let observations = parse(&raw)?;
        info!(
            "Parsed {} rows with columns {:?}",
            observations.height(),
            observations.column_names()
        );
        let enriched = transform(&observations);

        Ok(PipelineRun {
            query,
            observations,
            enriched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather_data::fetcher::tests::StubSource;
    use crate::weather_data::source::POWER_DAILY_POINT_URL;
    use crate::ValidationError;
    use std::sync::atomic::Ordering;

    const RESPONSE: &str = "-BEGIN HEADER-\nNASA/POWER\n-END HEADER-\n\
                            YEAR,MO,DY,PRECTOTCORR\n2023,4,1,2.0\n2023,4,2,0.0\n2023,4,3,5.5\n";

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_accumulated_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
        let (source, calls) = StubSource::new(RESPONSE);
        let client = PowerRain::with_source(source, POWER_DAILY_POINT_URL);

        let run = client
            .accumulated()
            .location(LatLon(-22.805694, -50.481333))
            .start(date(2023, 4, 1))
            .end(date(2023, 4, 3))
            .call()?;

        assert_eq!(run.observations.height(), 3);
        let table = run.enriched?;
        assert_eq!(table.cumulative(), vec![2.0, 2.0, 7.5]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn test_validation_error_skips_fetch() {
        let (source, calls) = StubSource::new(RESPONSE);
        let client = PowerRain::with_source(source, POWER_DAILY_POINT_URL);

        let result = client
            .accumulated()
            .location(LatLon(0.0, 0.0))
            .start(date(2023, 4, 2))
            .end(date(2023, 4, 1))
            .call();

        assert!(matches!(
            result,
            Err(PowerRainError::Validation(ValidationError::StartAfterEnd { .. }))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_marker_fails_before_transform() {
        let (source, _) = StubSource::new("YEAR,MO,DY,PRECTOTCORR\n2023,4,1,2.0\n");
        let client = PowerRain::with_source(source, POWER_DAILY_POINT_URL);

        let result = client.run(InputState::default());
        assert!(matches!(
            result,
            Err(PowerRainError::Format(FormatError::MissingHeaderMarker { .. }))
        ));
    }

    #[test]
    fn test_transform_failure_keeps_observations() -> Result<(), Box<dyn std::error::Error>> {
        let (source, _) = StubSource::new("-END HEADER-\nYEAR,MO,PRECTOTCORR\n2023,4,2.0\n");
        let client = PowerRain::with_source(source, POWER_DAILY_POINT_URL);

        let run = client.run(InputState::default())?;
        assert_eq!(run.observations.column_names(), vec!["YEAR", "MO", "PRECTOTCORR"]);
        assert!(matches!(
            run.enriched,
            Err(FormatError::MissingDateColumns { .. })
        ));
        Ok(())
    }

    #[test]
    #[ignore = "requires network access to power.larc.nasa.gov"]
    fn test_live_power_request() -> Result<(), Box<dyn std::error::Error>> {
        let client = PowerRain::new()?;
        let run = client
            .accumulated()
            .location(LatLon(-22.805694, -50.481333))
            .start(date(2023, 4, 1))
            .end(date(2023, 4, 10))
            .call()?;

        let table = run.enriched?;
        assert_eq!(table.len(), 10);
        assert_eq!(table.rows[0].display_date, "01/04/2023");
        Ok(())
    }
}
