use crate::inputs::query::QueryParameters;
use crate::types::parameter::Parameter;
use crate::weather_data::error::NetworkError;
use crate::weather_data::source::{FetchConfig, HttpSource, RawSource};
use chrono::NaiveDate;
use log::{info, warn};
use ordered_float::OrderedFloat;
use std::collections::{hash_map::Entry, HashMap};
use std::sync::{Mutex, PoisonError};

/// The text body returned by the POWER API for one query, header block included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub text: String,
}

impl RawResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Everything a request depends on. Coordinates are wrapped so the key can be hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FetchKey {
    parameters: String,
    latitude: OrderedFloat<f64>,
    longitude: OrderedFloat<f64>,
    start: NaiveDate,
    end: NaiveDate,
}

impl FetchKey {
    fn from_query(query: &QueryParameters) -> Self {
        Self {
            parameters: Parameter::join_codes(&query.parameters),
            latitude: OrderedFloat(query.location.latitude()),
            longitude: OrderedFloat(query.location.longitude()),
            start: query.start,
            end: query.end,
        }
    }
}

/// Downloads raw POWER responses and memoizes them per query for the life of the fetcher.
///
/// The memo has no size bound and no expiry: a response is a pure function of its
/// query, and the fetcher is meant to live for one short user session.
pub struct PowerFetcher<S = HttpSource> {
    source: S,
    base_url: String,
    response_cache: Mutex<HashMap<FetchKey, RawResponse>>,
}

impl PowerFetcher<HttpSource> {
    pub fn new(config: &FetchConfig) -> Result<Self, NetworkError> {
        Ok(Self::with_source(HttpSource::new(config)?, &config.base_url))
    }
}

impl<S: RawSource> PowerFetcher<S> {
    pub fn with_source(source: S, base_url: &str) -> Self {
        Self {
            source,
            base_url: base_url.to_string(),
            response_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Builds the GET URL for a query. Dates are sent as `YYYYMMDD`.
    pub fn build_url(&self, query: &QueryParameters) -> String {
        format!(
            "{}?parameters={}&community=SB&longitude={}&latitude={}&start={}&end={}&format=CSV",
            self.base_url,
            Parameter::join_codes(&query.parameters),
            query.location.longitude(),
            query.location.latitude(),
            query.start.format("%Y%m%d"),
            query.end.format("%Y%m%d"),
        )
    }

    /// Returns the raw response for `query`, downloading it only on the first call.
    ///
    /// Failed requests are not cached, so calling again after a [`NetworkError`]
    /// issues a new request.
    pub fn fetch(&self, query: &QueryParameters) -> Result<RawResponse, NetworkError> {
        let key = FetchKey::from_query(query);

        {
            let cache = self
                .response_cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(&key) {
                info!(
                    "Cache hit for {} at ({}, {}) from {} to {}",
                    key.parameters, key.latitude, key.longitude, key.start, key.end
                );
                return Ok(cached.clone());
            }
        }

        warn!(
            "Cache miss for {} at ({}, {}) from {} to {}. Downloading.",
            key.parameters, key.latitude, key.longitude, key.start, key.end
        );
        let url = self.build_url(query);
        let response = RawResponse::new(self.source.get_text(&url)?);

        let mut cache = self
            .response_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match cache.entry(key) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(response.clone());
                Ok(response)
            }
        }
    }

    /// Number of distinct queries answered so far.
    pub fn cached_len(&self) -> usize {
        self.response_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
