//! The transport behind the fetcher: something that turns a URL into response text.

use crate::weather_data::error::NetworkError;
use log::{info, warn};
use reqwest::blocking::Client;
use std::time::Duration;

/// Base URL of the NASA POWER daily point endpoint.
pub const POWER_DAILY_POINT_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

/// Settings for the HTTP transport.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Endpoint queried by [`crate::PowerFetcher`]; overridable for mirrors.
    pub base_url: String,
    /// Upper bound on a whole request, connect through body.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: POWER_DAILY_POINT_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Performs one blocking GET and returns the body as text.
///
/// Implemented by [`HttpSource`] for real requests. The fetcher only depends on
/// this trait, so anything that can answer a URL can stand in for the network.
pub trait RawSource {
    fn get_text(&self, url: &str) -> Result<String, NetworkError>;
}

/// [`RawSource`] backed by a blocking `reqwest` client.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(NetworkError::ClientBuild)?;
        Ok(Self { client })
    }
}

impl RawSource for HttpSource {
    fn get_text(&self, url: &str) -> Result<String, NetworkError> {
        info!("Downloading data from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| NetworkError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    NetworkError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    NetworkError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let text = response
            .text()
            .map_err(|e| NetworkError::BodyRead(url.to_string(), e))?;
        info!("Downloaded {} bytes from {}", text.len(), url);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.base_url, POWER_DAILY_POINT_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("power_rain/"));
    }

    #[test]
    fn test_http_source_builds() -> Result<(), Box<dyn std::error::Error>> {
        let _source = HttpSource::new(&FetchConfig::default())?;
        Ok(())
    }

    #[test]
    fn test_unreachable_host_is_a_network_error() -> Result<(), Box<dyn std::error::Error>> {
        let config = FetchConfig {
            timeout: Duration::from_secs(2),
            ..FetchConfig::default()
        };
        let source = HttpSource::new(&config)?;
        // Port 9 on localhost is the discard port; nothing listens there in CI.
        let result = source.get_text("http://127.0.0.1:9/api/temporal/daily/point");
        assert!(matches!(result, Err(NetworkError::NetworkRequest(..))));
        Ok(())
    }

    #[test]
    fn test_server_error_status_is_a_network_error() -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let url = format!("http://{}/api/temporal/daily/point", listener.local_addr()?);

        // Answers exactly one request with 503.
        let server = thread::spawn(move || -> std::io::Result<()> {
            let (mut stream, _) = listener.accept()?;
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request)?;
            stream.write_all(
                b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            )?;
            stream.flush()
        });

        let source = HttpSource::new(&FetchConfig {
            timeout: Duration::from_secs(5),
            ..FetchConfig::default()
        })?;
        let result = source.get_text(&url);
        server.join().map_err(|_| "server thread panicked")??;

        match result {
            Err(NetworkError::HttpStatus { status, url: failed, .. }) => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(failed, url);
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
        Ok(())
    }
}
