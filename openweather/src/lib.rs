//! Driver for the OpenWeather current-weather and air-pollution APIs.
//!
//! Two endpoints are used:
//!
//! - `/weather?q=<city>` returns current conditions for a named place,
//!   including `.coord.{lat,lon}`.
//! - `/air_pollution?lat=<lat>&lon=<lon>` returns `.list[]`, whose first
//!   entry is the current reading: `.main.aqi` (1 through 5) and
//!   `.components`, a map of pollutant to concentration in µg/m³.
//!
//! Non-200 responses carry a `.message` explaining the failure.

use std::time::Duration;

mod http;
mod model;

pub use model::{AirPollution, Components, Coord, PollutionEntry, PollutionIndex, Weather};

/// Message used when the provider fails without explaining why.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// An error in communicating with OpenWeather.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("in request to OpenWeather: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("OpenWeather returned status {status}: {}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Status { status: u16, message: Option<String> },
    #[error("malformed OpenWeather response: {0}")]
    Malformed(String),
    #[error("invalid argument for OpenWeather request: {0}")]
    InvalidArgument(&'static str),
}

impl Error {
    /// The provider's own explanation of a failed request, if it gave one.
    ///
    /// Failures that never got a response from the provider are described
    /// by the error itself.
    pub fn upstream_message(&self) -> String {
        match self {
            Error::Status { message, .. } => {
                message.clone().unwrap_or_else(|| UNKNOWN_ERROR.to_owned())
            }
            e => e.to_string(),
        }
    }
}

/// Settings when starting to use OpenWeather.
#[non_exhaustive]
#[derive(Clone)]
pub struct Settings {
    /// The `appid` credential sent with every request.
    pub api_key: String,
    /// Root of the versioned API, without a trailing path separator.
    pub base_url: String,
    /// Per-request timeout. Defaults to 10 seconds.
    pub timeout: Duration,
}

impl Settings {
    pub const DEFAULT_BASE_URL: &'static str = "http://api.openweathermap.org/data/2.5";

    /// Default settings using the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Replace the API root, e.g. to point at a mirror or a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Handle to the OpenWeather API.
///
/// Each call makes exactly one request; nothing is retried or cached.
pub struct Client {
    comm: http::HttpComm,
}

impl Client {
    /// Create a client with the given settings.
    pub fn new(settings: Settings) -> Result<Self, Error> {
        if settings.api_key.is_empty() {
            return Err(Error::InvalidArgument("API key must not be empty"));
        }
        Ok(Client {
            comm: http::HttpComm::new(settings)?,
        })
    }

    /// Current weather for a named place; used for its coordinates.
    pub fn weather_by_city(&self, city: &str) -> Result<Weather, Error> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Error::InvalidArgument("city must not be empty"));
        }
        self.comm.get("weather", &[("q", city.to_owned())])
    }

    /// Current air pollution at the given coordinates.
    pub fn air_pollution(&self, latitude: f64, longitude: f64) -> Result<AirPollution, Error> {
        self.comm.get(
            "air_pollution",
            &[("lat", latitude.to_string()), ("lon", longitude.to_string())],
        )
    }
}
