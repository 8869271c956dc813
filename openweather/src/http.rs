//! Helper module for HTTP communication with OpenWeather.

use crate::{Error, Settings};
use serde::{de::DeserializeOwned, Deserialize};

/// Body of a failed request.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Wrapper for OpenWeather's request mechanism, including credentials and
/// status handling.
pub(crate) struct HttpComm {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl HttpComm {
    pub fn new(settings: Settings) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(HttpComm {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_owned(),
            api_key: settings.api_key,
        })
    }

    /// Issue a GET to the given endpoint and decode the response.
    pub fn get<T>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        // Don't log the query: it carries the API key.
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", &self.api_key)])
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        decode(status, &body)
    }
}

/// Interpret a response body.
///
/// Anything but a 200 is a failure, described by the body's `message` if
/// present.
pub(crate) fn decode<T>(status: u16, body: &str) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    if status != 200 {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        return Err(Error::Status { status, message });
    }
    serde_json::from_str(body).map_err(|e| Error::Malformed(e.to_string()))
}
