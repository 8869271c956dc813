//! Air quality from the OpenWeather air pollution API.

use super::{AirQualitySample, AirQualitySampler};
use crate::{error::UpstreamError, location::Coordinates};

impl AirQualitySampler for ::openweather::Client {
    fn sample(&self, at: Coordinates) -> Result<AirQualitySample, UpstreamError> {
        let sample = sample_of(self.air_pollution(at.latitude(), at.longitude()))?;
        tracing::debug!(
            "reading at {} taken {:?}: AQI {}",
            at,
            sample.timestamp,
            sample.index
        );
        Ok(sample)
    }
}

/// Interpret an air pollution report as its current sample.
fn sample_of(
    report: Result<::openweather::AirPollution, ::openweather::Error>,
) -> Result<AirQualitySample, UpstreamError> {
    let report = report.map_err(|e| UpstreamError {
        detail: e.upstream_message(),
    })?;
    let current = report.current().ok_or_else(|| UpstreamError {
        detail: "no current reading in response".to_owned(),
    })?;
    Ok(AirQualitySample {
        timestamp: current.timestamp(),
        index: current.main.aqi,
        pollutants: current.components.iter().collect(),
    })
}
