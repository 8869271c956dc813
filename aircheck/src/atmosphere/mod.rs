//! Types for surfacing air quality data.

use chrono::{DateTime, Utc};

use crate::{error::UpstreamError, location::Coordinates};

mod openweather;

/// Pollutant concentrations in µg/m³, keyed by the provider's species code
/// (e.g. `co`, `pm2_5`), in the order the provider listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollutantReading {
    entries: Vec<(String, f64)>,
}

impl PollutantReading {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for PollutantReading {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        PollutantReading {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A sample of current air quality at a place.
#[derive(Debug, Clone, PartialEq)]
pub struct AirQualitySample {
    /// Time at which the provider took the reading, if it said.
    pub timestamp: Option<DateTime<Utc>>,

    /// Air quality index as reported by the provider; nominally 1 through 5.
    pub index: i32,

    pub pollutants: PollutantReading,
}

/// A type that can get current air quality conditions.
pub trait AirQualitySampler {
    /// Get the current sample at the given coordinates.
    ///
    /// Each call reflects "now"; samples are not cached.
    fn sample(&self, at: Coordinates) -> Result<AirQualitySample, UpstreamError>;
}
