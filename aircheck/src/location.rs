//! Where a query is for.

use crate::error::{InputError, ResolutionError};

/// A point on the globe, in degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Checked constructor for caller-supplied coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InputError> {
        // NaN fails both range checks.
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InputError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InputError::LongitudeOutOfRange(longitude));
        }
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// A type that can turn a place name into coordinates.
pub trait Geocoder {
    /// Look up the coordinates of `city`, which is non-empty.
    ///
    /// Makes a single attempt.
    fn resolve(&self, city: &str) -> Result<Coordinates, ResolutionError>;
}

impl Geocoder for openweather::Client {
    fn resolve(&self, city: &str) -> Result<Coordinates, ResolutionError> {
        coordinates_of(city, self.weather_by_city(city))
    }
}

/// Interpret a weather lookup for `city` as its coordinates.
fn coordinates_of(
    city: &str,
    lookup: Result<openweather::Weather, openweather::Error>,
) -> Result<Coordinates, ResolutionError> {
    let failed = |detail: String| ResolutionError {
        city: city.to_owned(),
        detail,
    };
    let coord = lookup.map_err(|e| failed(e.upstream_message()))?.coord;
    Coordinates::new(coord.lat, coord.lon).map_err(|e| failed(e.to_string()))
}
