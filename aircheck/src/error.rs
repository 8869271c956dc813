//! Ways a query can fail.
//!
//! Every variant of [Error] ends the query: the caller gets the error text
//! as its report and no images. Failing to send a notification is not an
//! [Error]; see [crate::notify::NotificationError].

/// The query itself was unusable. No network call is made.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Please provide a city or coordinates.")]
    MissingLocation,
    #[error("Latitude {0} is outside the range -90 to 90.")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is outside the range -180 to 180.")]
    LongitudeOutOfRange(f64),
}

/// Looking up a city's coordinates failed, or the lookup returned nonsense.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Error fetching data for city '{city}': {detail}")]
pub struct ResolutionError {
    pub city: String,
    /// The provider's explanation, where it gave one.
    pub detail: String,
}

/// Fetching the air pollution reading failed, or it came back malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Error fetching air quality data: {detail}")]
pub struct UpstreamError {
    /// The provider's explanation, where it gave one.
    pub detail: String,
}

/// An error that ends a query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
