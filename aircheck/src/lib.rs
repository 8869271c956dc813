//! Air quality checks for a single place.
//!
//! A query names a city or gives coordinates, and optionally an email
//! address. The [pipeline] resolves the place, fetches the current air
//! pollution reading, classifies it, raises an advisory (mailing it if
//! asked to), and renders two images: a pollutant bar chart and an AQI gauge.
//!
//! Each stage is a trait or a pure function, so the upstream provider and
//! the mail transport can be swapped out; see [location::Geocoder],
//! [atmosphere::AirQualitySampler] and [notify::Mailer].
//!
//! # Building
//! The `smtp` feature (default) pulls in an SMTP transport.
//! The `cli` feature (default) builds the `aircheck` binary.
//!
pub mod assessment;
pub mod atmosphere;
pub mod config;
pub mod error;
pub mod location;
pub mod notify;
pub mod pipeline;

pub mod chart;
pub mod drawing;
pub mod gauge;

pub use assessment::{classify, decide, AdvisoryDecision, AqiAssessment, Category};
pub use atmosphere::{AirQualitySample, AirQualitySampler, PollutantReading};
pub use drawing::{ImageFormat, VisualArtifact};
pub use error::{Error, InputError, ResolutionError, UpstreamError};
pub use location::{Coordinates, Geocoder};
pub use notify::{dispatch, Mailer, NotificationError, NotificationRequest, Sent};
pub use pipeline::{Outcome, Pipeline, Query};
