//! Fake collaborators that record how they were called.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use aircheck::{
    AirQualitySample, AirQualitySampler, Coordinates, Geocoder, Mailer, NotificationError,
    NotificationRequest, PollutantReading, ResolutionError, UpstreamError,
};

/// Geocoder with a canned answer.
pub struct FakeGeocoder {
    pub result: Result<Coordinates, ResolutionError>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeGeocoder {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        FakeGeocoder {
            result: Ok(Coordinates::new(latitude, longitude).unwrap()),
            calls: RefCell::default(),
        }
    }

    pub fn not_found(city: &str) -> Self {
        FakeGeocoder {
            result: Err(ResolutionError {
                city: city.to_owned(),
                detail: "city not found".to_owned(),
            }),
            calls: RefCell::default(),
        }
    }
}

impl Geocoder for FakeGeocoder {
    fn resolve(&self, city: &str) -> Result<Coordinates, ResolutionError> {
        self.calls.borrow_mut().push(city.to_owned());
        self.result.clone()
    }
}

/// Sampler with a canned answer.
pub struct FakeSampler {
    pub result: Result<AirQualitySample, UpstreamError>,
    pub calls: RefCell<Vec<Coordinates>>,
}

impl FakeSampler {
    pub fn reading(index: i32, pollutants: &[(&str, f64)]) -> Self {
        FakeSampler {
            result: Ok(AirQualitySample {
                timestamp: None,
                index,
                pollutants: pollutants.iter().copied().collect::<PollutantReading>(),
            }),
            calls: RefCell::default(),
        }
    }

    pub fn failing(detail: &str) -> Self {
        FakeSampler {
            result: Err(UpstreamError {
                detail: detail.to_owned(),
            }),
            calls: RefCell::default(),
        }
    }
}

impl AirQualitySampler for FakeSampler {
    fn sample(&self, at: Coordinates) -> Result<AirQualitySample, UpstreamError> {
        self.calls.borrow_mut().push(at);
        self.result.clone()
    }
}

/// Mailer that keeps what it was asked to send, optionally failing.
#[derive(Default)]
pub struct RecordingMailer {
    pub fail: bool,
    pub sent: RefCell<Vec<NotificationRequest>>,
    pub attempts: Cell<usize>,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        RecordingMailer {
            fail: true,
            ..Default::default()
        }
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, request: &NotificationRequest) -> Result<(), NotificationError> {
        self.attempts.set(self.attempts.get() + 1);
        if self.fail {
            return Err(NotificationError::Transport(
                "connection refused".to_owned(),
            ));
        }
        self.sent.borrow_mut().push(request.clone());
        Ok(())
    }
}
