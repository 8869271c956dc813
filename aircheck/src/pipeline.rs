//! Runs a query from location to rendered images.

use crate::{
    assessment::{decide, AqiAssessment, ALL_CLEAR},
    atmosphere::{AirQualitySample, AirQualitySampler, PollutantReading},
    chart,
    drawing::VisualArtifact,
    error::{Error, InputError},
    gauge,
    location::{Coordinates, Geocoder},
    notify::{dispatch, Mailer, NotificationError, NotificationRequest, Sent},
};

/// What the caller asked for. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Where to send an advisory, if one is raised.
    pub email: Option<String>,
}

impl Query {
    pub fn city(city: impl Into<String>) -> Self {
        Query {
            city: Some(city.into()),
            ..Default::default()
        }
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Query {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    fn city_name(&self) -> Option<&str> {
        non_blank(&self.city)
    }

    fn recipient(&self) -> Option<&str> {
        non_blank(&self.email)
    }
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Result of a query.
///
/// If the query failed, `report` is the error text and nothing else is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub report: String,
    pub pollutant_chart: Option<VisualArtifact>,
    pub gauge: Option<VisualArtifact>,
    pub assessment: Option<AqiAssessment>,
    /// Set iff an advisory was raised and the query named a recipient.
    pub notification: Option<Result<Sent, NotificationError>>,
}

impl Outcome {
    fn failed(error: &Error) -> Self {
        Outcome {
            report: error.to_string(),
            pollutant_chart: None,
            gauge: None,
            assessment: None,
            notification: None,
        }
    }
}

/// Report text for a reading: index and category, then each pollutant.
pub fn compose_report(assessment: &AqiAssessment, pollutants: &PollutantReading) -> String {
    let mut report = format!(
        "Air Quality Index (AQI): {} ({})\n",
        assessment.index,
        assessment.category()
    );
    report.push_str("Pollutant concentrations (µg/m³):\n");
    for (name, value) in pollutants.iter() {
        report.push_str(&format!("{name}: {value}\n"));
    }
    report
}

/// Body of the advisory mail.
pub fn notification_body(index: i32, advisory: &str) -> String {
    format!("The air quality is currently bad with an AQI of {index}.\n\n{advisory}")
}

/// Composes the stages of a query.
///
/// Holds no state between queries; the collaborators are only read.
pub struct Pipeline<'a> {
    geocoder: &'a dyn Geocoder,
    sampler: &'a dyn AirQualitySampler,
    mailer: &'a dyn Mailer,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        geocoder: &'a dyn Geocoder,
        sampler: &'a dyn AirQualitySampler,
        mailer: &'a dyn Mailer,
    ) -> Self {
        Pipeline {
            geocoder,
            sampler,
            mailer,
        }
    }

    /// Run the query.
    ///
    /// A failure to locate or sample ends the query with only a report;
    /// a failure to notify or render does not.
    pub fn run(&self, query: &Query) -> Outcome {
        match self.fetch(query) {
            Ok(sample) => self.assess(query, sample),
            Err(e) => {
                tracing::warn!("query failed: {}", e);
                Outcome::failed(&e)
            }
        }
    }

    /// Where the query is for. A city takes precedence over coordinates.
    fn locate(&self, query: &Query) -> Result<Coordinates, Error> {
        if let Some(city) = query.city_name() {
            let at = self.geocoder.resolve(city)?;
            tracing::info!("resolved {:?} to {}", city, at);
            return Ok(at);
        }
        match (query.latitude, query.longitude) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)?),
            _ => Err(InputError::MissingLocation.into()),
        }
    }

    fn fetch(&self, query: &Query) -> Result<AirQualitySample, Error> {
        let at = self.locate(query)?;
        let sample = self.sampler.sample(at)?;
        tracing::info!(
            "AQI {} at {} ({} pollutants)",
            sample.index,
            at,
            sample.pollutants.len()
        );
        Ok(sample)
    }

    fn assess(&self, query: &Query, sample: AirQualitySample) -> Outcome {
        let assessment = AqiAssessment::new(sample.index);
        let mut report = compose_report(&assessment, &sample.pollutants);

        let decision = decide(assessment.index);
        let mut notification = None;
        match decision.message {
            Some(advisory) if decision.triggered => {
                report.push('\n');
                report.push_str(&advisory);
                if let Some(recipient) = query.recipient() {
                    let request = NotificationRequest {
                        recipient: recipient.to_owned(),
                        body: notification_body(assessment.index, &advisory),
                    };
                    let sent = dispatch(self.mailer, &request);
                    match &sent {
                        Ok(_) => {
                            report.push_str(&format!("\nNotification sent to {recipient}."));
                        }
                        Err(e) => {
                            tracing::warn!("could not notify {}: {}", recipient, e);
                            report.push_str(&format!(
                                "\nCould not send notification to {recipient}: {e}."
                            ));
                        }
                    }
                    notification = Some(sent);
                }
            }
            _ => {
                report.push('\n');
                report.push_str(ALL_CLEAR);
            }
        }

        let pollutant_chart = chart::render(&sample.pollutants)
            .map_err(|e| tracing::warn!("could not render pollutant chart: {}", e))
            .ok();
        let gauge = gauge::render(assessment.index)
            .map_err(|e| tracing::warn!("could not render gauge: {}", e))
            .ok();

        Outcome {
            report,
            pollutant_chart,
            gauge,
            assessment: Some(assessment),
            notification,
        }
    }
}
