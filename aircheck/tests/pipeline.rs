mod common;

use aircheck::{
    assessment::{ALL_CLEAR, PRECAUTIONS},
    ImageFormat, NotificationError, Outcome, Pipeline, Query, Sent,
};
use common::{FakeGeocoder, FakeSampler, RecordingMailer};

const LONDON: (f64, f64) = (51.5085, -0.1257);

fn run(
    geocoder: &FakeGeocoder,
    sampler: &FakeSampler,
    mailer: &RecordingMailer,
    query: Query,
) -> Outcome {
    Pipeline::new(geocoder, sampler, mailer).run(&query)
}

fn assert_images(outcome: &Outcome) {
    for image in [&outcome.pollutant_chart, &outcome.gauge] {
        let image = image.as_ref().expect("image should be rendered");
        assert_eq!(image.format, ImageFormat::Png);
        image::load_from_memory(&image.bytes).expect("image should decode");
    }
}

fn assert_no_images(outcome: &Outcome) {
    assert!(outcome.pollutant_chart.is_none());
    assert!(outcome.gauge.is_none());
}

#[test]
fn fair_city_reading() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::reading(2, &[("co", 200.0), ("no2", 10.0)]);
    let mailer = RecordingMailer::default();

    let outcome = run(&geocoder, &sampler, &mailer, Query::city("London"));

    assert_eq!(
        outcome.report,
        format!(
            "Air Quality Index (AQI): 2 (Fair (51-100))\n\
             Pollutant concentrations (µg/m³):\n\
             co: 200\n\
             no2: 10\n\
             \n{ALL_CLEAR}"
        )
    );
    assert!(outcome.report.ends_with(ALL_CLEAR));
    assert_images(&outcome);
    assert_eq!(*geocoder.calls.borrow(), ["London"]);
    assert_eq!(sampler.calls.borrow()[0].latitude(), LONDON.0);
    assert_eq!(mailer.attempts.get(), 0);
    assert_eq!(outcome.notification, None);
}

#[test]
fn poor_reading_notifies() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::reading(4, &[("pm2_5", 80.0)]);
    let mailer = RecordingMailer::default();

    let outcome = run(
        &geocoder,
        &sampler,
        &mailer,
        Query::city("London").with_email("a@b.com"),
    );

    assert!(outcome
        .report
        .starts_with("Air Quality Index (AQI): 4 (Poor (151-200))\n"));
    assert!(outcome
        .report
        .contains("\nWarning: The air quality is considered bad.\nRecommended actions:\n"));
    for p in PRECAUTIONS {
        assert!(outcome.report.contains(&format!("- {p}")), "missing {p:?}");
    }
    assert!(outcome.report.ends_with("Notification sent to a@b.com."));
    assert!(!outcome.report.contains(ALL_CLEAR));
    assert_images(&outcome);

    let sent = mailer.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "a@b.com");
    assert!(sent[0]
        .body
        .starts_with("The air quality is currently bad with an AQI of 4.\n"));
    assert!(sent[0].body.contains("- Keep windows closed."));
    assert_eq!(
        outcome.notification,
        Some(Ok(Sent {
            recipient: "a@b.com".to_owned()
        }))
    );
}

#[test]
fn unknown_city_ends_query() {
    let geocoder = FakeGeocoder::not_found("Nonexistentville");
    let sampler = FakeSampler::reading(1, &[("co", 1.0)]);
    let mailer = RecordingMailer::default();

    let outcome = run(
        &geocoder,
        &sampler,
        &mailer,
        Query::city("Nonexistentville").with_email("a@b.com"),
    );

    assert_eq!(
        outcome.report,
        "Error fetching data for city 'Nonexistentville': city not found"
    );
    assert_no_images(&outcome);
    assert!(outcome.assessment.is_none());
    assert!(sampler.calls.borrow().is_empty());
    assert_eq!(mailer.attempts.get(), 0);
}

#[test]
fn very_poor_at_coordinates_without_email() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::reading(5, &[("o3", 300.0)]);
    let mailer = RecordingMailer::default();

    let outcome = run(&geocoder, &sampler, &mailer, Query::coordinates(0.0, 0.0));

    assert!(outcome.report.contains("(Very Poor (201+))"));
    assert!(outcome.report.contains("Warning: The air quality is considered bad."));
    assert!(!outcome.report.contains("Notification"));
    assert_images(&outcome);
    assert!(geocoder.calls.borrow().is_empty());
    assert_eq!(sampler.calls.borrow()[0].latitude(), 0.0);
    assert_eq!(mailer.attempts.get(), 0);
    assert_eq!(outcome.notification, None);
}

#[test]
fn nothing_given() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::reading(1, &[]);
    let mailer = RecordingMailer::default();

    let blank = Query {
        city: Some("   ".to_owned()),
        latitude: None,
        longitude: None,
        email: Some(String::new()),
    };
    for query in [Query::default(), blank] {
        let outcome = run(&geocoder, &sampler, &mailer, query);
        assert_eq!(outcome.report, "Please provide a city or coordinates.");
        assert_no_images(&outcome);
    }
    assert!(geocoder.calls.borrow().is_empty());
    assert!(sampler.calls.borrow().is_empty());
    assert_eq!(mailer.attempts.get(), 0);
}

#[test]
fn half_a_coordinate_pair_is_nothing() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::reading(1, &[]);
    let mailer = RecordingMailer::default();

    let query = Query {
        latitude: Some(10.0),
        ..Default::default()
    };
    let outcome = run(&geocoder, &sampler, &mailer, query);
    assert_eq!(outcome.report, "Please provide a city or coordinates.");
    assert!(sampler.calls.borrow().is_empty());
}

#[test]
fn out_of_range_coordinates_make_no_call() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::reading(1, &[]);
    let mailer = RecordingMailer::default();

    let outcome = run(&geocoder, &sampler, &mailer, Query::coordinates(91.0, 0.0));
    assert!(outcome.report.starts_with("Latitude 91"), "{}", outcome.report);
    assert_no_images(&outcome);
    assert!(sampler.calls.borrow().is_empty());
}

#[test]
fn city_wins_over_coordinates() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::reading(1, &[("co", 1.0)]);
    let mailer = RecordingMailer::default();

    let query = Query {
        city: Some("London".to_owned()),
        latitude: Some(0.0),
        longitude: Some(0.0),
        email: None,
    };
    run(&geocoder, &sampler, &mailer, query);
    assert_eq!(geocoder.calls.borrow().len(), 1);
    assert_eq!(sampler.calls.borrow()[0].latitude(), LONDON.0);
}

#[test]
fn mail_failure_on_good_air_is_never_attempted() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::reading(1, &[("co", 150.0), ("pm10", 4.0)]);
    let mailer = RecordingMailer::failing();

    let outcome = run(
        &geocoder,
        &sampler,
        &mailer,
        Query::city("X").with_email("a@b.com"),
    );

    assert!(outcome
        .report
        .starts_with("Air Quality Index (AQI): 1 (Good (0-50))\n"));
    assert!(outcome.report.contains("pm10: 4\n"));
    assert!(outcome.report.ends_with(ALL_CLEAR));
    assert_images(&outcome);
    assert_eq!(mailer.attempts.get(), 0);
}

#[test]
fn mail_failure_is_not_fatal() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::reading(3, &[("no2", 120.0)]);
    let mailer = RecordingMailer::failing();

    let outcome = run(
        &geocoder,
        &sampler,
        &mailer,
        Query::city("X").with_email("a@b.com"),
    );

    assert!(outcome.report.contains("(Moderate (101-150))"));
    assert!(outcome.report.contains("- Limit outdoor activities."));
    assert!(outcome.report.ends_with(
        "Could not send notification to a@b.com: mail transport failed: connection refused."
    ));
    assert_images(&outcome);
    assert_eq!(mailer.attempts.get(), 1);
    assert_eq!(
        outcome.notification,
        Some(Err(NotificationError::Transport(
            "connection refused".to_owned()
        )))
    );
}

#[test]
fn upstream_failure_ends_query() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::failing("Invalid API key");
    let mailer = RecordingMailer::default();

    let outcome = run(
        &geocoder,
        &sampler,
        &mailer,
        Query::city("London").with_email("a@b.com"),
    );

    assert_eq!(
        outcome.report,
        "Error fetching air quality data: Invalid API key"
    );
    assert_no_images(&outcome);
    assert_eq!(mailer.attempts.get(), 0);
}

#[test]
fn out_of_range_index_is_unknown_but_warned() {
    let geocoder = FakeGeocoder::at(LONDON.0, LONDON.1);
    let sampler = FakeSampler::reading(6, &[("co", 1.0)]);
    let mailer = RecordingMailer::default();

    let outcome = run(&geocoder, &sampler, &mailer, Query::city("London"));
    assert!(outcome
        .report
        .starts_with("Air Quality Index (AQI): 6 (Unknown)\n"));
    assert!(outcome.report.contains("Warning:"));
    assert_images(&outcome);
}
