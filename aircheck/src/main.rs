use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aircheck::{config::Settings, Pipeline, Query, VisualArtifact};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Check the air quality at a place, and optionally mail an advisory.
#[derive(Parser, Debug)]
#[command(name = "aircheck", version)]
struct Args {
    /// City to check. Takes precedence over coordinates.
    #[arg(long)]
    city: Option<String>,
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,
    /// Where to send an advisory, if one is raised.
    #[arg(long)]
    email: Option<String>,
    /// Directory to write the chart and gauge images to.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: String,
    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = openweather::Settings::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    smtp_host: String,
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    smtp_port: u16,
    #[arg(long, env = "SMTP_SENDER", requires = "smtp_password")]
    smtp_sender: Option<String>,
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    smtp_password: Option<String>,
}

impl Args {
    fn settings(&self) -> Settings {
        let settings = Settings::new(
            openweather::Settings::new(&self.api_key).with_base_url(&self.base_url),
        );
        #[cfg(feature = "smtp")]
        let settings = match (&self.smtp_sender, &self.smtp_password) {
            (Some(sender), Some(password)) => settings.with_smtp(
                aircheck::notify::SmtpSettings::new(sender, password)
                    .with_relay(&self.smtp_host, self.smtp_port),
            ),
            _ => settings,
        };
        settings
    }

    fn query(&self) -> Query {
        Query {
            city: self.city.clone(),
            latitude: self.lat,
            longitude: self.lon,
            email: self.email.clone(),
        }
    }
}

fn save(dir: &Path, name: &str, image: &VisualArtifact) -> std::io::Result<()> {
    let path = dir.join(format!("{name}.{}", image.format.extension()));
    std::fs::write(&path, &image.bytes)?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings = args.settings();
    let client = match settings.client() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("could not set up OpenWeather client: {}", e);
            return ExitCode::from(2);
        }
    };
    let mailer = settings.mailer();

    let pipeline = Pipeline::new(&client, &client, &*mailer);
    let outcome = pipeline.run(&args.query());
    println!("{}", outcome.report);

    for (name, image) in [
        ("pollutants", &outcome.pollutant_chart),
        ("gauge", &outcome.gauge),
    ] {
        if let Some(image) = image {
            if let Err(e) = save(&args.out, name, image) {
                tracing::error!("could not write {} image: {}", name, e);
            }
        }
    }

    ExitCode::SUCCESS
}
