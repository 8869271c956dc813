//! Renders the AQI gauge for each index, for eyeballing.
//!
//! Writes into the directory given as the first argument, or into a fresh
//! temporary directory that is kept afterwards.

use std::path::PathBuf;

fn main() {
    tracing_subscriber::fmt::init();

    let outdir: PathBuf = match std::env::args_os().nth(1) {
        Some(p) => p.into(),
        None => tempfile::Builder::new()
            .prefix("gauges")
            .tempdir()
            .expect("could not create output directory")
            .into_path(),
    };

    for index in 0..=6 {
        let image = aircheck::gauge::render(index).expect("could not render gauge");
        let path = outdir.join(format!("gauge-{index}.{}", image.format.extension()));
        std::fs::write(&path, &image.bytes).expect("could not write gauge");
        tracing::info!("AQI {} ({}): {}", index, aircheck::classify(index), path.display());
    }
    tracing::info!("gauges in {}", outdir.display());
}
