mod enrich;
mod export;
mod input;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use brewmap_core::AppConfig;
use brewmap_places::{PhotoSize, PlacesClient};
use brewmap_reviews::ReviewClient;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::enrich::{enrich_all, EnrichOptions, EnrichReport};

#[derive(Debug, Parser)]
#[command(name = "brewmap")]
#[command(about = "Enrich a coffee-shop list with Google Maps details, photos and AI reviews")]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// CSV with `Title` and `URL` columns (`Note`, `Tags`, `Comment` optional)
    #[arg(long)]
    input_file: PathBuf,

    /// Results go to `<output-path>/<input file stem>/`
    #[arg(long, default_value = "output")]
    output_path: PathBuf,

    /// Also write a GeoJSON file of located places
    #[arg(long)]
    geojson: bool,

    /// Only print the final summary and errors
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Debug-level logging
    #[arg(long)]
    verbose: bool,

    /// Generate English and Chinese reviews (default; needs ANTHROPIC_API_KEY)
    #[arg(long, overrides_with = "no_generate_reviews")]
    generate_reviews: bool,

    #[arg(long, overrides_with = "generate_reviews")]
    no_generate_reviews: bool,

    /// Write per-place HTML pages and an index (default)
    #[arg(long, overrides_with = "no_generate_html")]
    generate_html: bool,

    #[arg(long, overrides_with = "generate_html")]
    no_generate_html: bool,

    /// Download place photos (default)
    #[arg(long, overrides_with = "no_download_photos")]
    download_photos: bool,

    #[arg(long, overrides_with = "download_photos")]
    no_download_photos: bool,

    /// Photos to download per place [env default: BREWMAP_MAX_PHOTOS]
    #[arg(long)]
    max_photos: Option<usize>,

    /// Delay between entries in milliseconds [env default: BREWMAP_PACING_DELAY_MS]
    #[arg(long)]
    pacing_delay_ms: Option<u64>,

    /// Entries processed at once [env default: BREWMAP_MAX_CONCURRENT]
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: Option<u16>,
}

impl Cli {
    // Each `--x`/`--no-x` pair overrides its partner, so at most one is set.
    fn reviews_enabled(&self) -> bool {
        self.generate_reviews || !self.no_generate_reviews
    }

    fn html_enabled(&self) -> bool {
        self.generate_html || !self.no_generate_html
    }

    fn photos_enabled(&self) -> bool {
        self.download_photos || !self.no_download_photos
    }

    fn enrich_options(&self, config: &AppConfig) -> EnrichOptions {
        EnrichOptions {
            download_photos: self.photos_enabled(),
            generate_reviews: self.reviews_enabled(),
            pacing_delay: Duration::from_millis(
                self.pacing_delay_ms.unwrap_or(config.pacing_delay_ms),
            ),
            max_photos: self.max_photos.unwrap_or(config.max_photos),
            photo_size: PhotoSize {
                width: config.photo_max_width,
                height: config.photo_max_height,
            },
            max_concurrent: self
                .concurrency
                .map_or(config.max_concurrent, usize::from),
        }
    }
}

fn init_logging(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = if cli.quiet {
        EnvFilter::try_new("error")?
    } else if cli.verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

fn build_places_client(config: &AppConfig) -> anyhow::Result<PlacesClient> {
    let client = match config.places_base_url.as_deref() {
        Some(base_url) => PlacesClient::with_base_url(
            &config.google_maps_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            base_url,
        )?,
        None => PlacesClient::new(
            &config.google_maps_api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )?,
    };
    Ok(client)
}

/// `None` when reviews are disabled or no key is configured.
fn build_review_client(cli: &Cli, config: &AppConfig) -> anyhow::Result<Option<ReviewClient>> {
    if !cli.reviews_enabled() {
        return Ok(None);
    }
    let Some(api_key) = config.anthropic_api_key.as_deref() else {
        tracing::warn!("ANTHROPIC_API_KEY is not set; continuing without review generation");
        return Ok(None);
    };
    let client = match config.anthropic_base_url.as_deref() {
        Some(base_url) => ReviewClient::with_base_url(
            api_key,
            &config.review_model,
            config.review_max_tokens,
            config.request_timeout_secs,
            &config.user_agent,
            base_url,
        )?,
        None => ReviewClient::new(
            api_key,
            &config.review_model,
            config.review_max_tokens,
            config.request_timeout_secs,
            &config.user_agent,
        )?,
    };
    Ok(Some(client))
}

fn print_summary(report: &EnrichReport, quiet: bool) {
    let summary = report.summary;
    println!(
        "enriched {} entries: {} succeeded, {} degraded",
        summary.total, summary.succeeded, summary.degraded
    );
    if quiet {
        return;
    }
    for record in report.records.iter().filter(|r| r.is_degraded()) {
        println!(
            "  {}: {}",
            record.display_name(),
            record.failure_summary().unwrap_or_default()
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = brewmap_core::load_app_config()?;
    init_logging(&cli, &config)?;

    let entries = input::read_source_entries(&cli.input_file)?;
    if entries.is_empty() {
        println!("no entries found in {}", cli.input_file.display());
        return Ok(());
    }
    tracing::info!(count = entries.len(), input = %cli.input_file.display(), "loaded entries");

    let places = build_places_client(&config)?;
    places
        .verify_credentials()
        .await
        .context("Google Maps API key was rejected")?;
    let reviews = build_review_client(&cli, &config)?;

    let options = cli.enrich_options(&config);
    let report = enrich_all(entries, &places, reviews.as_ref(), &options).await;

    let out_dir = export::prepare_output_dir(&cli.output_path, &cli.input_file)?;

    let csv_path = out_dir.join(export::CSV_FILE_NAME);
    export::write_export_csv(&csv_path, &report.records)?;
    export::verify_export_csv(&csv_path, report.records.len())?;
    println!("saved enriched data to {}", csv_path.display());

    if cli.geojson {
        let geojson_path = out_dir.join(export::GEOJSON_FILE_NAME);
        let features = export::write_geojson(&geojson_path, &report.records)?;
        println!("exported {features} places to {}", geojson_path.display());
    }

    if cli.html_enabled() {
        let html = export::write_html_site(&out_dir, &report.records, chrono::Utc::now())?;
        println!(
            "generated {} HTML pages in {} cities under {}",
            html.pages,
            html.cities.len(),
            out_dir.display()
        );
    }

    print_summary(&report, cli.quiet);
    Ok(())
}

#[cfg(test)]
mod tests;
