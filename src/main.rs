//! # Mahooo
//!
//! A personal dashboard for two locales, Sweden and Japan. Each run fetches
//! the current weather, a "what day is it" line from Wikipedia, top headlines
//! from four news sources and a hashtag photo grid, then renders everything
//! as a static HTML page plus a JSON snapshot.
//!
//! ## Usage
//!
//! ```sh
//! OPENWEATHER_API_KEY=... NEWSAPI_API_KEY=... \
//! INSTAGRAM_BUSINESS_ID=... INSTAGRAM_ACCESS_TOKEN=... \
//! mahooo -o ./site
//! ```
//!
//! ## Architecture
//!
//! 1. **Mount**: every panel starts its own requests through the fetch primitive
//! 2. **Settle**: wait until each panel's requests have resolved
//! 3. **Render**: snapshot every panel and write `index.html` and `dashboard.json`
//! 4. **Refresh** (watch mode only): re-read the clock and follow day changes
//!
//! A failing provider only affects its own panel, which shows the error inline.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod clock;
mod config;
mod error;
mod extract;
mod fetch;
mod locale;
mod models;
mod outputs;
mod page;
mod panels;
mod utils;

use cli::Cli;
use config::DashboardConfig;
use fetch::HttpFetcher;
use outputs::{html, json};
use page::{Dashboard, PageView};
use utils::ensure_writable_dir;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("dashboard starting up");

    let args = Cli::parse();
    debug!(output_dir = %args.output_dir, refresh_secs = ?args.refresh_secs, "Parsed CLI arguments");

    let config = DashboardConfig::from_cli(&args)?;

    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = HttpFetcher::new()?;
    let mut dashboard = Dashboard::mount(config, &fetcher, Utc::now());
    let mut renders = 0usize;

    loop {
        dashboard.settle().await;
        let page = dashboard.view(Utc::now());
        write_outputs(&page, &args.output_dir).await;
        renders += 1;

        let Some(secs) = args.refresh_secs else {
            break;
        };
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted; shutting down");
                break;
            }
        }
        let restarted = dashboard.refresh(Utc::now());
        debug!(restarted, "Refreshed time-dependent requests");
    }

    // Unmount: any request still in flight is discarded on completion.
    drop(dashboard);

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        renders,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Write both outputs. Failures are logged; the next render may succeed.
async fn write_outputs(page: &PageView, output_dir: &str) {
    if let Err(e) = html::write_page(page, output_dir).await {
        error!(error = %e, "Failed to write dashboard HTML");
    }
    if let Err(e) = json::write_snapshot(page, output_dir).await {
        error!(error = %e, "Failed to write JSON snapshot");
    }
}
