//! Command-line interface definitions for the dashboard.
//!
//! Credentials can be given as flags but are normally read from the
//! environment. Endpoint overrides exist so the page can be pointed at a
//! proxy or a local stub.

use crate::config::{
    DEFAULT_GRAPH_BASE, DEFAULT_HASHTAG_ID, DEFAULT_HASHTAG_LABEL, DEFAULT_NEWS_BASE,
    DEFAULT_NEWS_SOURCES, DEFAULT_WEATHER_BASE, DEFAULT_WIKIPEDIA_BASE,
};
use clap::Parser;

/// Command-line arguments for the dashboard renderer.
///
/// # Examples
///
/// ```sh
/// # Render once into ./site
/// mahooo -o ./site
///
/// # Keep the page fresh, re-rendering every 30 seconds
/// mahooo -o ./site --refresh-secs 30
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory receiving index.html and dashboard.json
    #[arg(short, long)]
    pub output_dir: String,

    /// Re-render every N seconds until interrupted
    #[arg(long)]
    pub refresh_secs: Option<u64>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub openweather_api_key: Option<String>,

    /// NewsAPI key
    #[arg(long, env = "NEWSAPI_API_KEY", hide_env_values = true)]
    pub newsapi_api_key: Option<String>,

    /// Instagram business account id used for hashtag queries
    #[arg(long, env = "INSTAGRAM_BUSINESS_ID", hide_env_values = true)]
    pub instagram_business_id: Option<String>,

    /// Instagram Graph API access token
    #[arg(long, env = "INSTAGRAM_ACCESS_TOKEN", hide_env_values = true)]
    pub instagram_access_token: Option<String>,

    /// Hashtag id whose top media fill the photo grid
    #[arg(long, default_value = DEFAULT_HASHTAG_ID)]
    pub hashtag_id: String,

    /// Heading shown above the photo grid
    #[arg(long, default_value = DEFAULT_HASHTAG_LABEL)]
    pub hashtag_label: String,

    /// News panels to show, two per column
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_NEWS_SOURCES)]
    pub news_sources: Vec<String>,

    #[arg(long, default_value = DEFAULT_WEATHER_BASE)]
    pub weather_base: String,

    /// Must contain a {lang} placeholder
    #[arg(long, default_value = DEFAULT_WIKIPEDIA_BASE)]
    pub wikipedia_base: String,

    #[arg(long, default_value = DEFAULT_NEWS_BASE)]
    pub news_base: String,

    #[arg(long, default_value = DEFAULT_GRAPH_BASE)]
    pub graph_base: String,
}
