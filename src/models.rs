//! Response shapes of the upstream providers.
//!
//! Only the fields the dashboard reads are modelled; everything else in the
//! provider payloads is ignored by serde. Nullable upstream fields are
//! `Option`s so a sparse payload still decodes.
//!
//! - [`WeatherReport`]: OpenWeatherMap current weather
//! - [`WikiQuery`]: MediaWiki `action=query&prop=extracts`
//! - [`NewsResponse`] / [`Article`]: NewsAPI headlines
//! - [`MediaResponse`] / [`MediaItem`]: Graph API hashtag top media

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current weather for one city.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

/// One weather condition, e.g. `{"main": "Clouds", "icon": "04d"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub icon: String,
}

impl WeatherReport {
    /// The primary condition, if the provider reported any.
    pub fn primary(&self) -> Option<&WeatherCondition> {
        self.weather.first()
    }
}

/// Envelope of a MediaWiki extracts query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WikiQuery {
    #[serde(default)]
    pub query: Option<WikiPages>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WikiPages {
    /// Keyed by page id (`"-1"` for a missing page).
    #[serde(default)]
    pub pages: BTreeMap<String, WikiPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WikiPage {
    #[serde(default)]
    pub extract: Option<String>,
}

impl WikiQuery {
    /// HTML extract of the first returned page, or `""`.
    pub fn first_extract(&self) -> &str {
        self.query
            .as_ref()
            .and_then(|q| q.pages.values().next())
            .and_then(|page| page.extract.as_deref())
            .unwrap_or("")
    }
}

/// NewsAPI response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// A headline as returned by NewsAPI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
}

impl Article {
    pub fn image(&self) -> Option<&str> {
        self.url_to_image.as_deref().filter(|u| !u.is_empty())
    }
}

/// Graph API `top_media` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaResponse {
    #[serde(default)]
    pub data: Vec<MediaItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Video,
    CarouselAlbum,
    #[serde(other)]
    Other,
}

/// A tagged post.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub media_type: MediaType,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub children: Option<MediaChildren>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaChildren {
    #[serde(default)]
    pub data: Vec<MediaChild>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaChild {
    #[serde(default)]
    pub media_url: Option<String>,
}

impl MediaItem {
    /// Image shown in the grid: a carousel's first child, otherwise the item itself.
    pub fn display_url(&self) -> Option<&str> {
        match self.media_type {
            MediaType::CarouselAlbum => self
                .children
                .as_ref()
                .and_then(|c| c.data.first())
                .and_then(|child| child.media_url.as_deref()),
            _ => self.media_url.as_deref(),
        }
    }
}
