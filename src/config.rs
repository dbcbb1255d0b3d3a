//! Dashboard configuration.
//!
//! Built once from the parsed [`Cli`](crate::cli::Cli) and handed to the page
//! composer, which passes it down to the panels that need an endpoint or a
//! credential. Nothing else reads the environment.

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::locale::Locale;
use crate::panels::news::NewsSource;
use std::fmt;
use tracing::warn;
use url::Url;

pub const DEFAULT_WEATHER_BASE: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_WIKIPEDIA_BASE: &str = "https://{lang}.wikipedia.org/w";
pub const DEFAULT_NEWS_BASE: &str = "https://newsapi.org/v2";
pub const DEFAULT_GRAPH_BASE: &str = "https://graph.facebook.com/v22.0";
pub const DEFAULT_HASHTAG_ID: &str = "17843738311000231";
pub const DEFAULT_HASHTAG_LABEL: &str = "#Roomdeco";
pub const DEFAULT_NEWS_SOURCES: &str = "bbc,sweNews,omocoro,dpz";

const MEDIA_LIMIT: u32 = 8;
const MEDIA_FIELDS: &str =
    "timestamp,media_url,media_type,id,children{media_type,media_url,permalink},permalink,caption";

/// The four secrets. Missing ones surface as provider errors inside panels.
#[derive(Clone, Default)]
pub struct Credentials {
    pub openweather_api_key: Option<String>,
    pub newsapi_api_key: Option<String>,
    pub instagram_business_id: Option<String>,
    pub instagram_access_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("openweather_api_key", &shown(&self.openweather_api_key))
            .field("newsapi_api_key", &shown(&self.newsapi_api_key))
            .field("instagram_business_id", &shown(&self.instagram_business_id))
            .field("instagram_access_token", &shown(&self.instagram_access_token))
            .finish()
    }
}

impl Credentials {
    /// Names of the credentials that were not supplied.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("OPENWEATHER_API_KEY", &self.openweather_api_key),
            ("NEWSAPI_API_KEY", &self.newsapi_api_key),
            ("INSTAGRAM_BUSINESS_ID", &self.instagram_business_id),
            ("INSTAGRAM_ACCESS_TOKEN", &self.instagram_access_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }
}

/// Provider base URLs, without trailing slash.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub weather: String,
    /// Contains a `{lang}` placeholder.
    pub wikipedia: String,
    pub news: String,
    pub graph: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            weather: DEFAULT_WEATHER_BASE.to_string(),
            wikipedia: DEFAULT_WIKIPEDIA_BASE.to_string(),
            news: DEFAULT_NEWS_BASE.to_string(),
            graph: DEFAULT_GRAPH_BASE.to_string(),
        }
    }
}

impl Endpoints {
    fn validated(self) -> Result<Self, ConfigError> {
        if !self.wikipedia.contains("{lang}") {
            return Err(ConfigError::MissingLangPlaceholder(self.wikipedia));
        }
        let wikipedia_sample = self.wikipedia.replace("{lang}", "en");
        for (name, value) in [
            ("weather", self.weather.as_str()),
            ("wikipedia", wikipedia_sample.as_str()),
            ("news", self.news.as_str()),
            ("graph", self.graph.as_str()),
        ] {
            Url::parse(value).map_err(|source| ConfigError::InvalidEndpoint {
                name,
                value: value.to_string(),
                source,
            })?;
        }
        Ok(Self {
            weather: self.weather.trim_end_matches('/').to_string(),
            wikipedia: self.wikipedia.trim_end_matches('/').to_string(),
            news: self.news.trim_end_matches('/').to_string(),
            graph: self.graph.trim_end_matches('/').to_string(),
        })
    }
}

/// Hashtag whose top media fill the photo grid.
#[derive(Debug, Clone)]
pub struct Hashtag {
    pub id: String,
    pub label: String,
}

impl Default for Hashtag {
    fn default() -> Self {
        Self {
            id: DEFAULT_HASHTAG_ID.to_string(),
            label: DEFAULT_HASHTAG_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub hashtag: Hashtag,
    /// News panel keys, laid out two per column.
    pub news_sources: Vec<String>,
}

impl DashboardConfig {
    pub fn new(
        credentials: Credentials,
        endpoints: Endpoints,
        hashtag: Hashtag,
        news_sources: Vec<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            credentials,
            endpoints: endpoints.validated()?,
            hashtag,
            news_sources,
        })
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let config = Self::new(
            Credentials {
                openweather_api_key: cli.openweather_api_key.clone(),
                newsapi_api_key: cli.newsapi_api_key.clone(),
                instagram_business_id: cli.instagram_business_id.clone(),
                instagram_access_token: cli.instagram_access_token.clone(),
            },
            Endpoints {
                weather: cli.weather_base.clone(),
                wikipedia: cli.wikipedia_base.clone(),
                news: cli.news_base.clone(),
                graph: cli.graph_base.clone(),
            },
            Hashtag {
                id: cli.hashtag_id.clone(),
                label: cli.hashtag_label.clone(),
            },
            cli.news_sources.clone(),
        )?;

        for name in config.credentials.missing() {
            warn!(credential = name, "Credential not set; dependent panels will show the provider error");
        }
        Ok(config)
    }

    pub fn weather_url(&self, locale: Locale) -> String {
        format!(
            "{}/weather?q={}&appid={}",
            self.endpoints.weather,
            locale.weather_city(),
            secret(&self.credentials.openweather_api_key)
        )
    }

    /// `encoded_title` must already be percent-encoded.
    pub fn trivia_url(&self, locale: Locale, encoded_title: &str) -> String {
        format!(
            "{}/api.php?action=query&format=json&prop=extracts&titles={}&section=2&origin=*",
            self.endpoints.wikipedia.replace("{lang}", locale.wiki_lang()),
            encoded_title
        )
    }

    pub fn news_url(&self, source: NewsSource) -> String {
        format!(
            "{}/{}&apiKey={}",
            self.endpoints.news,
            source.path_and_query(),
            secret(&self.credentials.newsapi_api_key)
        )
    }

    pub fn media_url(&self) -> String {
        format!(
            "{}/{}/top_media?user_id={}&limit={}&fields={}&access_token={}",
            self.endpoints.graph,
            self.hashtag.id,
            secret(&self.credentials.instagram_business_id),
            MEDIA_LIMIT,
            MEDIA_FIELDS,
            secret(&self.credentials.instagram_access_token)
        )
    }
}

fn secret(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(|v| urlencoding::encode(v).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) fn test_config(base: &str) -> DashboardConfig {
    DashboardConfig::new(
        Credentials {
            openweather_api_key: Some("weather-key".to_string()),
            newsapi_api_key: Some("news-key".to_string()),
            instagram_business_id: Some("42".to_string()),
            instagram_access_token: Some("token".to_string()),
        },
        Endpoints {
            weather: base.to_string(),
            wikipedia: format!("{base}/{{lang}}"),
            news: base.to_string(),
            graph: base.to_string(),
        },
        Hashtag::default(),
        DEFAULT_NEWS_SOURCES.split(',').map(str::to_string).collect(),
    )
    .unwrap()
}
