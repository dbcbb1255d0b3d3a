//! Headline panels, one per news source.

use crate::config::DashboardConfig;
use crate::fetch::{HttpFetcher, Resource};
use crate::models::{Article, NewsResponse};
use crate::panels::PanelView;
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Title shown for a key that names no source.
pub const NO_DATA: &str = "no data";

/// The configured news sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NewsSource {
    Bbc,
    SweNews,
    Omocoro,
    Dpz,
}

impl NewsSource {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "bbc" => Some(NewsSource::Bbc),
            "sweNews" => Some(NewsSource::SweNews),
            "omocoro" => Some(NewsSource::Omocoro),
            "dpz" => Some(NewsSource::Dpz),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            NewsSource::Bbc => "bbc",
            NewsSource::SweNews => "sweNews",
            NewsSource::Omocoro => "omocoro",
            NewsSource::Dpz => "dpz",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            NewsSource::Bbc => "BBC",
            NewsSource::SweNews => "Stockholm",
            NewsSource::Omocoro => "Omocoro",
            NewsSource::Dpz => "Daily Portal Z",
        }
    }

    /// Request path and query below the news API base, without the key.
    pub fn path_and_query(self) -> &'static str {
        match self {
            NewsSource::Bbc => "top-headlines?sources=bbc-news&pageSize=5",
            NewsSource::SweNews => "everything?q=stockholm&language=sv&pagesize=5",
            NewsSource::Omocoro => "everything?domains=omocoro.jp&pagesize=5",
            NewsSource::Dpz => "everything?domains=dailyportalz.jp&pagesize=5",
        }
    }
}

/// Display title for a raw source key.
pub fn title_for_key(key: &str) -> &'static str {
    NewsSource::from_key(key).map_or(NO_DATA, NewsSource::title)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headlines {
    pub title: &'static str,
    /// First article carrying an image.
    pub featured: Option<Article>,
    /// Every article, the featured one included.
    pub articles: Vec<Article>,
}

impl Headlines {
    pub fn from_articles(source: NewsSource, articles: &[Article]) -> Self {
        Self {
            title: source.title(),
            featured: articles.iter().find(|a| a.image().is_some()).cloned(),
            articles: articles.to_vec(),
        }
    }
}

/// A news panel as rendered: its key plus the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsView {
    pub key: String,
    pub view: PanelView<Headlines>,
}

#[derive(Debug)]
pub struct NewsPanel {
    key: String,
    feed: Option<(NewsSource, Resource<NewsResponse>)>,
}

impl NewsPanel {
    /// Mount the panel for `key`. Unknown keys request nothing and render no data.
    #[instrument(level = "info", skip(config, fetcher))]
    pub fn mount(key: &str, config: &DashboardConfig, fetcher: &HttpFetcher) -> Self {
        let feed = match NewsSource::from_key(key) {
            Some(source) => {
                debug!(source = source.key(), title = source.title(), "Fetching headlines");
                Some((source, Resource::spawn(fetcher, config.news_url(source))))
            }
            None => {
                warn!(key, "Unknown news source");
                None
            }
        };
        Self {
            key: key.to_string(),
            feed,
        }
    }

    /// Wait for the headline request, if there is one.
    pub async fn settle(&mut self) {
        if let Some((_, resource)) = self.feed.as_mut() {
            resource.settled().await;
        }
    }

    /// Snapshot the panel.
    ///
    /// # Returns
    ///
    /// A [`NewsView`] carrying the configured key and one of:
    /// * `Ready` with the featured article and the full list
    /// * `Loading` or `Error` while the request is pending or failed
    /// * `NoData` when the key names no known source
    pub fn view(&self) -> NewsView {
        let view = match &self.feed {
            Some((source, resource)) => PanelView::from_state(&resource.state(), |news| {
                Headlines::from_articles(*source, &news.articles)
            }),
            None => PanelView::NoData,
        };
        NewsView {
            key: self.key.clone(),
            view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::fetch::testing::serve;
    use axum::{Json, Router, routing::get};
    use serde_json::json;

    fn article(title: &str, image: Option<&str>) -> Article {
        Article {
            title: title.to_string(),
            description: Some(format!("{title} description")),
            url: format!("https://news.example/{title}"),
            url_to_image: image.map(str::to_string),
        }
    }

    #[test]
    fn test_title_lookup() {
        assert_eq!(title_for_key("bbc"), "BBC");
        assert_eq!(title_for_key("sweNews"), "Stockholm");
        assert_eq!(title_for_key("omocoro"), "Omocoro");
        assert_eq!(title_for_key("dpz"), "Daily Portal Z");
        assert_eq!(title_for_key("cnn"), "no data");
        assert_eq!(title_for_key(""), "no data");
    }

    #[test]
    fn test_key_round_trip() {
        for source in [NewsSource::Bbc, NewsSource::SweNews, NewsSource::Omocoro, NewsSource::Dpz] {
            assert_eq!(NewsSource::from_key(source.key()), Some(source));
        }
    }

    #[test]
    fn test_featured_is_first_article_with_image() {
        let articles = vec![
            article("a", None),
            article("b", Some("https://img/b.jpg")),
            article("c", Some("https://img/c.jpg")),
        ];
        let headlines = Headlines::from_articles(NewsSource::Bbc, &articles);
        assert_eq!(headlines.featured.as_ref().map(|a| a.title.as_str()), Some("b"));
        assert_eq!(headlines.articles.len(), 3);
    }

    #[test]
    fn test_no_featured_without_images() {
        let headlines = Headlines::from_articles(NewsSource::Dpz, &[article("a", None)]);
        assert_eq!(headlines.featured, None);
        assert_eq!(headlines.title, "Daily Portal Z");
    }

    #[tokio::test]
    async fn test_zero_articles_render_empty_list() {
        let base = serve(Router::new().route(
            "/top-headlines",
            get(|| async { Json(json!({"status": "ok", "totalResults": 0, "articles": []})) }),
        ))
        .await;
        let config = test_config(&base);
        let fetcher = HttpFetcher::new().unwrap();

        let mut panel = NewsPanel::mount("bbc", &config, &fetcher);
        panel.settle().await;

        let view = panel.view();
        assert_eq!(view.key, "bbc");
        assert_eq!(
            view.view,
            PanelView::Ready(Headlines {
                title: "BBC",
                featured: None,
                articles: vec![],
            })
        );
    }

    #[tokio::test]
    async fn test_provider_error_is_shown() {
        let base = serve(Router::new()).await;
        let config = test_config(&base);
        let fetcher = HttpFetcher::new().unwrap();

        let mut panel = NewsPanel::mount("omocoro", &config, &fetcher);
        panel.settle().await;
        assert_eq!(
            panel.view().view,
            PanelView::Error {
                message: "HTTP error! Status: 404".into()
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_key_renders_no_data() {
        let config = test_config("http://127.0.0.1:1");
        let fetcher = HttpFetcher::new().unwrap();

        let mut panel = NewsPanel::mount("cnn", &config, &fetcher);
        panel.settle().await;
        assert_eq!(panel.view().view, PanelView::NoData);
    }
}
