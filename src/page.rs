//! Page composer: mounts every panel and arranges their views.
//!
//! Layout: a header row with the Sweden strip, the banner and the Japan
//! strip; below it the news panels two per column, then the photo grid.

use crate::config::DashboardConfig;
use crate::fetch::HttpFetcher;
use crate::locale::Locale;
use crate::panels::PanelView;
use crate::panels::day::{DayInfo, DayPanel};
use crate::panels::news::{NewsPanel, NewsView};
use crate::panels::photos::{PhotoGrid, PhotoPanel};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, instrument};

pub const BANNER: &str = "MAHOOO!";
const PANELS_PER_COLUMN: usize = 2;

/// Everything the outputs render, captured at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub generated_at: String,
    pub banner: &'static str,
    pub sweden: PanelView<DayInfo>,
    pub japan: PanelView<DayInfo>,
    pub news_columns: Vec<Vec<NewsView>>,
    pub photos: PanelView<PhotoGrid>,
}

/// The mounted page. Dropping it cancels every in-flight request.
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    sweden: DayPanel,
    japan: DayPanel,
    news_columns: Vec<Vec<NewsPanel>>,
    photos: PhotoPanel,
}

impl Dashboard {
    /// Mount every panel. All requests start here and run concurrently.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoints, credentials, hashtag and news keys
    /// * `fetcher` - Shared HTTP client
    /// * `now` - Instant used for the day panels' trivia lookups
    ///
    /// # Returns
    ///
    /// The mounted dashboard. Call [`Dashboard::settle`] before rendering a
    /// complete page; an earlier [`Dashboard::view`] shows loading panels.
    #[instrument(level = "info", skip_all)]
    pub fn mount(config: DashboardConfig, fetcher: &HttpFetcher, now: DateTime<Utc>) -> Self {
        let sweden = DayPanel::mount(Locale::Sweden, &config, fetcher, now);
        let japan = DayPanel::mount(Locale::Japan, &config, fetcher, now);
        let news_columns = config
            .news_sources
            .chunks(PANELS_PER_COLUMN)
            .map(|keys| {
                keys.iter()
                    .map(|key| NewsPanel::mount(key, &config, fetcher))
                    .collect()
            })
            .collect();
        let photos = PhotoPanel::mount(&config, fetcher);

        info!(news_panels = config.news_sources.len(), "Dashboard mounted");
        Self {
            config,
            sweden,
            japan,
            news_columns,
            photos,
        }
    }

    /// Re-derive time-dependent request URLs. Returns how many requests restarted.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> usize {
        [&mut self.sweden, &mut self.japan]
            .into_iter()
            .filter_map(|panel| panel.refresh(&self.config, now).then_some(panel.locale()))
            .inspect(|locale| info!(%locale, "Trivia day rolled over"))
            .count()
    }

    /// Wait until every panel has settled. Panels settle independently.
    pub async fn settle(&mut self) {
        let news = join_all(
            self.news_columns
                .iter_mut()
                .flatten()
                .map(|panel| panel.settle()),
        );
        futures::join!(self.sweden.settle(), self.japan.settle(), news, self.photos.settle());
    }

    pub fn view(&self, now: DateTime<Utc>) -> PageView {
        PageView {
            generated_at: now.to_rfc3339(),
            banner: BANNER,
            sweden: self.sweden.view(now),
            japan: self.japan.view(now),
            news_columns: self
                .news_columns
                .iter()
                .map(|column| column.iter().map(NewsPanel::view).collect())
                .collect(),
            photos: self.photos.view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::fetch::testing::serve;
    use crate::panels::news::Headlines;
    use axum::{Json, Router, routing::get};
    use chrono::TimeZone;
    use serde_json::json;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 10, 30, 0).unwrap()
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/weather",
                get(|| async { Json(json!({"weather": [{"main": "Snow", "icon": "13d"}]})) }),
            )
            .route(
                "/{lang}/api.php",
                get(|| async { Json(json!({"query": {"pages": {"1": {"extract": ""}}}})) }),
            )
            .route(
                "/everything",
                get(|| async {
                    Json(json!({"articles": [
                        {"title": "Plain", "description": null, "url": "https://n/1", "urlToImage": null},
                        {"title": "Pictured", "description": "d", "url": "https://n/2", "urlToImage": "https://i/2.jpg"}
                    ]}))
                }),
            )
            .route("/{hashtag}/top_media", get(|| async { Json(json!({"data": []})) }))
    }

    #[tokio::test]
    async fn test_every_panel_renders_something() {
        let base = serve(router()).await;
        let fetcher = HttpFetcher::new().unwrap();
        let mut dashboard = Dashboard::mount(test_config(&base), &fetcher, noon());
        dashboard.settle().await;

        let page = dashboard.view(noon());
        assert_eq!(page.banner, "MAHOOO!");
        assert!(matches!(page.sweden, PanelView::Ready(_)));
        assert!(matches!(page.japan, PanelView::Ready(_)));
        assert_eq!(page.news_columns.len(), 2);
        assert_eq!(page.news_columns[0].len(), 2);

        // bbc uses /top-headlines, which this router does not serve
        let bbc = &page.news_columns[0][0];
        assert_eq!(bbc.key, "bbc");
        assert_eq!(
            bbc.view,
            PanelView::Error {
                message: "HTTP error! Status: 404".into()
            }
        );

        let PanelView::Ready(Headlines { featured, articles, .. }) = &page.news_columns[1][1].view
        else {
            panic!("dpz panel not ready");
        };
        assert_eq!(featured.as_ref().map(|a| a.title.as_str()), Some("Pictured"));
        assert_eq!(articles.len(), 2);

        assert!(matches!(&page.photos, PanelView::Ready(grid) if grid.tiles.is_empty()));
    }

    #[tokio::test]
    async fn test_odd_source_count_leaves_short_last_column() {
        let base = serve(router()).await;
        let fetcher = HttpFetcher::new().unwrap();
        let mut config = test_config(&base);
        config.news_sources = vec!["sweNews".into(), "omocoro".into(), "bogus".into()];

        let mut dashboard = Dashboard::mount(config, &fetcher, noon());
        dashboard.settle().await;
        let page = dashboard.view(noon());

        assert_eq!(page.news_columns.len(), 2);
        assert_eq!(page.news_columns[1].len(), 1);
        assert_eq!(page.news_columns[1][0].view, PanelView::NoData);
    }

    #[tokio::test]
    async fn test_refresh_counts_rolled_over_days() {
        let base = serve(router()).await;
        let fetcher = HttpFetcher::new().unwrap();
        let mut dashboard = Dashboard::mount(test_config(&base), &fetcher, noon());
        dashboard.settle().await;

        assert_eq!(dashboard.refresh(noon()), 0);
        // 16:00 UTC is already the next day in Tokyo but not in Stockholm
        let evening = Utc.with_ymd_and_hms(2026, 10, 18, 16, 0, 0).unwrap();
        assert_eq!(dashboard.refresh(evening), 1);
    }
}
