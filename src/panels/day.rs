//! Locale day strip: flag, date, clock, weather and one line of day trivia.

use crate::clock::{ClockReading, encoded_day_key, read_clock};
use crate::config::DashboardConfig;
use crate::extract::extract_trivia;
use crate::fetch::{FetchState, HttpFetcher, Resource};
use crate::locale::Locale;
use crate::models::{WeatherReport, WikiQuery};
use crate::panels::PanelView;
use crate::utils::redact_url;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

const WEATHER_ICON_BASE: &str = "https://openweathermap.org/img/wn";
const NO_CONDITION: &str = "n/a";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayInfo {
    pub locale: Locale,
    pub language_tag: &'static str,
    pub flag: &'static str,
    #[serde(flatten)]
    pub clock: ClockReading,
    pub weather: WeatherCell,
    pub trivia: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherCell {
    pub label: String,
    pub icon_url: Option<String>,
}

impl WeatherCell {
    fn from_report(report: &WeatherReport) -> Self {
        match report.primary() {
            Some(condition) => Self {
                label: condition.main.clone(),
                icon_url: Some(format!("{}/{}.png", WEATHER_ICON_BASE, condition.icon)),
            },
            None => Self {
                label: NO_CONDITION.to_string(),
                icon_url: None,
            },
        }
    }
}

/// Day strip for one locale. Owns the weather and trivia requests.
#[derive(Debug)]
pub struct DayPanel {
    locale: Locale,
    weather: Resource<WeatherReport>,
    trivia: Resource<WikiQuery>,
}

impl DayPanel {
    /// Mount the strip and start both of its requests.
    ///
    /// # Arguments
    ///
    /// * `locale` - Which country the strip shows
    /// * `config` - Source of the weather and Wikipedia URLs
    /// * `fetcher` - Shared HTTP client
    /// * `now` - Instant used to pick the trivia article for the local day
    ///
    /// # Returns
    ///
    /// The mounted panel. Both requests are in flight; [`DayPanel::view`]
    /// reports `Loading` until each has settled.
    #[instrument(level = "info", skip_all, fields(%locale))]
    pub fn mount(
        locale: Locale,
        config: &DashboardConfig,
        fetcher: &HttpFetcher,
        now: DateTime<Utc>,
    ) -> Self {
        let weather = Resource::spawn(fetcher, config.weather_url(locale));
        let trivia = Resource::spawn(
            fetcher,
            config.trivia_url(locale, &encoded_day_key(locale, now)),
        );
        Self {
            locale,
            weather,
            trivia,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Follow the local date: refetch trivia when the day key changed.
    pub fn refresh(&mut self, config: &DashboardConfig, now: DateTime<Utc>) -> bool {
        let url = config.trivia_url(self.locale, &encoded_day_key(self.locale, now));
        let restarted = self.trivia.set_url(url);
        if restarted {
            debug!(locale = %self.locale, url = %redact_url(self.trivia.url()), "Day changed; fetching new trivia");
        }
        restarted
    }

    /// Wait for both requests. They run in parallel and in no particular order.
    pub async fn settle(&mut self) {
        futures::join!(self.weather.settled(), self.trivia.settled());
    }

    /// Snapshot the strip. The clock cells are read from `now`, not from mount time.
    pub fn view(&self, now: DateTime<Utc>) -> PanelView<DayInfo> {
        join_view(self.locale, &self.weather.state(), &self.trivia.state(), now)
    }
}

/// Loading until both are done; the weather error wins over the trivia error.
fn join_view(
    locale: Locale,
    weather: &FetchState<WeatherReport>,
    trivia: &FetchState<WikiQuery>,
    now: DateTime<Utc>,
) -> PanelView<DayInfo> {
    if weather.is_loading() || trivia.is_loading() {
        return PanelView::Loading;
    }
    if let Some(message) = weather.error().or(trivia.error()) {
        return PanelView::Error {
            message: message.to_string(),
        };
    }
    match (weather.data(), trivia.data()) {
        (Some(report), Some(query)) => PanelView::Ready(DayInfo {
            locale,
            language_tag: locale.language_tag(),
            flag: locale.flag(),
            clock: read_clock(locale, now),
            weather: WeatherCell::from_report(report),
            trivia: extract_trivia(query.first_extract(), &locale.trivia_rule()),
        }),
        _ => PanelView::Loading,
    }
}
