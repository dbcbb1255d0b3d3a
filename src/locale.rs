//! The two regional contexts the dashboard shows side by side.

use crate::extract::{PostProcess, TriviaRule};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

/// A supported locale. Immutable configuration for a day panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Locale {
    Sweden,
    Japan,
}

impl Locale {
    /// IANA zone used for the clock and the day key. Stockholm observes DST.
    pub fn timezone(self) -> Tz {
        match self {
            Locale::Sweden => chrono_tz::Europe::Stockholm,
            Locale::Japan => chrono_tz::Asia::Tokyo,
        }
    }

    /// BCP 47 tag of the locale's language.
    pub fn language_tag(self) -> &'static str {
        match self {
            Locale::Sweden => "sv-SE",
            Locale::Japan => "ja-JP",
        }
    }

    /// Wikipedia language edition queried for day trivia.
    pub fn wiki_lang(self) -> &'static str {
        match self {
            Locale::Sweden => "sv",
            Locale::Japan => "ja",
        }
    }

    /// City passed to the weather provider.
    pub fn weather_city(self) -> &'static str {
        match self {
            Locale::Sweden => "Stockholm",
            Locale::Japan => "Tokyo",
        }
    }

    /// Flag emoji shown at the start of the day strip.
    pub fn flag(self) -> &'static str {
        match self {
            Locale::Sweden => "🇸🇪",
            Locale::Japan => "🇯🇵",
        }
    }

    /// Where the trivia line lives in this locale's "day" article.
    pub fn trivia_rule(self) -> TriviaRule {
        match self {
            Locale::Sweden => TriviaRule {
                heading_tag: "h3",
                heading_text: "I den svenska almanackan",
                post: PostProcess::StripPrefix("Nuvarande – "),
            },
            Locale::Japan => TriviaRule {
                heading_tag: "h2",
                heading_text: "記念日・年中行事",
                post: PostProcess::CutAfter('）'),
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Sweden => f.write_str("Sweden"),
            Locale::Japan => f.write_str("Japan"),
        }
    }
}
