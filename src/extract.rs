//! Trivia extraction from a Wikipedia "day" article extract.
//!
//! The extract is an HTML fragment. Each locale keeps its observances under a
//! known heading; the first list item in the element that follows that
//! heading is the line we show.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Returned when the fragment holds no usable list item. Not an error.
pub const NO_LIST_ITEMS: &str = "No list items found.";

/// Clean-up applied to the raw list item text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// Keep everything up to and including the first occurrence of the char.
    CutAfter(char),
    /// Drop a literal leading phrase when present.
    StripPrefix(&'static str),
}

/// Locale-specific markup conventions for the trivia section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriviaRule {
    pub heading_tag: &'static str,
    pub heading_text: &'static str,
    pub post: PostProcess,
}

impl PostProcess {
    fn apply(self, text: &str) -> String {
        match self {
            PostProcess::CutAfter(marker) => match text.find(marker) {
                Some(at) => text[..at + marker.len_utf8()].to_string(),
                None => text.to_string(),
            },
            PostProcess::StripPrefix(prefix) => {
                text.strip_prefix(prefix).unwrap_or(text).to_string()
            }
        }
    }
}

/// Extract one trivia line from `fragment`, or [`NO_LIST_ITEMS`].
pub fn extract_trivia(fragment: &str, rule: &TriviaRule) -> String {
    match first_list_item(fragment, rule) {
        Some(item) => rule.post.apply(&item),
        None => {
            debug!(heading = rule.heading_text, "No trivia list item in extract");
            NO_LIST_ITEMS.to_string()
        }
    }
}

fn first_list_item(fragment: &str, rule: &TriviaRule) -> Option<String> {
    let document = Html::parse_document(fragment);
    let heading_selector = Selector::parse(rule.heading_tag).ok()?;
    let item_selector = Selector::parse("li").ok()?;

    let heading = document
        .select(&heading_selector)
        .find(|h| h.text().collect::<String>().trim() == rule.heading_text)?;

    // nextElementSibling: skip text and comment nodes
    let sibling = heading.next_siblings().find_map(ElementRef::wrap)?;
    let item = sibling.select(&item_selector).next()?;

    let text = item.text().collect::<String>().trim().to_string();
    (!text.is_empty()).then_some(text)
}
