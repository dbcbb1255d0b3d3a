//! Photo grid of a hashtag's top media.

use crate::config::DashboardConfig;
use crate::fetch::{HttpFetcher, Resource};
use crate::models::{MediaItem, MediaResponse};
use crate::panels::PanelView;
use serde::Serialize;
use tracing::{debug, instrument};

const CAPTION_LIMIT: usize = 30;
const ELLIPSIS: &str = "[...]";

/// Shorten a caption to [`CAPTION_LIMIT`] characters plus `[...]`.
///
/// Counts Unicode scalar values, so an emoji outside the BMP is one
/// character and is never split in half.
///
/// # Arguments
///
/// * `caption` - Full caption text from the media item
///
/// # Returns
///
/// The caption unchanged when it fits, otherwise its first
/// [`CAPTION_LIMIT`] characters followed by `[...]`.
pub fn truncate_caption(caption: &str) -> String {
    if caption.chars().count() > CAPTION_LIMIT {
        let head: String = caption.chars().take(CAPTION_LIMIT).collect();
        format!("{head}{ELLIPSIS}")
    } else {
        caption.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoGrid {
    pub heading: String,
    pub tiles: Vec<PhotoTile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoTile {
    pub id: String,
    pub image_url: String,
    pub permalink: String,
    /// Full caption, used as alt text.
    pub alt: String,
    /// Truncated caption shown over the image.
    pub caption: String,
}

impl PhotoTile {
    /// `None` when the item has nothing displayable.
    fn from_item(item: &MediaItem) -> Option<Self> {
        let Some(image_url) = item.display_url() else {
            debug!(id = %item.id, media_type = ?item.media_type, "Skipping media item without image");
            return None;
        };
        let caption = item.caption.as_deref().unwrap_or("");
        Some(Self {
            id: item.id.clone(),
            image_url: image_url.to_string(),
            permalink: item.permalink.clone(),
            alt: caption.to_string(),
            caption: truncate_caption(caption),
        })
    }
}

/// Hashtag photo grid. Owns the top-media request.
#[derive(Debug)]
pub struct PhotoPanel {
    heading: String,
    media: Resource<MediaResponse>,
}

impl PhotoPanel {
    /// Mount the grid and request the hashtag's top media.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the hashtag, the Graph API base and the credentials
    /// * `fetcher` - Shared HTTP client
    #[instrument(level = "info", skip_all, fields(hashtag = %config.hashtag.label))]
    pub fn mount(config: &DashboardConfig, fetcher: &HttpFetcher) -> Self {
        Self {
            heading: config.hashtag.label.clone(),
            media: Resource::spawn(fetcher, config.media_url()),
        }
    }

    pub async fn settle(&mut self) {
        self.media.settled().await;
    }

    /// Snapshot the grid. Items with nothing displayable are left out.
    pub fn view(&self) -> PanelView<PhotoGrid> {
        PanelView::from_state(&self.media.state(), |media| PhotoGrid {
            heading: self.heading.clone(),
            tiles: media.data.iter().filter_map(PhotoTile::from_item).collect(),
        })
    }
}
