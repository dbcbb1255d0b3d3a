//! JSON snapshot of what the page showed.
//!
//! The file mirrors [`PageView`]: each panel carries a `status` of
//! `loading`, `error`, `no_data` or `ready`, with the panel content inlined
//! when ready.

use crate::page::PageView;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `page` to `{output_dir}/dashboard.json`.
#[instrument(level = "info", skip_all, fields(%output_dir))]
pub async fn write_snapshot(page: &PageView, output_dir: &str) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(page)?;
    let path = format!("{}/dashboard.json", output_dir.trim_end_matches('/'));

    if let Err(e) = fs::write(&path, json).await {
        error!(%path, error = %e, "Failed to write JSON snapshot");
        return Err(e.into());
    }
    info!(%path, "Wrote JSON snapshot");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::PanelView;
    use crate::panels::news::NewsView;
    use serde_json::{Value, json};

    fn page() -> PageView {
        PageView {
            generated_at: "2026-10-18T10:30:00+00:00".into(),
            banner: "MAHOOO!",
            sweden: PanelView::Loading,
            japan: PanelView::Error {
                message: "HTTP error! Status: 401".into(),
            },
            news_columns: vec![vec![NewsView {
                key: "cnn".into(),
                view: PanelView::NoData,
            }]],
            photos: PanelView::Loading,
        }
    }

    #[tokio::test]
    async fn test_write_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();

        let path = write_snapshot(&page(), dir).await.unwrap();
        let written: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(written["banner"], "MAHOOO!");
        assert_eq!(written["sweden"], json!({"status": "loading"}));
        assert_eq!(
            written["japan"],
            json!({"status": "error", "message": "HTTP error! Status: 401"})
        );
        assert_eq!(
            written["news_columns"][0][0],
            json!({"key": "cnn", "view": {"status": "no_data"}})
        );
    }

    #[tokio::test]
    async fn test_write_snapshot_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(write_snapshot(&page(), missing.to_str().unwrap()).await.is_err());
    }
}
