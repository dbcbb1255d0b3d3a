//! Dashboard panels.
//!
//! Each panel owns its own [`Resource`](crate::fetch::Resource)s; mounting
//! starts the requests and dropping the panel cancels them. No panel reads
//! another panel's data.
//!
//! | Panel | Module | Requests |
//! |-------|--------|----------|
//! | Day strip | [`day`] | weather + day trivia, joined |
//! | Headlines | [`news`] | one news source |
//! | Photo grid | [`photos`] | hashtag top media |
//!
//! Panels expose their state as a [`PanelView`], which the output modules
//! turn into HTML and JSON.

use crate::fetch::FetchState;
use serde::Serialize;

pub mod day;
pub mod news;
pub mod photos;

/// What a panel shows at render time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelView<T> {
    Loading,
    Error { message: String },
    /// The panel has nothing to request (unknown news source).
    NoData,
    Ready(T),
}

impl<T> PanelView<T> {
    /// Map a settled fetch state through `f`.
    pub fn from_state<S>(state: &FetchState<S>, f: impl FnOnce(&S) -> T) -> Self {
        match state {
            FetchState::Loading => PanelView::Loading,
            FetchState::Failed(message) => PanelView::Error {
                message: message.clone(),
            },
            FetchState::Ready(data) => PanelView::Ready(f(data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Count {
        n: usize,
    }

    #[test]
    fn test_from_state() {
        let view = PanelView::from_state(&FetchState::Ready(vec![1, 2]), |v| Count { n: v.len() });
        assert_eq!(view, PanelView::Ready(Count { n: 2 }));

        let view: PanelView<Count> =
            PanelView::from_state(&FetchState::<Vec<u8>>::Failed("boom".into()), |_| unreachable!());
        assert_eq!(view, PanelView::Error { message: "boom".into() });
    }

    #[test]
    fn test_serialized_status_tag() {
        let ready = serde_json::to_value(PanelView::Ready(Count { n: 3 })).unwrap();
        assert_eq!(ready, json!({"status": "ready", "n": 3}));

        let loading = serde_json::to_value(PanelView::<Count>::Loading).unwrap();
        assert_eq!(loading, json!({"status": "loading"}));

        let error = serde_json::to_value(PanelView::<Count>::Error { message: "x".into() }).unwrap();
        assert_eq!(error, json!({"status": "error", "message": "x"}));
    }
}
