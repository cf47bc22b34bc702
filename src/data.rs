use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// The data half of a card's input, as it arrives from a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub original_url: Option<String>,
}

impl NewsItem {
    /// Text handed to the narration collaborator: title followed by summary.
    pub fn narration_text(&self) -> String {
        format!("{}{}", self.title, self.summary)
    }
}

/// Navigation to a detail view. The caller owns routing.
pub trait DetailViewService: Send + Sync {
    fn request_detail(&self, item_id: &str);
}

/// Narration playback. The caller owns the audio engine and reports the
/// current state back through the card's `is_playing` input.
pub trait PlaybackService: Send + Sync {
    fn toggle_playback(&self, item_id: &str, narration: &str);
}

/// Requests raised by card collaborators, drained by the host's event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardRequest {
    Detail { item_id: String },
    TogglePlayback { item_id: String, narration: String },
}

pub struct ChannelDetailService {
    tx: Sender<CardRequest>,
}

impl ChannelDetailService {
    pub fn new(tx: Sender<CardRequest>) -> Self {
        Self { tx }
    }
}

impl DetailViewService for ChannelDetailService {
    fn request_detail(&self, item_id: &str) {
        let _ = self.tx.send(CardRequest::Detail {
            item_id: item_id.to_string(),
        });
    }
}

pub struct ChannelPlaybackService {
    tx: Sender<CardRequest>,
}

impl ChannelPlaybackService {
    pub fn new(tx: Sender<CardRequest>) -> Self {
        Self { tx }
    }
}

impl PlaybackService for ChannelPlaybackService {
    fn toggle_playback(&self, item_id: &str, narration: &str) {
        let _ = self.tx.send(CardRequest::TogglePlayback {
            item_id: item_id.to_string(),
            narration: narration.to_string(),
        });
    }
}

/// Records every request it receives. Used by tests and dry runs.
#[derive(Default)]
pub struct MockDetailService {
    calls: Mutex<Vec<String>>,
}

impl MockDetailService {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl DetailViewService for MockDetailService {
    fn request_detail(&self, item_id: &str) {
        self.calls.lock().push(item_id.to_string());
    }
}

#[derive(Default)]
pub struct MockPlaybackService {
    calls: Mutex<Vec<(String, String)>>,
}

impl MockPlaybackService {
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

impl PlaybackService for MockPlaybackService {
    fn toggle_playback(&self, item_id: &str, narration: &str) {
        self.calls
            .lock()
            .push((item_id.to_string(), narration.to_string()));
    }
}

/// Reads a JSON array of news items.
pub fn load_feed_file(path: &Path) -> Result<Vec<NewsItem>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read feed file at {}", path.display()))?;
    let items: Vec<NewsItem> = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse feed file at {}", path.display()))?;
    anyhow::ensure!(
        items.iter().all(|item| !item.id.trim().is_empty()),
        "feed: every item needs a non-empty id"
    );
    Ok(items)
}

/// Built-in feed shown when no feed file is given.
pub fn sample_feed() -> Vec<NewsItem> {
    vec![
        NewsItem {
            id: "news-42".into(),
            title: "Rust 2024 edition lands on stable".into(),
            summary: " The new edition tightens lifetime capture rules and reserves the gen keyword."
                .into(),
            author: "Ferris".into(),
            published: "Oct 18, 2026".into(),
            category: "Technology".into(),
            image: None,
            read_time: "4 min read".into(),
            original_url: Some("https://blog.rust-lang.org/".into()),
        },
        NewsItem {
            id: "breaking-news-item".into(),
            title: "City council approves riverside park".into(),
            summary: " The plan adds three kilometres of cycle paths along the old docks.".into(),
            author: "A. Reporter".into(),
            published: "Oct 17, 2026".into(),
            category: "Local".into(),
            image: Some("https://images.invalid/park.jpg".into()),
            read_time: "2 min read".into(),
            original_url: None,
        },
        NewsItem {
            id: "story-0001".into(),
            title: "Markets close flat ahead of rate decision".into(),
            summary: " Traders stayed cautious as central bank officials meet this week.".into(),
            author: "Desk".into(),
            published: "Oct 16, 2026".into(),
            category: "Business".into(),
            image: None,
            read_time: "3 min read".into(),
            original_url: Some("https://example.com/markets".into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use tempfile::tempdir;

    #[test]
    fn narration_concatenates_title_and_summary() {
        let item = NewsItem {
            summary: " body".into(),
            ..sample_feed().remove(0)
        };
        assert_eq!(item.narration_text(), "Rust 2024 edition lands on stable body");
    }

    #[test]
    fn channel_services_forward_requests() {
        let (tx, rx) = unbounded();
        ChannelDetailService::new(tx.clone()).request_detail("a");
        ChannelPlaybackService::new(tx).toggle_playback("b", "text");
        assert_eq!(
            rx.try_recv().unwrap(),
            CardRequest::Detail {
                item_id: "a".into()
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            CardRequest::TogglePlayback {
                item_id: "b".into(),
                narration: "text".into()
            }
        );
    }

    #[test]
    fn feed_file_fills_optional_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.json");
        fs::write(&path, r#"[{"id": "x1", "title": "Only a title"}]"#).unwrap();
        let items = load_feed_file(&path).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].image, None);
        assert_eq!(items[0].original_url, None);
        assert!(items[0].summary.is_empty());
    }

    #[test]
    fn feed_file_rejects_blank_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.json");
        fs::write(&path, r#"[{"id": " ", "title": "t"}]"#).unwrap();
        assert!(load_feed_file(&path).is_err());
    }
}
