//! Wire shapes for the parts of the YouTube Data API v3 we read.
//!
//! Only the fields the feeds use are modelled, and every one of them is
//! optional or defaulted: upstream omits fields freely (no `high` thumbnail
//! for some uploads, no `contentDetails` unless asked for, ...).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

impl Thumbnails {
    /// Largest available thumbnail, `high` first.
    pub fn best_url(&self) -> String {
        [&self.high, &self.medium, &self.default]
            .into_iter()
            .flatten()
            .map(|t| t.url.clone())
            .find(|url| !url.is_empty())
            .unwrap_or_default()
    }

    pub fn default_url(&self) -> String {
        self.default
            .as_ref()
            .map(|t| t.url.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDetails {
    #[serde(default)]
    pub duration: String, // ISO 8601, "PT5M17S"
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    #[serde(default)]
    pub id: String,
    pub snippet: Option<Snippet>,
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchId {
    #[serde(default)]
    pub video_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub id: SearchId,
    #[serde(default)]
    pub snippet: Snippet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelItem {
    #[serde(default)]
    pub id: String,
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_item_tolerates_missing_fields() {
        let resp: SearchListResponse = serde_json::from_value(json!({
            "kind": "youtube#searchListResponse",
            "items": [
                { "id": { "kind": "youtube#video", "videoId": "abc" } },
                { "id": {}, "snippet": { "title": "no id" } }
            ]
        }))
        .unwrap();

        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].id.video_id, "abc");
        assert_eq!(resp.items[0].snippet.title, "");
        assert_eq!(resp.items[1].id.video_id, "");
    }

    #[test]
    fn missing_items_means_empty_list() {
        let resp: VideoListResponse = serde_json::from_value(json!({ "kind": "x" })).unwrap();
        assert!(resp.items.is_empty());
    }

    #[test]
    fn best_url_prefers_high_then_falls_back() {
        let t: Thumbnails = serde_json::from_value(json!({
            "default": { "url": "d.jpg", "width": 120, "height": 90 },
            "medium": { "url": "m.jpg" }
        }))
        .unwrap();
        assert_eq!(t.best_url(), "m.jpg");
        assert_eq!(t.default_url(), "d.jpg");
        assert_eq!(Thumbnails::default().best_url(), "");
    }
}
