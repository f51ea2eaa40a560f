//! The three page flows: trending, keyword search, and watch suggestions.
//!
//! Each flow is a short chain of sequential calls. Nothing is retried and
//! nothing is partially returned: the first failing call aborts the chain and
//! the caller keeps whatever it was already showing.

use crate::model::youtube::{SearchItem, VideoItem};
use crate::model::{Feed, Route, Video, default_thumbnail};
use crate::sys::gemini::QueryGenerator;
use crate::sys::yt::{self, VideoApi};
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const FALLBACK_TITLE: &str = "related videos";

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub region_code: String,
    pub trending_limit: u32,
    pub search_limit: u32,
    pub suggestion_limit: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            region_code: "IN".to_string(),
            trending_limit: 12,
            search_limit: 12,
            suggestion_limit: 15,
        }
    }
}

#[derive(Clone)]
pub struct Discovery {
    api: Arc<dyn VideoApi>,
    generator: Arc<dyn QueryGenerator>,
    settings: FeedSettings,
}

impl Discovery {
    pub fn new(
        api: Arc<dyn VideoApi>,
        generator: Arc<dyn QueryGenerator>,
        settings: FeedSettings,
    ) -> Self {
        Self {
            api,
            generator,
            settings,
        }
    }

    pub async fn load(&self, route: &Route) -> Result<Feed> {
        match route {
            Route::Home => self.trending().await.map(Feed::Trending),
            Route::Search { keyword } => self
                .search(keyword, self.settings.search_limit)
                .await
                .map(Feed::Search),
            Route::Watch { id } => self.suggestions(id).await,
        }
    }

    pub async fn trending(&self) -> Result<Vec<Video>> {
        let resp = self
            .api
            .most_popular(&self.settings.region_code, self.settings.trending_limit)
            .await?;

        let channel_ids = unique_channel_ids(
            resp.items
                .iter()
                .filter_map(|item| item.snippet.as_ref())
                .map(|s| s.channel_id.as_str()),
        );
        // cards render fine without icons
        let icons = match self.channel_icons(&channel_ids).await {
            Ok(icons) => icons,
            Err(e) => {
                log::warn!("Trending without channel icons: {:#}", e);
                HashMap::new()
            }
        };

        Ok(resp
            .items
            .iter()
            .map(|item| trending_record(item, &icons))
            .collect())
    }

    /// search -> durations -> channel icons -> merge.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<Video>> {
        let items = self.api.search(query, limit).await?.items;

        let video_ids: Vec<String> = items
            .iter()
            .map(|i| i.id.video_id.clone())
            .filter(|id| !id.is_empty())
            .collect();
        let channel_ids =
            unique_channel_ids(items.iter().map(|i| i.snippet.channel_id.as_str()));

        let durations = self.durations(&video_ids).await?;
        let icons = self.channel_icons(&channel_ids).await?;

        Ok(merge_records(&items, &durations, &icons))
    }

    pub async fn suggestions(&self, video_id: &str) -> Result<Feed> {
        let details = self.api.videos(&[video_id.to_string()], "snippet").await?;
        let title = details
            .items
            .first()
            .and_then(|item| item.snippet.as_ref())
            .map(|s| s.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());

        let query = self.generator.suggest_query(&title).await?;

        let suggestions = self
            .search(&query, self.settings.suggestion_limit)
            .await?
            .into_iter()
            .filter(|v| v.id != video_id)
            .collect();

        Ok(Feed::Watch {
            title,
            query,
            suggestions,
        })
    }

    async fn durations(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let resp = self.api.videos(ids, "contentDetails").await?;
        Ok(resp
            .items
            .into_iter()
            .map(|v| {
                let iso = v.content_details.map(|c| c.duration).unwrap_or_default();
                (v.id, yt::format_duration(&iso))
            })
            .collect())
    }

    async fn channel_icons(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let resp = self.api.channels(ids).await?;
        Ok(resp
            .items
            .into_iter()
            .map(|ch| {
                let icon = ch
                    .snippet
                    .map(|s| s.thumbnails.default_url())
                    .unwrap_or_default();
                (ch.id, icon)
            })
            .collect())
    }
}

/// Channel ids in first-seen order, without repeats or blanks.
fn unique_channel_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| !id.is_empty() && seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Zips search results with looked-up durations and icons, keeping search order.
pub fn merge_records(
    items: &[SearchItem],
    durations: &HashMap<String, String>,
    icons: &HashMap<String, String>,
) -> Vec<Video> {
    items
        .iter()
        .map(|item| {
            let id = item.id.video_id.clone();
            let snippet = &item.snippet;
            Video {
                title: snippet.title.clone(),
                thumbnail_url: thumbnail_or_default(snippet.thumbnails.best_url(), &id),
                channel: snippet.channel_title.clone(),
                channel_icon: icons.get(&snippet.channel_id).cloned().unwrap_or_default(),
                duration: durations
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| yt::format_duration("")),
                id,
            }
        })
        .collect()
}

fn trending_record(item: &VideoItem, icons: &HashMap<String, String>) -> Video {
    let snippet = item.snippet.clone().unwrap_or_default();
    let iso = item
        .content_details
        .as_ref()
        .map(|c| c.duration.as_str())
        .unwrap_or_default();

    Video {
        id: item.id.clone(),
        title: snippet.title,
        thumbnail_url: thumbnail_or_default(snippet.thumbnails.best_url(), &item.id),
        channel: snippet.channel_title,
        channel_icon: icons.get(&snippet.channel_id).cloned().unwrap_or_default(),
        duration: yt::format_duration(iso),
    }
}

fn thumbnail_or_default(url: String, id: &str) -> String {
    if url.is_empty() && !id.is_empty() {
        default_thumbnail(id)
    } else {
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::youtube::{ChannelListResponse, SearchListResponse, VideoListResponse};
    use anyhow::bail;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Canned upstream responses. `None` means the call fails.
    #[derive(Default)]
    struct FakeApi {
        popular: Option<Value>,
        search: Option<Value>,
        snippet: Option<Value>,
        content: Option<Value>,
        channels: Option<Value>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn reply<T: serde::de::DeserializeOwned>(&self, call: String, v: &Option<Value>) -> Result<T> {
            self.calls.lock().unwrap().push(call.clone());
            match v {
                Some(v) => Ok(serde_json::from_value(v.clone())?),
                None => bail!("upstream failure on {}", call),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VideoApi for FakeApi {
        async fn most_popular(&self, region: &str, max: u32) -> Result<VideoListResponse> {
            self.reply(format!("popular:{}:{}", region, max), &self.popular)
        }
        async fn search(&self, q: &str, max: u32) -> Result<SearchListResponse> {
            self.reply(format!("search:{}:{}", q, max), &self.search)
        }
        async fn videos(&self, ids: &[String], part: &str) -> Result<VideoListResponse> {
            let call = format!("videos:{}:{}", part, ids.join(","));
            if part == "snippet" {
                self.reply(call, &self.snippet)
            } else {
                self.reply(call, &self.content)
            }
        }
        async fn channels(&self, ids: &[String]) -> Result<ChannelListResponse> {
            self.reply(format!("channels:{}", ids.join(",")), &self.channels)
        }
    }

    struct FixedQuery(Option<&'static str>, Mutex<Vec<String>>);

    #[async_trait]
    impl QueryGenerator for FixedQuery {
        async fn suggest_query(&self, title: &str) -> Result<String> {
            self.1.lock().unwrap().push(title.to_string());
            match self.0 {
                Some(q) => Ok(q.to_string()),
                None => bail!("model unavailable"),
            }
        }
    }

    fn search_json() -> Value {
        json!({
            "items": [
                {
                    "id": { "kind": "youtube#video", "videoId": "v1" },
                    "snippet": {
                        "channelId": "c1", "channelTitle": "Chan One", "title": "First",
                        "thumbnails": { "high": { "url": "https://img/v1.jpg" } }
                    }
                },
                {
                    "id": { "kind": "youtube#video", "videoId": "v2" },
                    "snippet": {
                        "channelId": "c2", "channelTitle": "Chan Two", "title": "Second",
                        "thumbnails": { "high": { "url": "https://img/v2.jpg" } }
                    }
                },
                {
                    "id": { "kind": "youtube#video", "videoId": "v3" },
                    "snippet": {
                        "channelId": "c1", "channelTitle": "Chan One", "title": "Third",
                        "thumbnails": { "high": { "url": "https://img/v3.jpg" } }
                    }
                }
            ]
        })
    }

    fn content_json() -> Value {
        // deliberately out of order, v3 missing
        json!({
            "items": [
                { "id": "v2", "contentDetails": { "duration": "PT1H2M3S" } },
                { "id": "v1", "contentDetails": { "duration": "PT4M5S" } }
            ]
        })
    }

    fn channels_json() -> Value {
        // c2 has no thumbnails at all
        json!({
            "items": [
                { "id": "c1", "snippet": { "title": "Chan One",
                    "thumbnails": { "default": { "url": "https://img/c1.jpg" } } } },
                { "id": "c2", "snippet": { "title": "Chan Two" } }
            ]
        })
    }

    fn discovery(api: FakeApi, generator: FixedQuery) -> (Discovery, Arc<FakeApi>, Arc<FixedQuery>) {
        let api = Arc::new(api);
        let generator = Arc::new(generator);
        (
            Discovery::new(api.clone(), generator.clone(), FeedSettings::default()),
            api,
            generator,
        )
    }

    fn no_query() -> FixedQuery {
        FixedQuery(None, Mutex::new(Vec::new()))
    }

    #[tokio::test]
    async fn search_merges_positionally() {
        let (d, api, _) = discovery(
            FakeApi {
                search: Some(search_json()),
                content: Some(content_json()),
                channels: Some(channels_json()),
                ..Default::default()
            },
            no_query(),
        );

        let videos = d.search("rust", 12).await.unwrap();

        assert_eq!(videos.len(), 3);
        assert_eq!(
            videos[0],
            Video {
                id: "v1".into(),
                title: "First".into(),
                thumbnail_url: "https://img/v1.jpg".into(),
                channel: "Chan One".into(),
                channel_icon: "https://img/c1.jpg".into(),
                duration: "4:05".into(),
            }
        );
        assert_eq!(videos[1].id, "v2");
        assert_eq!(videos[1].duration, "1:02:03");
        assert_eq!(videos[2].title, "Third");
        assert_eq!(videos[2].channel_icon, "https://img/c1.jpg");

        assert_eq!(
            api.calls(),
            vec![
                "search:rust:12",
                "videos:contentDetails:v1,v2,v3",
                "channels:c1,c2",
            ]
        );
    }

    #[tokio::test]
    async fn missing_icon_and_duration_degrade_to_defaults() {
        let (d, _, _) = discovery(
            FakeApi {
                search: Some(search_json()),
                content: Some(content_json()),
                channels: Some(channels_json()),
                ..Default::default()
            },
            no_query(),
        );

        let videos = d.search("rust", 12).await.unwrap();
        assert_eq!(videos[1].channel_icon, "");
        assert_eq!(videos[2].duration, "0:00");
    }

    #[tokio::test]
    async fn empty_search_skips_detail_calls() {
        let (d, api, _) = discovery(
            FakeApi {
                search: Some(json!({ "items": [] })),
                ..Default::default()
            },
            no_query(),
        );

        assert!(d.search("nothing", 12).await.unwrap().is_empty());
        assert_eq!(api.calls(), vec!["search:nothing:12"]);
    }

    #[tokio::test]
    async fn any_failing_stage_aborts_the_chain() {
        let (d, api, _) = discovery(
            FakeApi {
                search: Some(search_json()),
                content: Some(content_json()),
                channels: None,
                ..Default::default()
            },
            no_query(),
        );

        assert!(d.search("rust", 12).await.is_err());
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn trending_uses_chart_and_channel_icons() {
        let (d, api, _) = discovery(
            FakeApi {
                popular: Some(json!({
                    "items": [
                        { "id": "t1",
                          "snippet": { "channelId": "c1", "channelTitle": "Chan One", "title": "Hot",
                                       "thumbnails": { "default": { "url": "https://img/t1-small.jpg" },
                                                       "high": { "url": "https://img/t1.jpg" } } },
                          "contentDetails": { "duration": "PT12M" } },
                        { "id": "t2",
                          "snippet": { "channelId": "c9", "channelTitle": "Nobody", "title": "Cold" } }
                    ]
                })),
                channels: Some(channels_json()),
                ..Default::default()
            },
            no_query(),
        );

        let videos = d.trending().await.unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].thumbnail_url, "https://img/t1.jpg");
        assert_eq!(videos[0].channel_icon, "https://img/c1.jpg");
        assert_eq!(videos[0].duration, "12:00");
        assert_eq!(videos[1].channel_icon, "");
        assert_eq!(videos[1].duration, "0:00");
        assert_eq!(videos[1].thumbnail_url, default_thumbnail("t2"));
        assert_eq!(api.calls(), vec!["popular:IN:12", "channels:c1,c9"]);
    }

    #[tokio::test]
    async fn trending_survives_a_failed_icon_lookup() {
        let (d, api, _) = discovery(
            FakeApi {
                popular: Some(json!({
                    "items": [
                        { "id": "t1",
                          "snippet": { "channelId": "c1", "channelTitle": "Chan One", "title": "Hot" },
                          "contentDetails": { "duration": "PT3M7S" } }
                    ]
                })),
                channels: None,
                ..Default::default()
            },
            no_query(),
        );

        let videos = d.trending().await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "Hot");
        assert_eq!(videos[0].duration, "3:07");
        assert_eq!(videos[0].channel_icon, "");
        assert_eq!(api.calls(), vec!["popular:IN:12", "channels:c1"]);
    }

    #[tokio::test]
    async fn blank_video_ids_stay_out_of_the_duration_lookup() {
        let (d, api, _) = discovery(
            FakeApi {
                search: Some(json!({
                    "items": [
                        { "id": { "kind": "youtube#channel" },
                          "snippet": { "channelId": "c1", "channelTitle": "Chan One", "title": "A channel" } },
                        { "id": { "kind": "youtube#video", "videoId": "v1" },
                          "snippet": { "channelId": "c1", "channelTitle": "Chan One", "title": "First" } }
                    ]
                })),
                content: Some(content_json()),
                channels: Some(channels_json()),
                ..Default::default()
            },
            no_query(),
        );

        let videos = d.search("rust", 12).await.unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[1].duration, "4:05");
        assert_eq!(
            api.calls(),
            vec!["search:rust:12", "videos:contentDetails:v1", "channels:c1"]
        );
    }

    #[tokio::test]
    async fn suggestions_feed_the_title_through_the_generator() {
        let (d, api, generator) = discovery(
            FakeApi {
                snippet: Some(json!({
                    "items": [{ "id": "v2", "snippet": { "title": "Async Rust in depth" } }]
                })),
                search: Some(search_json()),
                content: Some(content_json()),
                channels: Some(channels_json()),
                ..Default::default()
            },
            FixedQuery(Some("async rust tutorial"), Mutex::new(Vec::new())),
        );

        let feed = d.load(&Route::Watch { id: "v2".into() }).await.unwrap();
        let Feed::Watch {
            title,
            query,
            suggestions,
        } = feed
        else {
            panic!("expected a watch feed");
        };

        assert_eq!(title, "Async Rust in depth");
        assert_eq!(query, "async rust tutorial");
        // the video being watched is not suggested back
        assert_eq!(
            suggestions.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(),
            vec!["v1", "v3"]
        );
        assert_eq!(*generator.1.lock().unwrap(), vec!["Async Rust in depth"]);
        assert_eq!(api.calls()[0], "videos:snippet:v2");
        assert_eq!(api.calls()[1], "search:async rust tutorial:15");
    }

    #[tokio::test]
    async fn unknown_video_falls_back_to_generic_title() {
        let (d, _, generator) = discovery(
            FakeApi {
                snippet: Some(json!({ "items": [] })),
                search: Some(json!({ "items": [] })),
                ..Default::default()
            },
            FixedQuery(Some("anything"), Mutex::new(Vec::new())),
        );

        d.suggestions("gone").await.unwrap();
        assert_eq!(*generator.1.lock().unwrap(), vec![FALLBACK_TITLE]);
    }

    #[tokio::test]
    async fn generator_failure_aborts_before_search() {
        let (d, api, _) = discovery(
            FakeApi {
                snippet: Some(json!({ "items": [] })),
                search: Some(search_json()),
                ..Default::default()
            },
            no_query(),
        );

        assert!(d.suggestions("v1").await.is_err());
        assert_eq!(api.calls(), vec!["videos:snippet:v1"]);
    }

    #[test]
    fn channel_ids_are_deduplicated_in_order() {
        let ids = unique_channel_ids(["b", "a", "b", "", "c", "a"].into_iter());
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
