use crate::model::youtube::{ChannelListResponse, SearchListResponse, VideoListResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Read-only queries against the video platform's data API.
#[async_trait]
pub trait VideoApi: Send + Sync {
    async fn most_popular(&self, region: &str, max_results: u32) -> Result<VideoListResponse>;
    async fn search(&self, query: &str, max_results: u32) -> Result<SearchListResponse>;
    /// `part` is passed through untouched ("snippet", "contentDetails", ...).
    async fn videos(&self, ids: &[String], part: &str) -> Result<VideoListResponse>;
    async fn channels(&self, ids: &[String]) -> Result<ChannelListResponse>;
}

pub struct YouTubeClient {
    http: Client,
    base: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(http: Client, base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse_with_params(&format!("{}/{}", self.base, resource), params)
            .with_context(|| format!("Invalid API url for '{}'", resource))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.endpoint(resource, params)?;
        log::debug!("GET {}?{}", resource, redact_key(url.query().unwrap_or("")));

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to '{}' failed", resource))?
            .error_for_status()
            .with_context(|| format!("'{}' returned an error status", resource))?;

        resp.json::<T>()
            .await
            .with_context(|| format!("Failed to parse '{}' response", resource))
    }
}

#[async_trait]
impl VideoApi for YouTubeClient {
    async fn most_popular(&self, region: &str, max_results: u32) -> Result<VideoListResponse> {
        let max = max_results.to_string();
        self.get_json(
            "videos",
            &[
                ("part", "snippet,contentDetails"),
                ("chart", "mostPopular"),
                ("maxResults", &max),
                ("regionCode", region),
            ],
        )
        .await
    }

    async fn search(&self, query: &str, max_results: u32) -> Result<SearchListResponse> {
        let max = max_results.to_string();
        self.get_json(
            "search",
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", &max),
                ("q", query),
            ],
        )
        .await
    }

    async fn videos(&self, ids: &[String], part: &str) -> Result<VideoListResponse> {
        let ids = ids.join(",");
        self.get_json("videos", &[("part", part), ("id", &ids)]).await
    }

    async fn channels(&self, ids: &[String]) -> Result<ChannelListResponse> {
        let ids = ids.join(",");
        self.get_json("channels", &[("part", "snippet"), ("id", &ids)])
            .await
    }
}

fn redact_key(query: &str) -> String {
    query
        .split('&')
        .map(|pair| if pair.starts_with("key=") { "key=***" } else { pair })
        .collect::<Vec<_>>()
        .join("&")
}

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern is valid")
});

/// Turns an ISO 8601 duration ("PT1H2M3S") into a clock string ("1:02:03").
/// Anything without a `PT` section formats as "0:00".
pub fn format_duration(iso: &str) -> String {
    let Some(caps) = DURATION_RE.captures(iso) else {
        return "0:00".to_string();
    };

    let group = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    let (h, m, s) = (group(1), group(2), group(3));

    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_common_durations() {
        assert_eq!(format_duration("PT5M17S"), "5:17");
        assert_eq!(format_duration("PT45S"), "0:45");
        assert_eq!(format_duration("PT10M"), "10:00");
        assert_eq!(format_duration("PT1H2M3S"), "1:02:03");
        assert_eq!(format_duration("PT2H"), "2:00:00");
        assert_eq!(format_duration("PT1H5S"), "1:00:05");
    }

    #[test]
    fn malformed_input_defaults_to_zero() {
        assert_eq!(format_duration(""), "0:00");
        assert_eq!(format_duration("garbage"), "0:00");
        assert_eq!(format_duration("P1D"), "0:00");
        assert_eq!(format_duration("PT"), "0:00");
    }

    #[test]
    fn pattern_is_found_anywhere_in_the_input() {
        // day component is ignored, the time part still formats
        assert_eq!(format_duration("P0DPT3M"), "3:00");
        assert_eq!(format_duration("P1DT2H"), "0:00");
    }

    #[test]
    fn endpoint_appends_the_key_last() {
        let client = YouTubeClient::new(Client::new(), "https://example.test/yt/v3/", "secret");
        let url = client
            .endpoint("search", &[("q", "rust lang"), ("type", "video")])
            .unwrap();
        assert_eq!(url.path(), "/yt/v3/search");
        assert_eq!(url.query(), Some("q=rust+lang&type=video&key=secret"));
        assert_eq!(
            redact_key(url.query().unwrap()),
            "q=rust+lang&type=video&key=***"
        );
    }
}
