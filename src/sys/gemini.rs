use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Turns a video title into a search query for related videos.
#[async_trait]
pub trait QueryGenerator: Send + Sync {
    async fn suggest_query(&self, title: &str) -> Result<String>;
}

pub fn build_prompt(title: &str) -> String {
    format!(
        "You are helping to recommend YouTube videos. Given this video title: \"{}\", \n\
         suggest a short YouTube search query (5 words max) that would bring up closely related videos \
         and also make sure that youtube doesn't return the same videos in the suggestion  \n\
         Only return the query, nothing else.",
        title
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated, trimmed.
    fn text(&self) -> Result<String> {
        let candidate = self
            .candidates
            .first()
            .ok_or_else(|| anyhow!("Model returned no candidates"))?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        Ok(text.trim().to_string())
    }
}

pub struct GeminiClient {
    http: Client,
    base: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        http: Client,
        base: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base: base.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> Result<Url> {
        let raw = format!("{}/models/{}:generateContent", self.base, self.model);
        Url::parse_with_params(&raw, &[("key", self.api_key.as_str())])
            .with_context(|| format!("Invalid model endpoint '{}'", raw))
    }
}

#[async_trait]
impl QueryGenerator for GeminiClient {
    async fn suggest_query(&self, title: &str) -> Result<String> {
        if self.api_key.is_empty() {
            bail!("No Gemini API key configured");
        }

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(title),
                }],
            }],
        };

        let resp: GenerateResponse = self
            .http
            .post(self.endpoint()?)
            .json(&body)
            .send()
            .await
            .context("generateContent request failed")?
            .error_for_status()
            .context("generateContent returned an error status")?
            .json()
            .await
            .context("Failed to parse generateContent response")?;

        let query = resp.text()?;
        log::info!("Generated query '{}' for '{}'", query, title);
        Ok(query)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub title: String,
}

/// Body of the suggestion endpoint: `{"query": ..}` on success, `{"error": ..}` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestResponse {
    Query { query: String },
    Error { error: String },
}

/// Asks a running `tubescope serve` instance instead of the model directly.
pub struct RemoteSuggester {
    http: Client,
    endpoint: String,
}

impl RemoteSuggester {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl QueryGenerator for RemoteSuggester {
    async fn suggest_query(&self, title: &str) -> Result<String> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&SuggestRequest {
                title: title.to_string(),
            })
            .send()
            .await
            .with_context(|| format!("Suggestion endpoint '{}' unreachable", self.endpoint))?;

        let status = resp.status();
        let body: SuggestResponse = resp
            .json()
            .await
            .context("Failed to parse suggestion endpoint response")?;

        match body {
            SuggestResponse::Query { query } if status.is_success() => Ok(query),
            SuggestResponse::Query { .. } => bail!("Suggestion endpoint returned {}", status),
            SuggestResponse::Error { error } => bail!("Suggestion endpoint: {} ({})", error, status),
        }
    }
}
