use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::sys::feeds::FeedSettings;
use crate::sys::{gemini, yt};

pub const YOUTUBE_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_region")]
    pub region_code: String,
    #[serde(default = "default_page_limit")]
    pub trending_limit: u32,
    #[serde(default = "default_page_limit")]
    pub search_limit: u32,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u32,
    #[serde(default = "default_youtube_base")]
    pub youtube_api_base: String,
    #[serde(default = "default_gemini_base")]
    pub gemini_api_base: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    /// When set, suggestions go through a running `tubescope serve` at this URL.
    #[serde(default)]
    pub suggest_endpoint: Option<String>,
    #[serde(default)]
    pub youtube_api_key: Option<String>,
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default = "default_mpv")]
    pub mpv_path: String,
    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

fn default_region() -> String { "IN".to_string() }
fn default_page_limit() -> u32 { 12 }
fn default_suggestion_limit() -> u32 { 15 }
fn default_youtube_base() -> String { yt::DEFAULT_API_BASE.to_string() }
fn default_gemini_base() -> String { gemini::DEFAULT_API_BASE.to_string() }
fn default_gemini_model() -> String { gemini::DEFAULT_MODEL.to_string() }
fn default_mpv() -> String { "mpv".to_string() }
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }
fn default_true() -> bool { true }

impl Default for Config {
    fn default() -> Self {
        Self {
            region_code: default_region(),
            trending_limit: default_page_limit(),
            search_limit: default_page_limit(),
            suggestion_limit: default_suggestion_limit(),
            youtube_api_base: default_youtube_base(),
            gemini_api_base: default_gemini_base(),
            gemini_model: default_gemini_model(),
            suggest_endpoint: None,
            youtube_api_key: None,
            gemini_api_key: None,
            mpv_path: default_mpv(),
            server_host: default_host(),
            server_port: default_port(),
            logging: LoggingConfig::default(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tubescope", "tubescope")
}

fn home_fallback() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".tubescope")
}

impl Config {
    pub fn get_config_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| home_fallback().join("config.toml"))
    }

    pub fn default_log_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.data_dir().join("tubescope.log"))
            .unwrap_or_else(|| home_fallback().join("tubescope.log"))
    }

    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("Ignoring invalid config {}: {}", path.display(), e),
                }
            }
        }
        Self::default()
    }

    pub fn log_path(&self) -> PathBuf {
        self.logging
            .path
            .as_deref()
            .map(Self::expand_tilde)
            .unwrap_or_else(Self::default_log_path)
    }

    pub fn expand_tilde(path: &Path) -> PathBuf {
        match path.strip_prefix("~") {
            Ok(rest) => directories::BaseDirs::new()
                .map(|b| b.home_dir().join(rest))
                .unwrap_or_else(|| path.to_path_buf()),
            Err(_) => path.to_path_buf(),
        }
    }

    pub fn youtube_key(&self) -> Option<String> {
        resolve_key(std::env::var(YOUTUBE_KEY_VAR).ok(), self.youtube_api_key.as_deref())
    }

    pub fn gemini_key(&self) -> Option<String> {
        resolve_key(std::env::var(GEMINI_KEY_VAR).ok(), self.gemini_api_key.as_deref())
    }

    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            region_code: self.region_code.clone(),
            trending_limit: self.trending_limit,
            search_limit: self.search_limit,
            suggestion_limit: self.suggestion_limit,
        }
    }

    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::get_config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = String::from("# Tubescope Configuration\n\n");

        content.push_str("# Region used for the trending chart (ISO 3166-1 alpha-2).\n");
        content.push_str(&format!("region_code = {}\n\n", quoted(&self.region_code)));

        content.push_str("# Number of videos fetched for the trending page and for a search.\n");
        content.push_str(&format!("trending_limit = {}\n", self.trending_limit));
        content.push_str(&format!("search_limit = {}\n\n", self.search_limit));

        content.push_str("# Number of related videos fetched on the watch page.\n");
        content.push_str(&format!("suggestion_limit = {}\n\n", self.suggestion_limit));

        content.push_str("# Upstream APIs.\n");
        content.push_str(&format!("youtube_api_base = {}\n", quoted(&self.youtube_api_base)));
        content.push_str(&format!("gemini_api_base = {}\n", quoted(&self.gemini_api_base)));
        content.push_str(&format!("gemini_model = {}\n\n", quoted(&self.gemini_model)));

        content.push_str("# Ask a running `tubescope serve` for suggestion queries instead of the model.\n");
        match &self.suggest_endpoint {
            Some(url) => content.push_str(&format!("suggest_endpoint = {}\n\n", quoted(url))),
            None => content.push_str("# suggest_endpoint = \"http://127.0.0.1:3000/api/suggest-query\"\n\n"),
        }

        content.push_str(&format!(
            "# API keys. The {} and {} environment variables take precedence.\n",
            YOUTUBE_KEY_VAR, GEMINI_KEY_VAR
        ));
        match &self.youtube_api_key {
            Some(key) => content.push_str(&format!("youtube_api_key = {}\n", quoted(key))),
            None => content.push_str("# youtube_api_key = \"\"\n"),
        }
        match &self.gemini_api_key {
            Some(key) => content.push_str(&format!("gemini_api_key = {}\n\n", quoted(key))),
            None => content.push_str("# gemini_api_key = \"\"\n\n"),
        }

        content.push_str("# Player used by the 'p' and 't' actions on the watch page.\n");
        content.push_str(&format!("mpv_path = {}\n\n", quoted(&self.mpv_path)));

        content.push_str("# Address for `tubescope serve`.\n");
        content.push_str(&format!("server_host = {}\n", quoted(&self.server_host)));
        content.push_str(&format!("server_port = {}\n\n", self.server_port));

        content.push_str("[logging]\n");
        content.push_str(&format!("enabled = {}\n", self.logging.enabled));
        if let Some(p) = &self.logging.path {
            content.push_str(&format!("path = {}\n", quoted(&p.display().to_string())));
        }

        fs::write(path, content)?;
        Ok(())
    }
}

/// A TOML basic or literal string, escaped as needed.
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

/// Environment first, then the config file. Blank values count as unset.
fn resolve_key(env: Option<String>, file: Option<&str>) -> Option<String> {
    env.filter(|k| !k.trim().is_empty())
        .or_else(|| file.map(str::to_string).filter(|k| !k.trim().is_empty()))
}
