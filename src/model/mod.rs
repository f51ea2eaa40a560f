use serde::{Deserialize, Serialize};

pub mod route;
pub mod youtube;

pub use route::Route;

/// One playable item, flattened from whatever upstream shape produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub channel: String,
    pub channel_icon: String, // "" when the channel lookup had nothing
    pub duration: String,     // e.g. "10:05"
}

impl Video {
    pub fn watch_url(&self) -> String {
        watch_url(&self.id)
    }

    /// First character of the channel name, used where the icon can't be drawn.
    pub fn channel_initial(&self) -> String {
        self.channel
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn has_channel_icon(&self) -> bool {
        !self.channel_icon.is_empty()
    }
}

pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

pub fn embed_url(id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{}?controls=1&rel=0&showinfo=0&modestbranding=1&autohide=1",
        id
    )
}

pub fn default_thumbnail(id: &str) -> String {
    format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id)
}

/// What a finished fetch hands back to the view that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Trending(Vec<Video>),
    Search(Vec<Video>),
    Watch {
        title: String,
        query: String,
        suggestions: Vec<Video>,
    },
}

impl Feed {
    pub fn into_videos(self) -> Vec<Video> {
        match self {
            Feed::Trending(v) | Feed::Search(v) => v,
            Feed::Watch { suggestions, .. } => suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_the_id() {
        let v = Video {
            id: "dQw4w9WgXcQ".into(),
            ..Default::default()
        };
        assert_eq!(v.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert!(embed_url("abc").starts_with("https://www.youtube.com/embed/abc?controls=1"));
        assert_eq!(
            default_thumbnail("abc"),
            "https://i.ytimg.com/vi/abc/hqdefault.jpg"
        );
    }

    #[test]
    fn channel_initial_falls_back_for_empty_names() {
        let mut v = Video::default();
        assert_eq!(v.channel_initial(), "?");
        v.channel = "rustconf".into();
        assert_eq!(v.channel_initial(), "R");
        assert!(!v.has_channel_icon());
    }
}
