use crate::model::{Feed, Route, Video};
use crossterm::event::KeyCode;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppAction {
    OpenInBrowser,
    WatchExternal,
    WatchInTerminal,
    CopyLink,
}

pub struct Action {
    pub key: KeyCode,
    pub name: &'static str,
    pub action: AppAction,
}

impl Action {
    pub fn new(key: KeyCode, name: &'static str, action: AppAction) -> Self {
        Self { key, name, action }
    }
}

#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub generation: u64,
    pub route: Route,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<Feed, String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Applied {
    /// Belonged to a view that is no longer current.
    Stale,
    Loaded(usize),
    Failed(String),
}

/// Everything shown for the current route. Replaced on navigation.
#[derive(Debug, Clone)]
pub struct Page {
    pub route: Route,
    pub generation: u64,
    pub videos: Vec<Video>,
    pub loading: bool,
    pub selected: Option<usize>,
    // watch route only
    pub watch_title: Option<String>,
    pub watch_query: Option<String>,
}

impl Page {
    pub fn new(route: Route, generation: u64) -> Self {
        Self {
            route,
            generation,
            videos: Vec::new(),
            loading: true,
            selected: None,
            watch_title: None,
            watch_query: None,
        }
    }

    /// Starts a refetch of the same route. What is on screen stays until
    /// the new result lands.
    pub fn reload(&mut self, generation: u64) {
        self.generation = generation;
        self.loading = true;
    }

    pub fn show_skeletons(&self) -> bool {
        self.loading && self.videos.is_empty()
    }

    pub fn selected_video(&self) -> Option<&Video> {
        self.selected.and_then(|i| self.videos.get(i))
    }

    pub fn watch_id(&self) -> Option<&str> {
        match &self.route {
            Route::Watch { id } => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        if outcome.generation != self.generation {
            return Applied::Stale;
        }
        self.loading = false;

        match outcome.result {
            Ok(feed) => {
                if let Feed::Watch { title, query, .. } = &feed {
                    self.watch_title = Some(title.clone());
                    self.watch_query = Some(query.clone());
                }
                self.videos = feed.into_videos();
                self.selected = if self.videos.is_empty() { None } else { Some(0) };
                Applied::Loaded(self.videos.len())
            }
            Err(e) => Applied::Failed(e),
        }
    }

    /// Moves the selection by `delta`, clamped to the list.
    pub fn move_selection(&mut self, delta: i64) {
        if self.videos.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.videos.len() as i64 - 1;
        let current = self.selected.unwrap_or(0) as i64;
        self.selected = Some((current + delta).clamp(0, last) as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str) -> Video {
        Video {
            id: id.into(),
            title: format!("title {}", id),
            ..Default::default()
        }
    }

    fn loaded_page() -> Page {
        let mut page = Page::new(Route::Home, 1);
        page.apply(FetchOutcome {
            generation: 1,
            result: Ok(Feed::Trending(vec![video("a"), video("b"), video("c")])),
        });
        page
    }

    #[test]
    fn new_page_shows_skeletons_until_loaded() {
        let page = Page::new(Route::Home, 1);
        assert!(page.show_skeletons());
        let page = loaded_page();
        assert!(!page.show_skeletons());
        assert_eq!(page.selected, Some(0));
    }

    #[test]
    fn failure_leaves_the_list_unchanged() {
        let mut page = loaded_page();
        page.reload(2);
        let before = page.videos.clone();

        let applied = page.apply(FetchOutcome {
            generation: 2,
            result: Err("HTTP 403".into()),
        });

        assert_eq!(applied, Applied::Failed("HTTP 403".into()));
        assert_eq!(page.videos, before);
        assert!(!page.loading);
    }

    #[test]
    fn failure_on_a_fresh_page_leaves_it_empty() {
        let mut page = Page::new(Route::search("x").unwrap(), 5);
        page.apply(FetchOutcome {
            generation: 5,
            result: Err("boom".into()),
        });
        assert!(page.videos.is_empty());
        assert!(!page.show_skeletons());
        assert_eq!(page.selected, None);
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut page = Page::new(Route::Home, 3);
        let applied = page.apply(FetchOutcome {
            generation: 2,
            result: Ok(Feed::Trending(vec![video("old")])),
        });
        assert_eq!(applied, Applied::Stale);
        assert!(page.videos.is_empty());
        assert!(page.loading);
    }

    #[test]
    fn watch_feed_records_title_and_query() {
        let mut page = Page::new(Route::Watch { id: "w".into() }, 1);
        page.apply(FetchOutcome {
            generation: 1,
            result: Ok(Feed::Watch {
                title: "Original".into(),
                query: "similar stuff".into(),
                suggestions: vec![video("s1")],
            }),
        });
        assert_eq!(page.watch_id(), Some("w"));
        assert_eq!(page.watch_title.as_deref(), Some("Original"));
        assert_eq!(page.watch_query.as_deref(), Some("similar stuff"));
        assert_eq!(page.selected_video().map(|v| v.id.as_str()), Some("s1"));
    }

    #[test]
    fn selection_is_clamped() {
        let mut page = loaded_page();
        page.move_selection(-5);
        assert_eq!(page.selected, Some(0));
        page.move_selection(1);
        assert_eq!(page.selected, Some(1));
        page.move_selection(40);
        assert_eq!(page.selected, Some(2));

        let mut empty = Page::new(Route::Home, 1);
        empty.move_selection(1);
        assert_eq!(empty.selected, None);
    }
}
