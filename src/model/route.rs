use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search { keyword: String },
    Watch { id: String },
}

impl Route {
    /// Builds a search route from raw input. Blank input is not a search.
    pub fn search(input: &str) -> Option<Self> {
        let keyword = input.trim();
        if keyword.is_empty() {
            return None;
        }
        Some(Route::Search {
            keyword: keyword.to_string(),
        })
    }

    pub fn watch(id: &str) -> Option<Self> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        Some(Route::Watch { id: id.to_string() })
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search { keyword } => format!("/search/{}", urlencoding::encode(keyword)),
            Route::Watch { id } => format!("/watch/{}", urlencoding::encode(id)),
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Some(Route::Home);
        }

        let rest = path.strip_prefix('/')?.trim_end_matches('/');
        let (section, param) = rest.split_once('/')?;
        // one segment only; a slash inside the value arrives percent-encoded
        if param.contains('/') {
            return None;
        }
        let param = urlencoding::decode(param).ok()?;

        match section {
            "search" => Route::search(&param),
            "watch" => Route::watch(&param),
            _ => None,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Route::Home => " Trending ".to_string(),
            Route::Search { keyword } => format!(" Results: {} ", keyword),
            Route::Watch { .. } => " Up Next ".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}
