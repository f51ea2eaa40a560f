pub mod actions;
pub mod app;
pub mod handlers;
pub mod state;
pub mod updates;

pub use app::App;
pub use state::{Action, AppAction, Applied, FetchOutcome, FetchRequest, InputMode, Page};
