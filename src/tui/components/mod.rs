pub mod details;
pub mod playback_bar;
pub mod player;
pub mod search_bar;
pub mod skeleton;
pub mod status_bar;
pub mod theme;
pub mod video_grid;
pub mod video_list;
pub mod widgets;
