use super::{actions, App, Applied};

pub fn on_tick(app: &mut App) {
    app.tick_count = app.tick_count.wrapping_add(1);

    // check for page loads
    while let Ok(outcome) = app.fetch_rx.try_recv() {
        match app.page.apply(outcome) {
            Applied::Stale => log::debug!("Dropped a result for an older view"),
            Applied::Loaded(0) => {
                app.status_message = Some("No videos to show.".to_string());
            }
            Applied::Loaded(n) => {
                app.status_message = Some(format!("{} videos", n));
                actions::request_page_images(app);
            }
            Applied::Failed(_) => {
                // already logged by the worker; keep whatever is on screen
                app.status_message = Some(if app.page.videos.is_empty() {
                    "No videos to show.".to_string()
                } else {
                    "Could not refresh.".to_string()
                });
            }
        }
    }

    // check for images
    while let Ok((url, img)) = app.image_rx.try_recv() {
        app.requested_images.remove(&url);
        app.image_cache.put(url, img);
    }

    // Check if playback process finished
    if let Some(ref mut child) = app.playback_process {
        if let Ok(Some(_)) = child.try_wait() {
            app.playback_process = None;
            app.playback_title = None;
            app.status_message = Some("Playback finished.".to_string());
        }
    }
}

/// Moves within the card grid: one step sideways, one row vertically.
pub fn move_in_grid(app: &mut App, dx: i64, dy: i64) {
    let columns = app.grid_columns.max(1) as i64;
    app.page.move_selection(dx + dy * columns);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::app::test_app;
    use crate::app::FetchOutcome;
    use crate::model::{Feed, Route, Video};

    fn videos(n: usize) -> Vec<Video> {
        (0..n)
            .map(|i| Video {
                id: format!("v{}", i),
                thumbnail_url: format!("https://img/{}.jpg", i),
                channel_icon: if i == 0 { "https://img/icon.jpg".into() } else { String::new() },
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn loaded_page_requests_thumbnails_and_icons() {
        let (mut app, mut workers) = test_app(Route::Home);
        let generation = app.page.generation;
        workers
            .outcomes
            .send(FetchOutcome {
                generation,
                result: Ok(Feed::Trending(videos(2))),
            })
            .unwrap();

        on_tick(&mut app);

        assert_eq!(app.page.videos.len(), 2);
        assert_eq!(app.status_message.as_deref(), Some("2 videos"));
        assert_eq!(
            workers.drain_images(),
            vec![
                "https://img/0.jpg".to_string(),
                "https://img/icon.jpg".to_string(),
                "https://img/1.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn failed_reload_keeps_the_grid() {
        let (mut app, workers) = test_app(Route::Home);
        let generation = app.page.generation;
        workers
            .outcomes
            .send(FetchOutcome {
                generation,
                result: Ok(Feed::Trending(videos(3))),
            })
            .unwrap();
        on_tick(&mut app);

        actions::reload(&mut app);
        let generation = app.page.generation;
        workers
            .outcomes
            .send(FetchOutcome {
                generation,
                result: Err("quota exceeded".into()),
            })
            .unwrap();
        on_tick(&mut app);

        assert_eq!(app.page.videos, videos(3));
        assert!(!app.page.loading);
        assert_eq!(app.status_message.as_deref(), Some("Could not refresh."));
    }

    #[test]
    fn late_result_for_previous_route_is_ignored() {
        let (mut app, workers) = test_app(Route::Home);
        let home_generation = app.page.generation;
        actions::navigate(&mut app, Route::search("rust").unwrap());

        workers
            .outcomes
            .send(FetchOutcome {
                generation: home_generation,
                result: Ok(Feed::Trending(videos(4))),
            })
            .unwrap();
        on_tick(&mut app);

        assert!(app.page.videos.is_empty());
        assert!(app.page.show_skeletons());
    }

    #[test]
    fn grid_moves_by_rows_and_clamps() {
        let (mut app, workers) = test_app(Route::Home);
        let generation = app.page.generation;
        workers
            .outcomes
            .send(FetchOutcome {
                generation,
                result: Ok(Feed::Trending(videos(7))),
            })
            .unwrap();
        on_tick(&mut app);
        app.grid_columns = 3;

        move_in_grid(&mut app, 0, 1);
        assert_eq!(app.page.selected, Some(3));
        move_in_grid(&mut app, 1, 0);
        assert_eq!(app.page.selected, Some(4));
        move_in_grid(&mut app, 0, 1);
        assert_eq!(app.page.selected, Some(6));
        move_in_grid(&mut app, 0, -5);
        assert_eq!(app.page.selected, Some(0));
    }
}
