use super::{actions, updates, App, InputMode};
use crate::model::Route;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    log::debug!("Key event: {:?}, input_mode: {:?}", key.code, app.input_mode);

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal(app, key.code),
        InputMode::Editing => handle_editing(app, key),
    }
}

fn handle_normal(app: &mut App, code: KeyCode) {
    let on_watch = matches!(app.page.route, Route::Watch { .. });

    match code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('/') | KeyCode::Char('s') => {
            app.input_mode = InputMode::Editing;
            app.cursor_position = app.search_query.chars().count();
        }
        KeyCode::Esc | KeyCode::Backspace => actions::back(app),
        KeyCode::Char('g') => actions::go_home(app),
        KeyCode::Char('r') => actions::reload(app),
        KeyCode::Char('x') => actions::stop_playback(app),
        KeyCode::Enter => actions::open_selected(app),

        // The watch page's suggestions are a single column
        KeyCode::Up | KeyCode::Char('k') if on_watch => app.page.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') if on_watch => app.page.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => updates::move_in_grid(app, 0, -1),
        KeyCode::Down | KeyCode::Char('j') => updates::move_in_grid(app, 0, 1),
        KeyCode::Left | KeyCode::Char('h') => updates::move_in_grid(app, -1, 0),
        KeyCode::Right | KeyCode::Char('l') => updates::move_in_grid(app, 1, 0),
        KeyCode::PageUp => app.page.move_selection(-10),
        KeyCode::PageDown => app.page.move_selection(10),

        _ => {
            let chosen = actions::get_available_actions(app)
                .into_iter()
                .find(|a| a.key == code);
            if let Some(action) = chosen {
                actions::queue_action(app, action.action);
            }
        }
    }
}

fn handle_editing(app: &mut App, key: KeyEvent) {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => actions::submit_search(app),
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Char(c) if control => match c {
            'u' => {
                let at = byte_index(&app.search_query, app.cursor_position);
                app.search_query.drain(..at);
                app.cursor_position = 0;
            }
            'k' => {
                let at = byte_index(&app.search_query, app.cursor_position);
                app.search_query.truncate(at);
            }
            'w' | 'h' => delete_word_backwards(app),
            'a' => app.cursor_position = 0,
            'e' => app.cursor_position = app.search_query.chars().count(),
            _ => {}
        },
        KeyCode::Char(c) => {
            let at = byte_index(&app.search_query, app.cursor_position);
            app.search_query.insert(at, c);
            app.cursor_position += 1;
        }
        KeyCode::Backspace if control => delete_word_backwards(app),
        KeyCode::Backspace => {
            if app.cursor_position > 0 {
                app.cursor_position -= 1;
                let at = byte_index(&app.search_query, app.cursor_position);
                app.search_query.remove(at);
            }
        }
        KeyCode::Delete => {
            if app.cursor_position < app.search_query.chars().count() {
                let at = byte_index(&app.search_query, app.cursor_position);
                app.search_query.remove(at);
            }
        }
        KeyCode::Left => app.cursor_position = app.cursor_position.saturating_sub(1),
        KeyCode::Right => {
            app.cursor_position = (app.cursor_position + 1).min(app.search_query.chars().count());
        }
        KeyCode::Home => app.cursor_position = 0,
        KeyCode::End => app.cursor_position = app.search_query.chars().count(),
        _ => {}
    }
}

pub fn handle_paste(app: &mut App, text: String) {
    // newlines would submit half a query
    let text: String = text.chars().filter(|c| !c.is_control()).collect();
    app.input_mode = InputMode::Editing;
    let at = byte_index(&app.search_query, app.cursor_position);
    app.search_query.insert_str(at, &text);
    app.cursor_position += text.chars().count();
}

fn delete_word_backwards(app: &mut App) {
    let chars: Vec<char> = app.search_query.chars().collect();
    let mut start = app.cursor_position.min(chars.len());
    while start > 0 && chars[start - 1].is_whitespace() {
        start -= 1;
    }
    while start > 0 && !chars[start - 1].is_whitespace() {
        start -= 1;
    }
    let from = byte_index(&app.search_query, start);
    let to = byte_index(&app.search_query, app.cursor_position);
    app.search_query.replace_range(from..to, "");
    app.cursor_position = start;
}

fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::app::test_app;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::empty()));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_and_submitting_a_search() {
        let (mut app, mut workers) = test_app(Route::Home);
        workers.drain_fetches();

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Editing);
        type_str(&mut app, "lo-fi");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.page.route, Route::Search { keyword: "lo-fi".into() });
        assert_eq!(workers.drain_fetches().len(), 1);
    }

    #[test]
    fn editing_handles_multibyte_text() {
        let (mut app, _workers) = test_app(Route::Home);
        press(&mut app, KeyCode::Char('s'));
        type_str(&mut app, "café");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.search_query, "caé");
        assert_eq!(app.cursor_position, 2);

        press(&mut app, KeyCode::End);
        type_str(&mut app, " au lait");
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(app.search_query, "caé au ");
    }

    #[test]
    fn keys_in_search_mode_are_text_not_commands() {
        let (mut app, _workers) = test_app(Route::Home);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "q");
        assert!(app.running);
        assert_eq!(app.search_query, "q");
    }

    #[test]
    fn paste_strips_newlines() {
        let (mut app, _workers) = test_app(Route::Home);
        handle_paste(&mut app, "never gonna\n".into());
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.search_query, "never gonna");
        assert_eq!(app.cursor_position, 11);
    }

    #[test]
    fn player_keys_queue_actions_for_the_selection() {
        let (mut app, _workers) = test_app(Route::Watch { id: "abc".into() });
        press(&mut app, KeyCode::Char('t'));
        let (action, url, _) = app.pending_action.take().unwrap();
        assert_eq!(action, crate::app::AppAction::WatchInTerminal);
        assert_eq!(url, "https://www.youtube.com/watch?v=abc");
    }

    #[test]
    fn quit_keys() {
        let (mut app, _workers) = test_app(Route::Home);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let (mut app, _workers) = test_app(Route::Home);
        app.input_mode = InputMode::Editing;
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
