use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn char_width(c: char) -> usize {
    let cp = c as u32;
    if (0x1F300..=0x1F9FF).contains(&cp) || (0x2600..=0x26FF).contains(&cp) {
        2
    } else {
        1
    }
}

pub fn get_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

pub fn truncate_str(s: &str, max_width: usize) -> String {
    if get_width(s) <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let w = char_width(c);
        if current_width + w + 3 > max_width {
            result.push_str("...");
            break;
        }
        result.push(c);
        current_width += w;
    }
    result
}

/// Word-wraps `s` into at most `max_lines` lines of `width`, ellipsizing the
/// last one when text is left over.
pub fn wrap_lines(s: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in s.split_whitespace() {
        let word = truncate_str(word, width);
        if current.is_empty() {
            current = word;
        } else if get_width(&current) + 1 + get_width(&word) <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let room = width.saturating_sub(3);
            let mut kept = String::new();
            let mut used = 0;
            for c in last.chars() {
                let w = char_width(c);
                if used + w > room {
                    break;
                }
                kept.push(c);
                used += w;
            }
            *last = format!("{}...", kept.trim_end());
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a much longer title", 10), "a much ...");
    }

    #[test]
    fn wraps_to_two_lines() {
        assert_eq!(
            wrap_lines("one two three", 20, 2),
            vec!["one two three".to_string()]
        );
        assert_eq!(
            wrap_lines("one two three four", 9, 2),
            vec!["one two".to_string(), "three...".to_string()]
        );
        assert!(wrap_lines("anything", 0, 2).is_empty());
    }
}
