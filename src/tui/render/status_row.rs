use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the status row (bottom of screen): server on the left, key hints
/// on the right when enabled.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let hint = match app.mode {
        Mode::Navigate => "a add  space complete  d delete  tab switch  ? help",
        Mode::Input => "Enter add  Esc done",
    };

    let mut spans = vec![Span::styled(
        format!(" {}", app.server_label),
        Style::default().fg(app.theme.dim).bg(bg),
    )];

    // Input mode always shows its hint: it is the only way to learn Esc
    if app.show_key_hints || app.mode == Mode::Input {
        let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
        let hint_width = unicode::display_width(hint) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tab;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn navigate_hints_and_server() {
        let app = app_with_tasks(vec![], Tab::Current);
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.starts_with(" http://test.invalid"));
        assert!(output.ends_with("? help"));
    }

    #[test]
    fn hints_can_be_disabled() {
        let mut app = app_with_tasks(vec![], Tab::Current);
        app.show_key_hints = false;
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(output, " http://test.invalid");
    }

    #[test]
    fn input_mode_hint() {
        let mut app = app_with_tasks(vec![], Tab::Current);
        app.show_key_hints = false;
        app.mode = Mode::Input;
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.ends_with("Esc done"));
    }
}
