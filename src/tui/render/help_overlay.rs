use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Mode};

/// Render the help overlay (toggled with ? or F1)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 90, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    match app.mode {
        Mode::Navigate => {
            lines.push(Line::from(Span::styled(" Lists", header_style)));
            add_binding(&mut lines, " Tab", "Switch list", key_style, desc_style);
            add_binding(&mut lines, " 1/h", "Current tasks", key_style, desc_style);
            add_binding(&mut lines, " 2/l", "Completed tasks", key_style, desc_style);
            add_binding(&mut lines, " r", "Refresh", key_style, desc_style);
            lines.push(Line::from(""));

            lines.push(Line::from(Span::styled(" Tasks", header_style)));
            add_binding(
                &mut lines,
                " \u{2191}\u{2193}/jk",
                "Move cursor up/down",
                key_style,
                desc_style,
            );
            add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
            add_binding(&mut lines, " a/i", "Add a task", key_style, desc_style);
            add_binding(
                &mut lines,
                " Space/x/Enter",
                "Complete / undo",
                key_style,
                desc_style,
            );
            add_binding(&mut lines, " d", "Delete", key_style, desc_style);
            lines.push(Line::from(""));
        }
        Mode::Input => {
            lines.push(Line::from(Span::styled(" New Task", header_style)));
            add_binding(&mut lines, " Enter", "Add task", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Stop editing", key_style, desc_style);
            add_binding(&mut lines, " Ctrl+U", "Clear input", key_style, desc_style);
            add_binding(&mut lines, " Ctrl+A/E", "Start / end", key_style, desc_style);
            lines.push(Line::from(""));
        }
    }

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " ?/F1", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+C", "Quit (immediate)", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let padded_key = format!("{:<16}", key);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Centered rectangle covering the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tab;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn navigate_help_lists_task_keys() {
        let app = app_with_tasks(vec![], Tab::Current);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Key Bindings"));
        assert!(output.contains("Complete / undo"));
        assert!(output.contains("Completed tasks"));
        assert!(output.contains("Quit"));
    }

    #[test]
    fn input_help_lists_edit_keys() {
        let mut app = app_with_tasks(vec![], Tab::Current);
        app.mode = Mode::Input;
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Stop editing"));
        assert!(!output.contains("Jump to top/bottom"));
    }

    #[test]
    fn centered_rect_is_inside_parent() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(60, 80, area);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 40);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 5);
    }
}
