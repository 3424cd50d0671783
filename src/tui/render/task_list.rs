use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Tab, Task};
use crate::tui::app::App;
use crate::util::unicode;

/// Render the tasks of the active tab, one per row
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.tasks().is_empty() {
        let message = match app.active_tab() {
            Tab::Current => " No current tasks",
            Tab::Completed => " No completed tasks",
        };
        let empty = Paragraph::new(message).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor row visible
    let visible_height = area.height as usize;
    if visible_height > 0 {
        if app.cursor < app.scroll_offset {
            app.scroll_offset = app.cursor;
        } else if app.cursor >= app.scroll_offset + visible_height {
            app.scroll_offset = app.cursor + 1 - visible_height;
        }
    }

    let width = area.width as usize;
    let app: &App = app;
    let lines: Vec<Line> = app
        .tasks()
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
        .map(|(i, task)| task_line(app, task, i == app.cursor, width))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn task_line<'a>(app: &App, task: &'a Task, is_cursor: bool, width: usize) -> Line<'a> {
    let bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let marker = if is_cursor { "\u{258E}" } else { " " };
    let checkbox = if task.completed { "[x] " } else { "[ ] " };

    let mut text_style = Style::default().fg(app.theme.task_color(task.completed)).bg(bg);
    if task.completed {
        text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
    }
    if is_cursor {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }

    // Action labels on the cursor row only
    let actions: Vec<Span> = if is_cursor {
        let toggle_label = if task.completed { "Undo" } else { "Complete" };
        vec![
            Span::styled(toggle_label, Style::default().fg(app.theme.green).bg(bg)),
            Span::styled("  ", Style::default().bg(bg)),
            Span::styled("Delete", Style::default().fg(app.theme.red).bg(bg)),
            Span::styled(" ", Style::default().bg(bg)),
        ]
    } else {
        Vec::new()
    };
    let actions_width: usize = actions.iter().map(|s| unicode::display_width(&s.content)).sum();

    let prefix_width = 1 + checkbox.len();
    let text_budget = width.saturating_sub(prefix_width + actions_width + 1);
    let text = unicode::truncate_to_width(&task.text, text_budget);
    let used = prefix_width + unicode::display_width(&text) + actions_width;

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(checkbox, Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(text, text_style),
    ];
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
    spans.extend(actions);
    Line::from(spans)
}
