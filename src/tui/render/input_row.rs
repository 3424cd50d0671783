use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

const PLACEHOLDER: &str = "Add a new task";

/// Render the new-task input box. In input mode the terminal caret is
/// placed at the edit position.
pub fn render_input_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let editing = app.mode == Mode::Input;
    let border_color = if editing { app.theme.highlight } else { app.theme.dim };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Span::styled(" New task ", Style::default().fg(border_color).bg(bg)))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = app.pending_text();
    let inner_width = inner.width as usize;

    // Keep the caret on screen when the text is wider than the box
    let caret_col = unicode::display_col(text, app.input_cursor);
    let offset = caret_col.saturating_sub(inner_width.saturating_sub(1));

    // A wide character straddling the offset is skipped whole
    let (visible, skipped) = skip_cols(text, offset);

    let line = if text.is_empty() && !editing {
        Line::from(Span::styled(PLACEHOLDER, Style::default().fg(app.theme.dim).bg(bg)))
    } else {
        Line::from(Span::styled(
            unicode::truncate_to_width(visible, inner_width),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
    };
    frame.render_widget(Paragraph::new(line), inner);

    if editing && inner.width > 0 && inner.height > 0 {
        let x = inner.x + caret_col.saturating_sub(skipped).min(inner_width.saturating_sub(1)) as u16;
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

/// Drop leading characters until at least `cols` cells have been skipped.
/// Returns the rest and the number of cells actually skipped.
fn skip_cols(s: &str, cols: usize) -> (&str, usize) {
    let mut skipped = 0;
    for (i, c) in s.char_indices() {
        if skipped >= cols {
            return (&s[i..], skipped);
        }
        skipped += unicode::display_width(c.encode_utf8(&mut [0; 4]));
    }
    ("", skipped)
}
