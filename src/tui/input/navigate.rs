use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Tab;
use crate::ops::view_ops::Msg;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Tabs
        KeyCode::Tab | KeyCode::BackTab => {
            let next = app.active_tab().other();
            select_tab(app, next);
        }
        KeyCode::Char('1') | KeyCode::Char('h') | KeyCode::Left => select_tab(app, Tab::Current),
        KeyCode::Char('2') | KeyCode::Char('l') | KeyCode::Right => {
            select_tab(app, Tab::Completed)
        }
        KeyCode::Char('r') => app.dispatch(Msg::Refresh),

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < app.tasks().len() {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.tasks().len().saturating_sub(1);
        }

        // New task input
        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.mode = Mode::Input;
            app.input_cursor = app.pending_text().len();
        }

        // Task actions
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
            if let Some(id) = app.cursor_task().map(|t| t.id) {
                app.dispatch(Msg::ToggleTask(id));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.cursor_task().map(|t| t.id) {
                app.dispatch(Msg::DeleteTask(id));
            }
        }
        _ => {}
    }
}

fn select_tab(app: &mut App, tab: Tab) {
    app.cursor = 0;
    app.scroll_offset = 0;
    app.dispatch(Msg::SelectTab(tab));
}
