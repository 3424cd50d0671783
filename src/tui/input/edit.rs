use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::view_ops::Msg;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Keys while the new-task input has focus
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter => app.dispatch(Msg::SubmitNewTask),

        KeyCode::Left => {
            if let Some(pos) = unicode::prev_grapheme_boundary(app.pending_text(), app.input_cursor)
            {
                app.input_cursor = pos;
            }
        }
        KeyCode::Right => {
            if let Some(pos) = unicode::next_grapheme_boundary(app.pending_text(), app.input_cursor)
            {
                app.input_cursor = pos;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.pending_text().len(),
        KeyCode::Char('a') if ctrl => app.input_cursor = 0,
        KeyCode::Char('e') if ctrl => app.input_cursor = app.pending_text().len(),

        KeyCode::Char('u') if ctrl => {
            app.input_cursor = 0;
            app.dispatch(Msg::SetInput(String::new()));
        }
        KeyCode::Backspace => {
            let text = app.pending_text();
            if let Some(start) = unicode::prev_grapheme_boundary(text, app.input_cursor) {
                let mut edited = text.to_string();
                edited.replace_range(start..app.input_cursor, "");
                app.input_cursor = start;
                app.dispatch(Msg::SetInput(edited));
            }
        }
        KeyCode::Delete => {
            let text = app.pending_text();
            if let Some(end) = unicode::next_grapheme_boundary(text, app.input_cursor) {
                let mut edited = text.to_string();
                edited.replace_range(app.input_cursor..end, "");
                app.dispatch(Msg::SetInput(edited));
            }
        }
        KeyCode::Char(c) if !ctrl => {
            let mut edited = app.pending_text().to_string();
            edited.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
            app.dispatch(Msg::SetInput(edited));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryTaskApi;
    use crate::model::{ClientConfig, Tab};

    fn input_app(text: &str) -> App {
        let mut app = App::new(
            Box::new(MemoryTaskApi::new()),
            &ClientConfig::default(),
            Tab::Current,
        );
        app.mode = Mode::Input;
        app.dispatch(Msg::SetInput(text.into()));
        app.input_cursor = text.len();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_edit(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn insert_at_caret() {
        let mut app = input_app("by milk");
        app.input_cursor = 1;
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.pending_text(), "buy milk");
        assert_eq!(app.input_cursor, 2);
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut app = input_app("cafe\u{0301}");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.pending_text(), "caf");
        assert_eq!(app.input_cursor, 3);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut app = input_app("milk");
        app.input_cursor = 0;
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.pending_text(), "milk");
    }

    #[test]
    fn delete_removes_after_caret() {
        let mut app = input_app("milkk");
        app.input_cursor = 4;
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.pending_text(), "milk");
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.pending_text(), "milk");
    }

    #[test]
    fn caret_movement_is_grapheme_aware() {
        let mut app = input_app("牛奶");
        press(&mut app, KeyCode::Left);
        assert_eq!(app.input_cursor, "牛".len());
        press(&mut app, KeyCode::Home);
        assert_eq!(app.input_cursor, 0);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.input_cursor, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.input_cursor, "牛奶".len());
    }

    #[test]
    fn ctrl_u_clears_input() {
        let mut app = input_app("buy milk");
        handle_edit(
            &mut app,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.pending_text(), "");
        assert_eq!(app.input_cursor, 0);
    }
}
