use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::client::TaskApi;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::model::{ClientConfig, Tab, Task};
use crate::ops::sync::Controller;
use crate::ops::view_ops::{Msg, ViewState};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the task list
    Navigate,
    /// Typing into the new-task input
    Input,
}

/// Main application state
pub struct App {
    pub controller: Controller<Box<dyn TaskApi>>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Help overlay visible
    pub show_help: bool,
    /// Index into the task list
    pub cursor: usize,
    /// First visible task row
    pub scroll_offset: usize,
    /// Byte offset of the caret in the pending text
    pub input_cursor: usize,
    /// Shown dimmed in the status row
    pub server_label: String,
}

impl App {
    pub fn new(api: Box<dyn TaskApi>, config: &ClientConfig, active_tab: Tab) -> Self {
        App {
            controller: Controller::new(api, active_tab),
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            show_help: false,
            cursor: 0,
            scroll_offset: 0,
            input_cursor: 0,
            server_label: String::new(),
        }
    }

    pub fn view(&self) -> &ViewState {
        self.controller.state()
    }

    pub fn active_tab(&self) -> Tab {
        self.view().active_tab
    }

    pub fn tasks(&self) -> &[Task] {
        &self.view().tasks
    }

    pub fn pending_text(&self) -> &str {
        &self.view().pending_text
    }

    /// The task under the cursor
    pub fn cursor_task(&self) -> Option<&Task> {
        self.tasks().get(self.cursor)
    }

    /// Send a message through the view-model, then keep the cursors valid
    /// against whatever the request chain left behind.
    pub fn dispatch(&mut self, msg: Msg) {
        self.controller.dispatch(msg);
        self.clamp_cursor();
        self.input_cursor = self.input_cursor.min(self.pending_text().len());
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.tasks().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
        if self.scroll_offset > self.cursor {
            self.scroll_offset = self.cursor;
        }
    }
}

/// Restore the last active tab, defaulting to current
pub fn restore_tab(state_dir: &std::path::Path) -> Tab {
    read_ui_state(state_dir)
        .map(|s| s.active_tab)
        .unwrap_or_default()
}

/// Save the active tab
pub fn save_ui_state(app: &App, state_dir: &std::path::Path) {
    let state = UiState {
        active_tab: app.active_tab(),
    };
    if let Err(e) = write_ui_state(state_dir, &state) {
        tracing::warn!(error = %e, "could not save UI state");
    }
}

/// Everything the TUI needs from the caller
pub struct TuiOptions {
    pub api: Box<dyn TaskApi>,
    pub config: ClientConfig,
    pub server_label: String,
    /// Directory holding state.json
    pub state_dir: PathBuf,
}

/// Run the TUI application
pub fn run(options: TuiOptions) -> Result<(), Box<dyn std::error::Error>> {
    let tab = restore_tab(&options.state_dir);
    let mut app = App::new(options.api, &options.config, tab);
    app.server_label = options.server_label;

    tracing::info!(server = app.server_label.as_str(), %tab, "starting TUI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // First frame goes up before the initial fetch
    terminal.draw(|frame| render::render(frame, &mut app))?;
    app.dispatch(Msg::Mount);

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app, &options.state_dir);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryTaskApi;
    use tempfile::TempDir;

    fn app_with(tasks: Vec<Task>) -> App {
        let api = MemoryTaskApi::with_tasks(tasks);
        let mut app = App::new(Box::new(api), &ClientConfig::default(), Tab::Current);
        app.dispatch(Msg::Mount);
        app
    }

    #[test]
    fn cursor_clamps_after_list_shrinks() {
        let mut app = app_with(vec![Task::new(1, "a", false), Task::new(2, "b", false)]);
        app.cursor = 1;
        app.dispatch(Msg::DeleteTask(2));
        assert_eq!(app.cursor, 0);
        assert_eq!(app.cursor_task().map(|t| t.id), Some(1));
    }

    #[test]
    fn cursor_resets_on_empty_list() {
        let mut app = app_with(vec![Task::new(1, "a", false)]);
        app.cursor = 0;
        app.dispatch(Msg::SelectTab(Tab::Completed));
        assert_eq!(app.cursor, 0);
        assert!(app.cursor_task().is_none());
    }

    #[test]
    fn input_cursor_follows_cleared_input() {
        let mut app = app_with(vec![]);
        app.dispatch(Msg::SetInput("buy milk".into()));
        app.input_cursor = 8;
        app.dispatch(Msg::SubmitNewTask);
        assert_eq!(app.pending_text(), "");
        assert_eq!(app.input_cursor, 0);
    }

    #[test]
    fn active_tab_survives_restart() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with(vec![]);
        assert_eq!(restore_tab(tmp.path()), Tab::Current);

        app.dispatch(Msg::SelectTab(Tab::Completed));
        save_ui_state(&app, tmp.path());
        assert_eq!(restore_tab(tmp.path()), Tab::Completed);
    }
}
