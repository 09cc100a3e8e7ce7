mod app;
mod ui;

pub use app::{App, InputMode};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use portal_config::PreferenceStore;
use portal_core::Present;
use portal_engine::{ListController, ToastQueue};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;

/// Runs the interactive list view until the user quits.
///
/// `toasts` must be the notifier the controller was built with. Preference
/// changes are written on exit.
pub async fn run<R: Present>(
    controller: ListController<R>,
    toasts: Arc<ToastQueue>,
    prefs: PreferenceStore,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller, toasts, prefs).await;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.close()?;
    res
}

async fn run_app<B: ratatui::backend::Backend, R: Present>(
    terminal: &mut Terminal<B>,
    app: &mut App<R>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('?') => app.toggle_help(),
                KeyCode::Char('j') | KeyCode::Down => app.next(),
                KeyCode::Char('k') | KeyCode::Up => app.previous(),
                KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => app.next_page(),
                KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => app.previous_page(),
                KeyCode::Char('g') => app.start_go_to_page(),
                KeyCode::Char('/') => app.start_search(),
                KeyCode::Char('s') => app.cycle_status(),
                KeyCode::Char('t') => app.cycle_date(),
                KeyCode::Char('c') => app.clear_filters(),
                KeyCode::Char('d') => app.start_delete(),
                KeyCode::Char('r') => app.refresh().await,
                KeyCode::Char('v') => app.toggle_view_mode(),
                _ => {}
            },
            InputMode::Searching => match key.code {
                KeyCode::Enter => app.confirm_search(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Backspace => app.input_backspace(),
                KeyCode::Char(c) => app.input_char(c),
                _ => {}
            },
            InputMode::GoToPage => match key.code {
                KeyCode::Enter => app.confirm_go_to_page(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Backspace => app.input_backspace(),
                KeyCode::Char(c) => app.input_char(c),
                _ => {}
            },
            InputMode::ConfirmDelete(_) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    if app.begin_delete() {
                        terminal.draw(|f| ui::draw(f, app))?;
                        app.confirm_delete().await;
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_input(),
                _ => {}
            },
            InputMode::ShowingHelp => match key.code {
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => app.toggle_help(),
                _ => {}
            },
        }
    }
}
