use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Settings;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(settings: Settings) -> Result<()> {
    let mut app = App::new(settings);
    tracing::info!("session started");

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(
        expenses = app.budget.expenses().len(),
        "session ended"
    );
    if let Err(ref e) = result {
        tracing::error!("{e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, table border + header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(key, app);
        }
    }
    Ok(())
}

pub(crate) fn handle_key(key: event::KeyEvent, app: &mut App) {
    if app.input_mode == InputMode::Alert {
        app.dismiss_alert();
        return;
    }
    if app.show_help {
        app.show_help = false;
        return;
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app),
        InputMode::Command => handle_command_input(key, app),
        InputMode::Alert => {}
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char(':') => app.start_command(""),
        KeyCode::Char('b') => app.start_command("budget "),
        KeyCode::Char('a') => app.start_command("add "),
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        KeyCode::Char('G') => {
            let len = app.budget.expenses().len();
            scroll_to_bottom(
                &mut app.expense_index,
                &mut app.expense_scroll,
                len,
                app.visible_rows.max(1),
            );
        }
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Expenses,
        KeyCode::Tab => cycle_screen(app, 1),
        KeyCode::BackTab => cycle_screen(app, -1),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            // A failed command (e.g. an unwritable export path) is reported, not fatal
            if let Err(e) = commands::handle_command(&input, app) {
                tracing::error!(command = %input, "{e:#}");
                app.set_status(format!("Error: {e:#}"));
            }
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn cycle_screen(app: &mut App, delta: isize) {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0) as isize;
    let next = (idx + delta).rem_euclid(screens.len() as isize) as usize;
    app.screen = screens[next];
}

fn handle_move_down(app: &mut App) {
    if app.screen == Screen::Expenses {
        let len = app.budget.expenses().len();
        scroll_down(
            &mut app.expense_index,
            &mut app.expense_scroll,
            len,
            app.visible_rows.max(1),
        );
    }
}

fn handle_move_up(app: &mut App) {
    if app.screen == Screen::Expenses {
        scroll_up(&mut app.expense_index, &mut app.expense_scroll);
    }
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tui_tests;
