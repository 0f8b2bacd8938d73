use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ledger::Ledger;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::form::FormField;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ledger: &Ledger) -> Result<()> {
    let mut app = App::new(super::local_now);
    let loaded = app.refresh(ledger);
    app.report(loaded);
    tracing::info!(
        dir = %ledger.dir().display(),
        expenses = app.expenses.len(),
        "dashboard started"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "dashboard stopped");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            let result = match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger),
                InputMode::Command => handle_command_input(key, app, ledger),
                InputMode::Form => handle_form_input(key, app, ledger),
                InputMode::Confirm => handle_confirm_input(key, app, ledger),
            };
            app.report(result);
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let page = app.expense_page();
            for _ in 0..page / 2 {
                scroll_down(
                    &mut app.expense_index,
                    &mut app.expense_scroll,
                    app.expenses.len(),
                    page,
                );
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.expense_page() / 2 {
                scroll_up(&mut app.expense_index, &mut app.expense_scroll);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let page = app.expense_page();
            scroll_down(
                &mut app.expense_index,
                &mut app.expense_scroll,
                app.expenses.len(),
                page,
            );
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.expense_index, &mut app.expense_scroll);
        }
        KeyCode::Char('g') => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        KeyCode::Char('G') => {
            let page = app.expense_page();
            scroll_to_bottom(
                &mut app.expense_index,
                &mut app.expense_scroll,
                app.expenses.len(),
                page,
            );
        }
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::Dashboard)?,
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::Expenses)?,
        KeyCode::Tab | KeyCode::BackTab => {
            let next = match app.screen {
                Screen::Dashboard => Screen::Expenses,
                Screen::Expenses => Screen::Dashboard,
            };
            switch_screen(app, ledger, next)?;
        }
        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.screen = Screen::Expenses;
            app.input_mode = InputMode::Form;
            app.status_message.clear();
        }
        KeyCode::Char('D') if app.screen == Screen::Expenses => app.request_delete_selected(),
        KeyCode::Char('C') => app.request_clear_all(ledger)?,
        KeyCode::Char('r') => {
            app.refresh(ledger)?;
            app.set_status(format!("Loaded {} expenses", app.expenses.len()));
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => {
            if app.filter.is_some() {
                app.reset_filter(ledger)?;
            } else {
                app.status_message.clear();
            }
        }
        _ => {}
    }
    Ok(())
}

fn switch_screen(app: &mut App, ledger: &Ledger, screen: Screen) -> Result<()> {
    app.screen = screen;
    app.refresh(ledger)
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.status_message.clear();
        }
        KeyCode::Enter => app.submit_form(ledger)?,
        KeyCode::Tab | KeyCode::Down => app.form.focus = app.form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus = app.form.focus.prev(),
        KeyCode::Left if app.form.focus == FormField::Category => app.form.cycle_category(-1),
        KeyCode::Right if app.form.focus == FormField::Category => app.form.cycle_category(1),
        KeyCode::Backspace => {
            if let Some(text) = app.form.focused_text() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            app.status_message.clear();
            if let Some(text) = app.form.focused_text() {
                text.push(c);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
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
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm(ledger)?,
        _ => app.cancel(),
    }
    Ok(())
}
