// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;
pub mod message;
pub mod quit_confirm;

use crate::app::{App, AppScreen};
use crate::key_handlers::handle_key;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const TICK_RATE: Duration = Duration::from_millis(100);

enum Event {
    Input(CEvent),
    Tick,
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(mut app: App) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("UI started against {}", app.endpoint);
    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("UI loop exited with error: {:?}", err);
    }
    res
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // crossterm polling blocks, so it gets its own thread.
    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        loop {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => {
                    if let Ok(event) = event::read() {
                        if tx.blocking_send(Event::Input(event)).is_err() {
                            return;
                        }
                    }
                }
                Ok(false) => {}
                Err(_) => return,
            }

            if last_tick.elapsed() >= TICK_RATE {
                if tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        app.sync().await;
        terminal.draw(|f| draw(f, app))?;

        match rx.recv().await {
            Some(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                handle_key(key, app);
            }
            Some(Event::Input(_)) => {}
            Some(Event::Tick) => app.status_indicator.update_spinner(),
            None => break,
        }

        if app.screen == AppScreen::Quit {
            info!("Quit requested");
            break;
        }
    }

    Ok(())
}

/// Renders the whole screen.
pub fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::draw_header(f, rows[0], &app.endpoint);

    if app.show_logs {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
            .split(rows[1]);
        chat::draw_messages(f, app, columns[0]);
        chat::draw_logs(f, app, columns[1]);
    } else {
        chat::draw_messages(f, app, rows[1]);
    }

    app.status_indicator.render(f, rows[2]);
    chat::draw_input(f, app, rows[3]);
    footer::draw_footer(f, rows[4], app);

    if app.screen == AppScreen::QuitConfirm {
        let area = f.area();
        quit_confirm::draw_quit_confirm(f, area);
    }
}
