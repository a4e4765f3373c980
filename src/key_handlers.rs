use crate::app::{App, AppScreen};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key(key: KeyEvent, app: &mut App) {
    match app.screen {
        AppScreen::Chat => handle_chat_input(key, app),
        AppScreen::QuitConfirm => handle_quit_confirm_input(key, app),
        AppScreen::Quit => {}
    }
}

pub fn handle_chat_input(key: KeyEvent, app: &mut App) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            app.screen = AppScreen::QuitConfirm;
        }
        KeyCode::Enter => app.submit_input(),
        KeyCode::Up if ctrl => app.history_prev(),
        KeyCode::Down if ctrl => app.history_next(),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::F(2) => app.show_logs = !app.show_logs,
        KeyCode::Backspace => {
            app.input.pop();
            app.history_index = None;
        }
        KeyCode::Char(c) => {
            if ctrl {
                match c {
                    'c' => app.screen = AppScreen::QuitConfirm,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
                app.history_index = None;
            }
        }
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.screen = AppScreen::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.screen = AppScreen::Chat;
        }
        _ => {}
    }
}
