use crate::app::{App, AppScreen};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn footer_text(screen: AppScreen) -> &'static str {
    match screen {
        AppScreen::Chat => {
            "Enter send · Ctrl+↑/↓ history · PgUp/PgDn scroll · F2 diagnostics · Esc quit"
        }
        AppScreen::QuitConfirm => "Press 'y' to confirm quit or 'n' to cancel.",
        AppScreen::Quit => "",
    }
}

/// Draws the footer with instructions for the current screen.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let footer = Paragraph::new(footer_text(app.screen))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
