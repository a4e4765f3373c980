use crate::models::ChatMessage;
use chrono::Local;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Lays out one transcript entry. Outgoing messages hug the right edge,
/// answers the left, each bubble taking at most three quarters of `width`.
pub fn render_message(message: &ChatMessage, width: u16) -> Vec<Line<'static>> {
    let from_user = message.is_from_user();
    let style = base_style(from_user);
    let alignment = if from_user {
        Alignment::Right
    } else {
        Alignment::Left
    };

    let mut lines = Vec::new();

    let timestamp = message
        .created_at()
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();
    let who = if from_user { "You" } else { "Bot" };
    lines.push(
        Line::from(vec![
            Span::styled(who.to_string(), style.add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {}", timestamp), style.add_modifier(Modifier::DIM)),
        ])
        .alignment(alignment),
    );

    let wrap_width = (width as usize * 3 / 4).saturating_sub(2).max(8);
    for wrapped in wrap(message.content(), wrap_width) {
        let text = if from_user {
            format!("{} │", wrapped)
        } else {
            format!("│ {}", wrapped)
        };
        lines.push(Line::from(Span::styled(text, style)).alignment(alignment));
    }

    lines
}

fn base_style(from_user: bool) -> Style {
    if from_user {
        Style::default().fg(Color::Rgb(135, 206, 250))
    } else {
        Style::default().fg(Color::Rgb(144, 238, 144))
    }
}
