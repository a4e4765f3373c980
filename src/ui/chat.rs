use crate::app::App;
use crate::constants::INPUT_PLACEHOLDER;
use crate::ui::message::render_message;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Scroll offsets are `u16`; longer content pins to the last offset.
fn line_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

pub fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.messages.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No messages yet. Type a question below and press Enter.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(hint, inner);
        return;
    }

    let mut lines = Vec::new();
    for message in &app.messages {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, inner.width));
    }

    let total_lines = line_count(lines.len());
    let max_scroll = total_lines.saturating_sub(inner.height);
    if app.follow_tail || app.chat_scroll >= max_scroll {
        app.chat_scroll = max_scroll;
        app.follow_tail = true;
    }

    f.render_widget(Paragraph::new(lines).scroll((app.chat_scroll, 0)), inner);
}

pub fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.history_index {
        Some(idx) => format!(" History {}/{} ", idx + 1, app.input_history.len()),
        None => " Message ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Gray))
        .title(title);
    let inner = block.inner(area);

    let prefix = "→ ";
    let visible_width = inner.width.saturating_sub(prefix.width() as u16 + 1);
    let text_width = app.input.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    let line = if app.input.is_empty() {
        Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::DarkGray)),
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::DarkGray)),
            Span::styled(app.input.as_str(), Style::default().fg(Color::White)),
        ])
    };

    f.render_widget(Paragraph::new(line).block(block).scroll((0, scroll_offset)), area);

    let cursor_x = inner.x + prefix.width() as u16 + text_width - scroll_offset;
    f.set_cursor_position((cursor_x, inner.y));
}

pub fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Diagnostics ");
    let inner = block.inner(area);

    let log_lines: Vec<Line> = app
        .logs
        .entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(entry.as_str()),
            ])
        })
        .collect();

    let total_log_lines = line_count(log_lines.len());
    let logs_scroll = total_log_lines.saturating_sub(inner.height);

    let logs_para = Paragraph::new(log_lines)
        .block(block)
        .style(Style::default().fg(Color::DarkGray))
        .scroll((logs_scroll, 0));
    f.render_widget(logs_para, area);
}
