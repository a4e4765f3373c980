use crate::constants::SPINNER_FRAMES;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Default)]
pub struct StatusIndicator {
    thinking: bool,
    status_text: String,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_text = status.into();
    }

    pub fn status(&self) -> &str {
        &self.status_text
    }

    pub fn clear_status(&mut self) {
        self.status_text.clear();
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let indicator = if self.thinking {
            SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
        } else {
            " "
        };

        // Yellow only for something the user should act on.
        let status_color = if self.thinking || self.status_text.is_empty() {
            Color::DarkGray
        } else {
            Color::Yellow
        };

        let status = Line::from(vec![
            Span::styled(indicator, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(self.status_text.as_str(), Style::default().fg(status_color)),
        ]);

        frame.render_widget(Paragraph::new(status).alignment(Alignment::Left), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_lifecycle() {
        let mut indicator = StatusIndicator::new();
        indicator.set_thinking(true);
        indicator.set_status("Waiting for answer (1 in flight)...");
        assert!(indicator.is_thinking());
        assert_eq!(indicator.status(), "Waiting for answer (1 in flight)...");

        indicator.set_thinking(false);
        indicator.clear_status();
        assert!(!indicator.is_thinking());
        assert!(indicator.status().is_empty());
    }
}
