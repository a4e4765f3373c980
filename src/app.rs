use crate::api::AnswerSource;
use crate::controller::{exchange, ChatController, ExchangeState};
use crate::log_view::LogView;
use crate::models::ChatMessage;
use crate::status_indicator::StatusIndicator;
use crate::transcript::TranscriptEvent;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Chat,
    QuitConfirm,
    Quit,
}

pub struct App {
    pub screen: AppScreen,
    pub controller: Arc<Mutex<ChatController>>,
    pub source: Arc<dyn AnswerSource>,
    pub endpoint: String,
    /// Rendering copy of the transcript, kept current from transcript events.
    pub messages: Vec<ChatMessage>,
    pub exchange_state: ExchangeState,
    pub in_flight: usize,
    pub last_error: Option<String>,
    pub input: String,
    pub input_history: Vec<String>,
    pub history_index: Option<usize>,
    pub history_limit: usize,
    pub chat_scroll: u16,
    pub follow_tail: bool,
    pub show_logs: bool,
    pub logs: LogView,
    pub status_indicator: StatusIndicator,
    events: broadcast::Receiver<TranscriptEvent>,
}

impl App {
    pub fn new(source: Arc<dyn AnswerSource>, endpoint: String, history_limit: usize) -> App {
        let controller = ChatController::new();
        let events = controller.subscribe();

        App {
            screen: AppScreen::Chat,
            controller: Arc::new(Mutex::new(controller)),
            source,
            endpoint,
            messages: Vec::new(),
            exchange_state: ExchangeState::Idle,
            in_flight: 0,
            last_error: None,
            input: String::new(),
            input_history: Vec::new(),
            history_index: None,
            history_limit,
            chat_scroll: 0,
            follow_tail: true,
            show_logs: false,
            logs: LogView::new(),
            status_indicator: StatusIndicator::new(),
            events,
        }
    }

    /// Sends the current input, if any, and clears it.
    pub fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        self.history_index = None;
        if text.trim().is_empty() {
            return;
        }

        self.remember(&text);
        self.logs.add(format!("Asking: {}", text));
        self.follow_tail = true;

        let controller = self.controller.clone();
        let source = self.source.clone();
        tokio::spawn(exchange(controller, source, text));
    }

    fn remember(&mut self, text: &str) {
        if self.input_history.last().map(String::as_str) != Some(text) {
            self.input_history.push(text.to_string());
        }
        if self.input_history.len() > self.history_limit {
            let excess = self.input_history.len() - self.history_limit;
            self.input_history.drain(..excess);
        }
    }

    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }
        let idx = match self.history_index {
            None => self.input_history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.history_index = Some(idx);
        self.input = self.input_history[idx].clone();
    }

    pub fn history_next(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.input_history.len() => {
                self.history_index = Some(i + 1);
                self.input = self.input_history[i + 1].clone();
            }
            Some(_) => {
                self.history_index = None;
                self.input.clear();
            }
            None => {}
        }
    }

    pub fn scroll_up(&mut self) {
        self.follow_tail = false;
        self.chat_scroll = self.chat_scroll.saturating_sub(5);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(5);
    }

    /// Pulls transcript events and controller state into the render copy.
    pub async fn sync(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(TranscriptEvent::Appended(message)) => self.on_appended(message),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    debug!("Transcript events lagged by {}, resyncing", skipped);
                    // Appends need this lock, so the fresh receiver starts
                    // exactly where the copied transcript ends.
                    let guard = self.controller.lock().await;
                    self.messages = guard.messages().to_vec();
                    self.events = self.events.resubscribe();
                    drop(guard);
                    self.follow_tail = true;
                    break;
                }
                Err(_) => break,
            }
        }

        let guard = self.controller.lock().await;
        self.exchange_state = guard.state();
        self.in_flight = guard.in_flight();
        let error = guard.last_error().map(str::to_string);
        drop(guard);

        if let Some(e) = &error {
            if self.last_error.as_ref() != Some(e) {
                warn!("Showing exchange error: {}", e);
                self.logs.add(format!("Request failed: {}", e));
            }
        }
        self.last_error = error;
        self.update_status();
    }

    fn on_appended(&mut self, message: ChatMessage) {
        if !message.is_from_user() {
            self.logs.add(format!("Answer {} received", message.id()));
        }
        self.messages.push(message);
        self.follow_tail = true;
    }

    fn update_status(&mut self) {
        match self.exchange_state {
            ExchangeState::AwaitingResponse => {
                self.status_indicator.set_thinking(true);
                self.status_indicator
                    .set_status(format!("Waiting for answer ({} in flight)...", self.in_flight));
            }
            ExchangeState::Idle => {
                self.status_indicator.set_thinking(false);
                match &self.last_error {
                    Some(e) => self.status_indicator.set_status(format!("⚠ {}", e)),
                    None => self.status_indicator.clear_status(),
                }
            }
        }
    }
}
