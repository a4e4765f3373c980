use crate::{
    api::AnswerSource,
    errors::ChatResult,
    models::{AnswerResponse, ChatMessage},
    transcript::{Transcript, TranscriptEvent},
};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    Idle,
    AwaitingResponse,
}

/// Drives the transcript through send/receive cycles.
///
/// Sends are not serialised: a second send while one is in flight starts
/// another request, and answers are appended in the order they arrive.
#[derive(Debug, Default)]
pub struct ChatController {
    transcript: Transcript,
    in_flight: usize,
    last_error: Option<String>,
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the outgoing message and marks a request as in flight.
    pub fn begin_send(&mut self, text: &str) -> ChatMessage {
        let message = ChatMessage::user(text);
        self.transcript.append(message.clone());
        self.in_flight += 1;
        self.last_error = None;
        debug!("Sent message {} ({} in flight)", message.id(), self.in_flight);
        message
    }

    /// Applies the outcome of one request. Returns the bot message if one was
    /// appended.
    pub fn complete(&mut self, outcome: ChatResult<AnswerResponse>) -> Option<ChatMessage> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            Ok(response) => match response.first_answer() {
                Some(answer) => {
                    let message = ChatMessage::bot(response.id, answer);
                    self.transcript.append(message.clone());
                    info!("Received answer {}", message.id());
                    Some(message)
                }
                None => {
                    debug!("Response {} had no choices, dropping it", response.id);
                    None
                }
            },
            Err(e) => {
                warn!("Exchange failed: {}", e);
                self.last_error = Some(e.to_string());
                None
            }
        }
    }

    pub fn state(&self) -> ExchangeState {
        if self.in_flight == 0 {
            ExchangeState::Idle
        } else {
            ExchangeState::AwaitingResponse
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.transcript.subscribe()
    }
}

/// Runs one full send cycle. The lock is released while the request is in
/// flight so the UI keeps rendering.
pub async fn exchange(
    controller: Arc<Mutex<ChatController>>,
    source: Arc<dyn AnswerSource>,
    text: String,
) -> Option<ChatMessage> {
    {
        let mut guard = controller.lock().await;
        guard.begin_send(&text);
    }

    let outcome = source.send(&text).await;

    let mut guard = controller.lock().await;
    guard.complete(outcome)
}
