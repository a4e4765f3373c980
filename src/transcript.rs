// src/transcript.rs

use crate::models::ChatMessage;
use tokio::sync::broadcast;

pub const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    Appended(ChatMessage),
}

/// Insertion-ordered, append-only list of the session's messages.
///
/// Observers call [`Transcript::subscribe`] and receive a
/// [`TranscriptEvent::Appended`] after every append. There is no way to
/// remove or reorder entries.
#[derive(Debug)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    events: broadcast::Sender<TranscriptEvent>,
}

impl Transcript {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            messages: Vec::new(),
            events,
        }
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message.clone());
        // No subscribers is fine.
        let _ = self.events.send(TranscriptEvent::Appended(message));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.events.subscribe()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
