// src/models.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One entry of the transcript. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    id: String,
    content: String,
    created_at: DateTime<Utc>,
    sender: Sender,
}

impl ChatMessage {
    /// Creates an outgoing message with a fresh id.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            created_at: Utc::now(),
            sender: Sender::User,
        }
    }

    /// Creates an incoming message carrying the id of the response it came from.
    pub fn bot(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            created_at: Utc::now(),
            sender: Sender::Bot,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// A candidate answer returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    pub text: String,
}

/// Body returned by `GET <base>/<message>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerResponse {
    pub id: String,
    pub choices: Vec<Choice>,
}

impl AnswerResponse {
    /// Text of the first choice with surrounding whitespace and `"` removed.
    /// `None` when the endpoint returned no choices.
    pub fn first_answer(&self) -> Option<String> {
        self.choices.first().map(|choice| {
            choice
                .text
                .trim_matches(|c: char| c.is_whitespace() || c == '"')
                .to_string()
        })
    }
}

/// Logs details of each call to the answer endpoint.
#[derive(Debug, Clone)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
