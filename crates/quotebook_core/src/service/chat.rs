//! Persona chat session over a black-box completion transport.
//!
//! # Responsibility
//! - Keep the visible conversation, starting with the persona greeting.
//! - Build the request window (persona prompt + recent turns) for each send.
//! - Turn transport failures into an in-conversation apology plus a
//!   dismissible error.
//!
//! # Invariants
//! - Blank input never reaches the transport.
//! - The request window holds the system prompt and at most
//!   `HISTORY_WINDOW` messages, ending with the message just sent.

use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Messages carried into each request, the new user message included.
pub const HISTORY_WINDOW: usize = 11;

/// Speaker role on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One request turn handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// One visible conversation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub from_user: bool,
    /// Epoch milliseconds.
    pub timestamp_ms: i64,
}

impl ChatMessage {
    fn now(text: impl Into<String>, from_user: bool) -> Self {
        Self {
            text: text.into(),
            from_user,
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }
}

/// Transport failure reported by a [`ChatTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub message: String,
}

impl ChatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "chat transport failed: {}", self.message)
    }
}

impl Error for ChatError {}

/// Remote completion endpoint. Returns one reply for the given turns.
pub trait ChatTransport {
    fn complete(&self, turns: &[ChatTurn]) -> Result<String, ChatError>;
}

/// Character the session speaks as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPersona {
    pub system_prompt: String,
    pub greeting: String,
    /// Shown when the transport answers with an empty reply.
    pub empty_reply: String,
    /// Shown when the transport fails.
    pub apology: String,
}

impl Default for ChatPersona {
    fn default() -> Self {
        Self {
            system_prompt: "You are Albert Einstein, the theoretical physicist (1879-1955). \
                Answer in character with scientific insight, philosophical depth and gentle \
                humor. Keep replies concise, draw on your own writings when it fits, and stay \
                warm and curious about the universe, creativity, peace and human potential."
                .to_string(),
            greeting: "Greetings! I am Albert Einstein. Shall we talk about physics, \
                philosophy, imagination or the mysteries of the universe?"
                .to_string(),
            empty_reply: "Forgive me, I seem to have lost my train of thought. Could you \
                ask that another way?"
                .to_string(),
            apology: "It seems we are having technical difficulties. Even elegant theories \
                meet practical obstacles. Please try again."
                .to_string(),
        }
    }
}

/// Conversation state for one chat screen.
pub struct ChatSession<T: ChatTransport> {
    persona: ChatPersona,
    transport: T,
    messages: Vec<ChatMessage>,
    last_error: Option<String>,
}

impl<T: ChatTransport> ChatSession<T> {
    pub fn new(persona: ChatPersona, transport: T) -> Self {
        let messages = vec![ChatMessage::now(persona.greeting.clone(), false)];
        Self {
            persona,
            transport,
            messages,
            last_error: None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Sends `text` and appends the reply (or the apology on failure).
    ///
    /// Returns `false` when `text` is blank and nothing was sent.
    pub fn send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        self.messages.push(ChatMessage::now(text, true));
        self.last_error = None;

        let turns = self.request_turns();
        match self.transport.complete(&turns) {
            Ok(reply) => {
                let reply = if reply.trim().is_empty() {
                    self.persona.empty_reply.clone()
                } else {
                    reply
                };
                self.messages.push(ChatMessage::now(reply, false));
                info!(
                    "event=chat_send module=chat status=ok turns={} messages={}",
                    turns.len(),
                    self.messages.len()
                );
            }
            Err(err) => {
                warn!("event=chat_send module=chat status=error error={err}");
                self.last_error = Some(format!("Connection error: {}", err.message));
                self.messages
                    .push(ChatMessage::now(self.persona.apology.clone(), false));
            }
        }
        true
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Resets the conversation to the greeting.
    pub fn clear(&mut self) {
        self.messages = vec![ChatMessage::now(self.persona.greeting.clone(), false)];
        self.last_error = None;
    }

    fn request_turns(&self) -> Vec<ChatTurn> {
        let start = self.messages.len().saturating_sub(HISTORY_WINDOW);
        std::iter::once(ChatTurn {
            role: ChatRole::System,
            content: self.persona.system_prompt.clone(),
        })
        .chain(self.messages[start..].iter().map(|message| ChatTurn {
            role: if message.from_user {
                ChatRole::User
            } else {
                ChatRole::Assistant
            },
            content: message.text.clone(),
        }))
        .collect()
    }
}
