//! Completion collaborator behind the assistant replies.
//!
//! DESIGN
//! ======
//! The conversation model never talks to a completion service directly. The
//! session hands a channel's history to a `Responder` and feeds the result
//! back through `ConversationModel::complete`. `CannedResponder` stands in for
//! a real service: it waits out the configured latency and answers with fixed
//! copy. A networked responder only has to implement the same trait.

#[cfg(test)]
#[path = "responder_test.rs"]
mod responder_test;

use std::time::Duration;

use crate::config::EditorConfig;
use crate::consts::GLOBAL_ASSISTANT_REPLY;
use crate::conversation::{Channel, Message};
use crate::navigator::Section;

/// Errors produced by a completion collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    /// No reply arrived within the allowed time.
    #[error("reply timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    /// The service could not be reached.
    #[error("completion service unavailable: {0}")]
    Unavailable(String),

    /// The service refused the request.
    #[error("completion request rejected: {0}")]
    Rejected(String),
}

impl ResponderError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "E_REPLY_TIMEOUT",
            Self::Unavailable(_) => "E_REPLY_UNAVAILABLE",
            Self::Rejected(_) => "E_REPLY_REJECTED",
        }
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unavailable(_))
    }
}

/// Provider-neutral async completion call. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    /// Produce the assistant reply for `channel` given its history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`ResponderError`] if the service times out, is unreachable,
    /// or rejects the request.
    async fn respond_to(&self, channel: Channel, history: &[Message]) -> Result<Message, ResponderError>;
}

/// Simulated responder with fixed latency and fixed copy.
#[derive(Clone, Debug)]
pub struct CannedResponder {
    chat_latency: Duration,
    section_latency: Duration,
}

impl CannedResponder {
    #[must_use]
    pub fn new(chat_latency: Duration, section_latency: Duration) -> Self {
        Self { chat_latency, section_latency }
    }

    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.chat_latency(), config.section_latency())
    }

    /// Latency applied to `channel`.
    #[must_use]
    pub fn latency(&self, channel: Channel) -> Duration {
        match channel {
            Channel::Global => self.chat_latency,
            Channel::Section(_) => self.section_latency,
        }
    }
}

#[async_trait::async_trait]
impl Responder for CannedResponder {
    async fn respond_to(&self, channel: Channel, _history: &[Message]) -> Result<Message, ResponderError> {
        tokio::time::sleep(self.latency(channel)).await;
        Ok(Message::assistant(canned_reply(channel)))
    }
}

/// Fixed reply copy for a channel.
#[must_use]
pub fn canned_reply(channel: Channel) -> &'static str {
    match channel {
        Channel::Global => GLOBAL_ASSISTANT_REPLY,
        Channel::Section(Section::ResultsHeader) => {
            "I've updated the results header with a new personality type. Take a look at the preview!"
        }
        Channel::Section(Section::PersonalityTraits) => {
            "Done! Each personality trait now has a Learn More button so visitors can dig deeper."
        }
        Channel::Section(Section::CareTips) => {
            "I've refreshed the care tips. Let me know if you'd like a different tone or more detail."
        }
    }
}
