//! Chat channels driving edits.
//!
//! DESIGN
//! ======
//! There is one global channel plus one channel per results-page section.
//! Each channel keeps an insertion-ordered message list, the compose buffer,
//! and the flags the panel renders (starter prompts, thinking).
//!
//! Assistant replies are asynchronous. `send` hands out a `PendingReply`
//! stamped with the channel's generation; anything that invalidates the
//! channel (a controls-mode reset, an undo) bumps the generation, and
//! `complete` drops replies whose stamp no longer matches. A channel accepts
//! no new message while a reply is pending.

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::navigator::Section;
use crate::responder::ResponderError;

/// Unique identifier for a chat message.
pub type MessageId = Uuid;

/// Author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single, immutable chat message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: f64,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), role, content: content.into(), timestamp: now_ms() }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// An independent conversation thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    Global,
    Section(Section),
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Section(section) => write!(f, "section:{section}"),
        }
    }
}

/// State of one channel as the chat panel renders it.
#[derive(Clone, Debug)]
pub struct ChannelState {
    pub messages: Vec<Message>,
    pub compose: String,
    pub show_prompts: bool,
    pub thinking: bool,
    /// Set once a message was accepted; cleared by a controls-mode reset.
    pub has_interacted: bool,
    /// Bumped whenever the compose input should take focus.
    pub focus_seq: u64,
    generation: u64,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            compose: String::new(),
            show_prompts: true,
            thinking: false,
            has_interacted: false,
            focus_seq: 0,
            generation: 0,
        }
    }
}

impl ChannelState {
    /// Current generation; replies stamped with an older one are discarded.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Messages newest-first, the order the panel displays them.
    pub fn display_order(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().rev()
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.thinking = false;
    }
}

/// A reply the responder owes a channel.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingReply {
    pub channel: Channel,
    pub generation: u64,
    /// Channel history at send time, oldest first.
    pub history: Vec<Message>,
}

/// All chat channels of the editor.
#[derive(Clone, Debug)]
pub struct ConversationModel {
    global: ChannelState,
    /// One slot per section, indexed by `Section::index`.
    sections: [ChannelState; Section::ALL.len()],
}

impl Default for ConversationModel {
    fn default() -> Self {
        Self { global: ChannelState::default(), sections: std::array::from_fn(|_| ChannelState::default()) }
    }
}

impl ConversationModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn channel(&self, channel: Channel) -> &ChannelState {
        match channel {
            Channel::Global => &self.global,
            Channel::Section(section) => &self.sections[section.index()],
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut ChannelState {
        match channel {
            Channel::Global => &mut self.global,
            Channel::Section(section) => &mut self.sections[section.index()],
        }
    }

    /// Replace the compose buffer.
    pub fn set_compose(&mut self, channel: Channel, text: &str) {
        self.channel_mut(channel).compose = text.to_string();
    }

    /// Post a user message.
    ///
    /// Blank text and sends while a reply is pending are ignored. On
    /// acceptance the message is appended, the compose buffer cleared,
    /// starter prompts hidden, and the channel enters the thinking state.
    pub fn send(&mut self, channel: Channel, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            return None;
        }
        let state = self.channel_mut(channel);
        if state.thinking {
            debug!(%channel, "send ignored while reply pending");
            return None;
        }

        state.messages.push(Message::user(text));
        state.compose.clear();
        state.show_prompts = false;
        state.thinking = true;
        state.has_interacted = true;
        debug!(%channel, messages = state.messages.len(), "user message accepted");

        Some(PendingReply { channel, generation: state.generation, history: state.messages.clone() })
    }

    /// Send whatever is in the compose buffer.
    pub fn submit(&mut self, channel: Channel) -> Option<PendingReply> {
        let text = self.channel(channel).compose.clone();
        self.send(channel, &text)
    }

    /// Resolve a pending reply. Returns true if it was applied to the channel.
    pub fn complete(&mut self, pending: &PendingReply, result: Result<Message, ResponderError>) -> bool {
        let channel = pending.channel;
        let state = self.channel_mut(channel);
        if state.generation != pending.generation {
            warn!(%channel, stale = pending.generation, current = state.generation, "discarding stale reply");
            return false;
        }

        state.thinking = false;
        match result {
            Ok(message) => {
                state.messages.push(message);
                true
            }
            Err(e) => {
                warn!(%channel, error = %e, code = e.error_code(), "assistant reply failed");
                false
            }
        }
    }

    /// Truncate the channel to everything strictly before `id`.
    ///
    /// Undoing a user message restores its text into the compose buffer. An
    /// emptied channel shows its starter prompts again. Unknown ids are a no-op.
    pub fn undo(&mut self, channel: Channel, id: MessageId) -> bool {
        let state = self.channel_mut(channel);
        let Some(index) = state.messages.iter().position(|m| m.id == id) else {
            return false;
        };

        let undone = &state.messages[index];
        if undone.role == Role::User {
            state.compose.clone_from(&undone.content);
            state.focus_seq += 1;
        }
        state.messages.truncate(index);
        state.invalidate();
        if state.messages.is_empty() {
            state.show_prompts = true;
        }
        debug!(%channel, remaining = state.messages.len(), "undo");
        true
    }

    /// Populate the compose buffer from a starter prompt and focus it. Never sends.
    pub fn prompt_click(&mut self, channel: Channel, preset: &str) {
        let state = self.channel_mut(channel);
        state.compose = preset.to_string();
        state.focus_seq += 1;
    }

    /// Reset section channels' UI flags on entering controls mode.
    pub fn enter_controls(&mut self) {
        for state in &mut self.sections {
            state.show_prompts = true;
            state.invalidate();
        }
    }

    /// Clear section channels on leaving controls mode. History is not retained.
    pub fn leave_controls(&mut self) {
        for state in &mut self.sections {
            state.messages.clear();
            state.compose.clear();
            state.has_interacted = false;
            state.show_prompts = true;
            state.invalidate();
        }
    }

    /// Whether a message was accepted on the section's channel since the last reset.
    #[must_use]
    pub fn section_prompted(&self, section: Section) -> bool {
        self.channel(Channel::Section(section)).has_interacted
    }
}

#[allow(clippy::cast_precision_loss)]
fn now_ms() -> f64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as f64,
        Err(_) => 0.0,
    }
}
