//! Conversation turns and transcript entries.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::reply::Reply;

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    SystemInstruction,
}

/// One message unit in a conversation, tagged with its speaker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a system instruction turn.
    pub fn system_instruction(content: impl Into<String>) -> Self {
        Self::new(Role::SystemInstruction, content)
    }

    pub fn is_system_instruction(&self) -> bool {
        self.role == Role::SystemInstruction
    }
}

/// A line in the chat transcript a host shell renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub is_user: bool,
    pub timestamp: String,
}

impl ChatMessage {
    /// Transcript entry for something the user typed.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            timestamp: clock_timestamp(Local::now()),
        }
    }

    /// Transcript entry for an assistant reply, keeping the reply's timestamp.
    pub fn from_reply(reply: &Reply) -> Self {
        Self {
            text: reply.text().to_string(),
            is_user: false,
            timestamp: reply.timestamp().to_string(),
        }
    }
}

/// `HH:MM` wall-clock stamp shown next to chat lines.
pub(crate) fn clock_timestamp(now: DateTime<Local>) -> String {
    now.format("%H:%M").to_string()
}
