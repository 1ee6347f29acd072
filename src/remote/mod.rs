//! Remote generative-language client.
//!
//! [`ChatTransport`] is the seam to the outbound service: one call with an
//! ordered turn list, one text completion back. [`RemoteResponder`] builds
//! the turn list for a message and hands the caller an [`Exchange`] to
//! apply to its history once the call has succeeded.

pub mod gemini;
pub mod http;

pub use gemini::GeminiClient;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{AssistantError, Result};
use crate::types::{ConversationHistory, ConversationTurn};

/// Instruction sent ahead of every conversation.
pub const SYSTEM_PROMPT: &str = "You are a friendly and knowledgeable fitness assistant for the FitPro app.
You help users with:
- Fitness advice and workout recommendations
- Nutrition and calorie information
- Motivation and goal-setting
- Exercise technique and form
- Recovery and rest advice

Be concise, friendly, and encouraging. Keep responses to 2-3 sentences unless more detail is requested.
If the question is not fitness-related, politely redirect to fitness topics.";

/// A single outbound call to a generative-language service.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Submit the ordered turns and return the plain-text completion.
    async fn complete(&self, turns: &[ConversationTurn]) -> Result<String>;
}

/// A completed user/assistant exchange, not yet recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: ConversationTurn,
    pub assistant: ConversationTurn,
}

impl Exchange {
    pub fn completion(&self) -> &str {
        &self.assistant.content
    }

    /// Append both turns to `history` (trimming it) and return the completion.
    ///
    /// Either both turns are recorded or neither is.
    pub fn apply(self, history: &mut ConversationHistory) -> Result<String> {
        if self.user.is_system_instruction() || self.assistant.is_system_instruction() {
            return Err(AssistantError::InvalidState(
                "exchange must consist of dialogue turns".into(),
            ));
        }
        history.push(self.user)?;
        let completion = self.assistant.content.clone();
        history.push(self.assistant)?;
        Ok(completion)
    }
}

/// Builds requests from history and talks to a [`ChatTransport`].
#[derive(Clone)]
pub struct RemoteResponder {
    transport: Arc<dyn ChatTransport>,
    system_prompt: String,
}

impl std::fmt::Debug for RemoteResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteResponder")
            .field("transport", &self.transport.name())
            .finish_non_exhaustive()
    }
}

impl RemoteResponder {
    pub fn new(transport: Arc<dyn ChatTransport>, system_prompt: impl Into<String>) -> Self {
        Self {
            transport,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn transport(&self) -> &Arc<dyn ChatTransport> {
        &self.transport
    }

    /// Ordered turns for one request: instruction, history, then `message`.
    pub fn build_turns(&self, message: &str, history: &ConversationHistory) -> Vec<ConversationTurn> {
        let mut turns = Vec::with_capacity(history.len() + 2);
        let starts_with_instruction = history
            .iter()
            .next()
            .is_some_and(ConversationTurn::is_system_instruction);
        if !starts_with_instruction {
            turns.push(ConversationTurn::system_instruction(self.system_prompt.as_str()));
        }
        turns.extend(history.iter().cloned());
        turns.push(ConversationTurn::user(message));
        turns
    }

    /// Ask the remote service about `message`.
    ///
    /// Makes exactly one transport call and leaves `history` untouched;
    /// the caller applies the returned [`Exchange`] on success.
    pub async fn reply(&self, message: &str, history: &ConversationHistory) -> Result<Exchange> {
        let turns = self.build_turns(message, history);
        debug!(
            transport = self.transport.name(),
            turns = turns.len(),
            "requesting remote completion"
        );
        let completion = self.transport.complete(&turns).await?;
        Ok(Exchange {
            user: ConversationTurn::user(message),
            assistant: ConversationTurn::assistant(completion),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use std::sync::Mutex;

    struct Recording {
        reply: Option<String>,
        seen: Mutex<Vec<Vec<ConversationTurn>>>,
    }

    #[async_trait]
    impl ChatTransport for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        async fn complete(&self, turns: &[ConversationTurn]) -> Result<String> {
            self.seen.lock().unwrap().push(turns.to_vec());
            self.reply
                .clone()
                .ok_or_else(|| AssistantError::api(500, "boom"))
        }
    }

    fn responder(reply: Option<&str>) -> (RemoteResponder, Arc<Recording>) {
        let transport = Arc::new(Recording {
            reply: reply.map(str::to_string),
            seen: Mutex::new(Vec::new()),
        });
        (RemoteResponder::new(transport.clone(), SYSTEM_PROMPT), transport)
    }

    #[tokio::test]
    async fn instruction_then_history_then_message() {
        let (responder, transport) = responder(Some("Stretch daily."));
        let mut history = ConversationHistory::new();
        history.push(ConversationTurn::user("hi")).unwrap();
        history.push(ConversationTurn::assistant("hello")).unwrap();

        let exchange = responder.reply("tips?", &history).await.unwrap();
        assert_eq!(exchange.completion(), "Stretch daily.");

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let roles: Vec<Role> = seen[0].iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![Role::SystemInstruction, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(seen[0][0].content, SYSTEM_PROMPT);
        assert_eq!(seen[0][3].content, "tips?");
    }

    #[tokio::test]
    async fn failure_leaves_history_untouched() {
        let (responder, _) = responder(None);
        let history = ConversationHistory::new();

        let err = responder.reply("tips?", &history).await.unwrap_err();
        assert!(matches!(err, AssistantError::Api { status: 500, .. }));
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn applying_exchange_appends_two_turns() {
        let (responder, _) = responder(Some("Walk more."));
        let mut history = ConversationHistory::new();

        let exchange = responder.reply("tips?", &history).await.unwrap();
        let text = exchange.apply(&mut history).unwrap();

        assert_eq!(text, "Walk more.");
        let turns = history.to_vec();
        assert_eq!(turns, vec![ConversationTurn::user("tips?"), ConversationTurn::assistant("Walk more.")]);
    }
}
