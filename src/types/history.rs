//! Bounded, in-memory conversation history.

use std::collections::VecDeque;

use serde::Serialize;

use super::message::ConversationTurn;
use crate::error::{AssistantError, Result};

/// Maximum number of user/assistant turns kept (10 exchanges).
pub const HISTORY_LIMIT: usize = 20;

/// Ordered user/assistant turns of one session.
///
/// The system instruction is never stored here: it is prepended to every
/// outbound request instead, so eviction can only ever drop dialogue.
/// When the bound is exceeded the oldest turns go first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,
    limit: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// History holding at most `limit` turns. The limit is rounded up to
    /// whole exchanges (an even count, at least 2) so eviction never leaves
    /// an assistant turn without its question.
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(2).next_multiple_of(2);
        Self {
            turns: VecDeque::with_capacity(limit + 2),
            limit,
        }
    }

    /// Append a turn, then evict from the front down to the limit.
    pub fn push(&mut self, turn: ConversationTurn) -> Result<()> {
        if turn.is_system_instruction() {
            return Err(AssistantError::InvalidState(
                "system instruction cannot be stored in conversation history".into(),
            ));
        }
        self.turns.push_back(turn);
        self.trim();
        Ok(())
    }

    /// Drop the oldest turns until at most `limit` remain.
    pub fn trim(&mut self) {
        while self.turns.len() > self.limit {
            self.turns.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    pub fn to_vec(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }
}
