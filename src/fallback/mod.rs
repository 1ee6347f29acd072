//! Deterministic offline responder.
//!
//! Answers from a fixed keyword table; anything the table does not cover
//! gets a generic fitness reply picked at random from a fixed pool.

mod knowledge;

pub use knowledge::KnowledgeEntry;

use std::fmt;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use knowledge::{GENERIC_REPLIES, KNOWLEDGE};

/// The keyword table, in match order.
pub fn knowledge_table() -> &'static [KnowledgeEntry] {
    KNOWLEDGE
}

/// Replies used when no trigger matches.
pub fn generic_replies() -> &'static [&'static str] {
    GENERIC_REPLIES
}

/// First table entry whose trigger occurs in the normalized message.
pub fn match_knowledge(message: &str) -> Option<&'static KnowledgeEntry> {
    let normalized = message.trim().to_lowercase();
    KNOWLEDGE
        .iter()
        .find(|entry| normalized.contains(entry.trigger))
}

/// Keyword-matching responder with an injectable random source.
pub struct FallbackResponder {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl fmt::Debug for FallbackResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackResponder").finish_non_exhaustive()
    }
}

impl Default for FallbackResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackResponder {
    /// Responder seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Responder drawing generic replies from `rng`.
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Answer `message` from the knowledge table or the generic pool.
    pub fn reply(&self, message: &str) -> String {
        if let Some(entry) = match_knowledge(message) {
            return entry.text.to_string();
        }

        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let index = rng.gen_range(0..GENERIC_REPLIES.len());
        GENERIC_REPLIES[index].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_anywhere_in_message_matches() {
        let responder = FallbackResponder::new();
        let steps = knowledge_table()
            .iter()
            .find(|e| e.trigger == "steps")
            .unwrap();

        assert_eq!(
            responder.reply("  How many STEPS should I take?  "),
            steps.text
        );
    }

    #[test]
    fn first_trigger_in_table_order_wins() {
        // "hello" precedes "workout" and "tired" in the table.
        let entry = match_knowledge("hello, I'm tired after my workout").unwrap();
        assert_eq!(entry.trigger, "hello");

        let entry = match_knowledge("too tired for a workout").unwrap();
        assert_eq!(entry.trigger, "workout");
    }

    #[test]
    fn unmatched_message_draws_from_generic_pool() {
        let responder = FallbackResponder::with_rng(StdRng::seed_from_u64(7));
        for _ in 0..50 {
            let reply = responder.reply("tips?");
            assert!(generic_replies().contains(&reply.as_str()));
        }
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let a = FallbackResponder::with_rng(StdRng::seed_from_u64(42));
        let b = FallbackResponder::with_rng(StdRng::seed_from_u64(42));
        let first: Vec<String> = (0..10).map(|_| a.reply("what about yoga")).collect();
        let second: Vec<String> = (0..10).map(|_| b.reply("what about yoga")).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn no_match_returns_none() {
        assert!(match_knowledge("tips?").is_none());
    }
}
