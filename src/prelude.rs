//! Convenience re-exports for common use.

pub use crate::assistant::{Assistant, AssistantMode};
pub use crate::config::AssistantConfig;
pub use crate::connectivity::{ConnectivityProbe, ProbeConfig, StaticProbe, TcpProbe};
pub use crate::error::{AssistantError, Result};
pub use crate::fallback::FallbackResponder;
pub use crate::remote::{ChatTransport, GeminiClient, RemoteResponder};
pub use crate::types::{ChatMessage, ConversationHistory, ConversationTurn, Reply, Role};
