//! Conversation orchestrator.
//!
//! [`Assistant`] is the single entry point a host calls with the user's
//! text. Per message it probes connectivity once, then answers through the
//! remote model when a session is available and the device is online, or
//! through the offline [`FallbackResponder`] otherwise. Every path ends in a
//! [`Reply`]; no error crosses `respond`.

use std::sync::Arc;
use std::time::Duration;

use rand::RngCore;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::{AssistantConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::connectivity::{ConnectivityProbe, TcpProbe};
use crate::error::{AssistantError, FailureKind, Result};
use crate::fallback::FallbackResponder;
use crate::remote::{ChatTransport, Exchange, GeminiClient, RemoteResponder, SYSTEM_PROMPT};
use crate::types::{ConversationHistory, Reply, HISTORY_LIMIT};
use crate::util::timeout::with_timeout;

pub const PROMPT_FOR_INPUT: &str = "Please type a message to get started!";
pub const OFFLINE_MESSAGE: &str =
    "❌ No internet connection. Unable to reach AI. Please check your connection.";
pub const NO_INTERNET: &str = "❌ No internet connection.";
pub const SOMETHING_WENT_WRONG: &str = "Oops! Something went wrong. Try again in a moment.";
pub const WELCOME_MESSAGE: &str = "👋 Hi! I'm your FitPro fitness assistant. Ask me anything about fitness, workouts, nutrition, or motivation!";

/// How the assistant answers, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum AssistantMode {
    Remote,
    FallbackOnly,
}

/// One chat session: owns its history and answers one message at a time.
pub struct Assistant {
    remote: Option<RemoteResponder>,
    probe: Arc<dyn ConnectivityProbe>,
    fallback: FallbackResponder,
    history: Mutex<ConversationHistory>,
    request_timeout: Duration,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("mode", &self.mode())
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl Assistant {
    /// Set up a session from configuration.
    ///
    /// Tries once to initialise the Gemini session. Without a key, or if
    /// initialisation fails, the assistant stays fallback-only for its
    /// whole lifetime.
    pub fn new(config: AssistantConfig) -> Self {
        let transport: Option<Arc<dyn ChatTransport>> = if !config.has_credentials() {
            info!("No Gemini API key configured; using fallback responses");
            None
        } else {
            match GeminiClient::from_config(&config) {
                Ok(client) => {
                    info!(model = client.model(), "Gemini session initialised");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        kind = ?FailureKind::RemoteInitializationFailure,
                        "Gemini initialisation failed; using fallback responses"
                    );
                    None
                }
            }
        };

        let mut builder = Self::builder()
            .probe(Arc::new(TcpProbe::new(config.probe.clone())))
            .request_timeout(config.request_timeout)
            .history_limit(config.history_limit);
        if let Some(transport) = transport {
            builder = builder.transport(transport);
        }
        builder.build()
    }

    /// Session from `FITPRO_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(AssistantConfig::from_env())
    }

    /// Assemble a session from explicit parts.
    pub fn builder() -> AssistantBuilder {
        AssistantBuilder::default()
    }

    pub fn mode(&self) -> AssistantMode {
        if self.remote.is_some() {
            AssistantMode::Remote
        } else {
            AssistantMode::FallbackOnly
        }
    }

    /// Answer one user message.
    ///
    /// Holds the session lock for the whole request, so concurrent callers
    /// on the same session are served one after another.
    pub async fn respond(&self, message: &str) -> Reply {
        if message.trim().is_empty() {
            return Reply::new(PROMPT_FOR_INPUT);
        }

        let mut history = self.history.lock().await;
        let online = self.probe.is_online().await;
        debug!(online, mode = %self.mode(), "routing message");

        match self.route(message, online, &mut history).await {
            Ok(reply) => reply,
            Err(e) => unexpected_failure_reply(&e, online),
        }
    }

    async fn route(
        &self,
        message: &str,
        online: bool,
        history: &mut ConversationHistory,
    ) -> Result<Reply> {
        let Some(remote) = &self.remote else {
            return Ok(Reply::new(self.fallback.reply(message)));
        };

        if !online {
            info!(kind = ?FailureKind::ConnectivityUnavailable, "offline; remote model not contacted");
            return Ok(Reply::new(OFFLINE_MESSAGE));
        }

        match self.call_remote(remote, message, history).await {
            Ok(exchange) => {
                let text = exchange.apply(history)?;
                Ok(Reply::new(text))
            }
            Err(e) if e.failure_kind() == FailureKind::UnexpectedFailure => Err(e),
            Err(e) => {
                warn!(
                    error = %e,
                    kind = ?FailureKind::RemoteCallFailure,
                    "remote reply failed; answering offline"
                );
                Ok(Reply::new(self.fallback.reply(message)))
            }
        }
    }

    // Runs the call on its own task so a panicking transport surfaces as an
    // error instead of unwinding through `respond`.
    async fn call_remote(
        &self,
        remote: &RemoteResponder,
        message: &str,
        history: &ConversationHistory,
    ) -> Result<Exchange> {
        let remote = remote.clone();
        let message = message.to_string();
        let snapshot = history.clone();
        let task = tokio::spawn(async move { remote.reply(&message, &snapshot).await });
        let abort = task.abort_handle();

        let outcome = with_timeout(self.request_timeout, async {
            task.await.map_err(|e| {
                AssistantError::InvalidState(format!("remote request task failed: {e}"))
            })?
        })
        .await;

        if matches!(outcome, Err(AssistantError::Timeout(_))) {
            abort.abort();
        }
        outcome
    }

    /// Forget the conversation so far. Waits for an in-flight request.
    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
        debug!("conversation history cleared");
    }

    /// Snapshot of the current history.
    pub async fn history(&self) -> ConversationHistory {
        self.history.lock().await.clone()
    }
}

// Last resort for faults the routing could not recover from.
fn unexpected_failure_reply(e: &AssistantError, online: bool) -> Reply {
    error!(error = %e, kind = ?FailureKind::UnexpectedFailure, online, "assistant error");
    if online {
        Reply::error(SOMETHING_WENT_WRONG)
    } else {
        Reply::new(NO_INTERNET)
    }
}

/// Builder for [`Assistant`]. Unset parts default to fallback-only mode,
/// a TCP probe against the public resolver and an entropy-seeded RNG.
pub struct AssistantBuilder {
    transport: Option<Arc<dyn ChatTransport>>,
    probe: Option<Arc<dyn ConnectivityProbe>>,
    rng: Option<Box<dyn RngCore + Send>>,
    system_prompt: String,
    request_timeout: Duration,
    history_limit: usize,
}

impl Default for AssistantBuilder {
    fn default() -> Self {
        Self {
            transport: None,
            probe: None,
            rng: None,
            system_prompt: SYSTEM_PROMPT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            history_limit: HISTORY_LIMIT,
        }
    }
}

impl AssistantBuilder {
    /// Remote service to use; without one the session is fallback-only.
    pub fn transport(mut self, transport: Arc<dyn ChatTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn probe(mut self, probe: Arc<dyn ConnectivityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Random source for generic fallback replies.
    pub fn rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn build(self) -> Assistant {
        let fallback = match self.rng {
            Some(rng) => FallbackResponder::with_rng(rng),
            None => FallbackResponder::new(),
        };
        Assistant {
            remote: self
                .transport
                .map(|t| RemoteResponder::new(t, self.system_prompt)),
            probe: self
                .probe
                .unwrap_or_else(|| Arc::new(TcpProbe::default())),
            fallback,
            history: Mutex::new(ConversationHistory::with_limit(self.history_limit)),
            request_timeout: self.request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_failure_online_is_error_reply() {
        let e = AssistantError::InvalidState("history".into());
        let reply = unexpected_failure_reply(&e, true);
        assert_eq!(reply.text(), SOMETHING_WENT_WRONG);
        assert!(reply.is_error());
    }

    #[test]
    fn unexpected_failure_offline_reports_no_internet() {
        let e = AssistantError::InvalidState("remote request task failed".into());
        let reply = unexpected_failure_reply(&e, false);
        assert_eq!(reply.text(), NO_INTERNET);
        assert!(!reply.is_error());
    }
}
