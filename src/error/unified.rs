//! Error classification and recovery hints.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Configuration,
    Serialization,
    Internal,
}

/// How a failure is treated by the conversation orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No network: reported to the user as information, not as an error.
    ConnectivityUnavailable,
    /// Remote session could not be set up; the assistant stays fallback-only.
    RemoteInitializationFailure,
    /// One remote exchange failed; recovered with an offline answer.
    RemoteCallFailure,
    /// Anything else; reported with the error flag set.
    UnexpectedFailure,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    RetryWithBackoff,
    CheckCredentials,
    CheckConfiguration,
    CheckConnection,
    IncreaseTimeout,
    ContactSupport,
}
