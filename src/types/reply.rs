//! The structured value returned for every submitted message.

use chrono::Local;
use serde::Serialize;

use super::message::clock_timestamp;

/// Assistant reply handed back to the caller.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Reply {
    text: String,
    is_error: bool,
    timestamp: String,
}

impl Reply {
    /// A normal reply, stamped with the current local time.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            timestamp: clock_timestamp(Local::now()),
        }
    }

    /// A reply flagged as an error.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::new(text)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_reply_sets_flag() {
        let reply = Reply::error("Oops");
        assert!(reply.is_error());
        assert_eq!(reply.text(), "Oops");
        assert_eq!(reply.timestamp().len(), 5);
    }

    #[test]
    fn plain_reply_is_not_error() {
        assert!(!Reply::new("hi").is_error());
    }
}
