//! FitPro assistant
//!
//! The conversational core of the FitPro fitness app. A host submits the
//! user's text to an [`assistant::Assistant`] and renders the
//! [`types::Reply`] it gets back. Answers come from Google Gemini when a key
//! is configured and the device is online, and from a deterministic offline
//! knowledge table otherwise.
//!
//! # Quick Start
//!
//! ```no_run
//! use fitpro::prelude::*;
//!
//! # async fn example() {
//! let assistant = Assistant::new(AssistantConfig::from_env());
//! let reply = assistant.respond("How many steps should I take?").await;
//! println!("[{}] {}", reply.timestamp(), reply.text());
//! # }
//! ```

pub mod assistant;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod fallback;
pub mod prelude;
pub mod remote;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
