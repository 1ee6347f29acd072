//! Core types for the assistant.

pub mod history;
pub mod message;
pub mod reply;

pub use history::*;
pub use message::*;
pub use reply::*;
