//! Shared test helpers: scripted transport and counting probe.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use fitpro::connectivity::ConnectivityProbe;
use fitpro::error::{AssistantError, Result};
use fitpro::remote::ChatTransport;
use fitpro::types::ConversationTurn;

/// What the scripted transport does on its next call.
pub enum Step {
    Reply(String),
    Fail(u16),
    Hang,
    Panic,
}

/// A transport that plays back queued steps and records every request.
pub struct ScriptedTransport {
    steps: Mutex<Vec<Step>>,
    requests: Mutex<Vec<Vec<ConversationTurn>>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        let transport = Self::new();
        transport.queue(Step::Reply(text.to_string()));
        transport
    }

    pub fn queue(&self, step: Step) {
        self.steps.lock().unwrap().push(step);
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<Vec<ConversationTurn>> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, turns: &[ConversationTurn]) -> Result<String> {
        self.requests.lock().unwrap().push(turns.to_vec());
        let step = {
            let mut steps = self.steps.lock().unwrap();
            if steps.is_empty() {
                Step::Reply("Mock response".to_string())
            } else {
                steps.remove(0)
            }
        };
        match step {
            Step::Reply(text) => Ok(text),
            Step::Fail(status) => Err(AssistantError::api(status, "scripted failure")),
            Step::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(AssistantError::api(504, "unreachable"))
            }
            Step::Panic => panic!("scripted transport panic"),
        }
    }
}

/// Probe with a switchable answer that counts how often it was asked.
pub struct CountingProbe {
    online: AtomicBool,
    calls: AtomicUsize,
}

impl CountingProbe {
    pub fn new(online: bool) -> Arc<Self> {
        Arc::new(Self {
            online: AtomicBool::new(online),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectivityProbe for CountingProbe {
    async fn is_online(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.online.load(Ordering::SeqCst)
    }
}
