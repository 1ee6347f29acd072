//! Command handlers.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::assistant::{Assistant, WELCOME_MESSAGE};
use crate::connectivity::{ConnectivityProbe, TcpProbe};
use crate::error::AssistantError;
use crate::remote::GeminiClient;
use crate::types::{ChatMessage, Reply};

use super::SessionArgs;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Interactive session over stdin/stdout.
pub async fn handle_chat(session: &SessionArgs) -> CliResult {
    let assistant = Assistant::new(session.config());
    eprintln!("({} mode; /clear resets, /quit exits)", assistant.mode());
    print_line(&ChatMessage::from_reply(&Reply::new(WELCOME_MESSAGE)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "/quit" | "/exit" => break,
            "/clear" => {
                assistant.clear_history().await;
                eprintln!("(history cleared)");
            }
            text => {
                let reply = assistant.respond(text).await;
                print_line(&ChatMessage::from_reply(&reply));
            }
        }
    }
    Ok(())
}

/// One-shot question.
pub async fn handle_ask(session: &SessionArgs, message: &str) -> CliResult {
    let assistant = Assistant::new(session.config());
    let reply = assistant.respond(message).await;
    if reply.is_error() {
        return Err(reply.into_text().into());
    }
    println!("{reply}");
    Ok(())
}

pub async fn handle_probe(session: &SessionArgs) -> CliResult {
    let config = session.config();
    let probe = TcpProbe::new(config.probe.clone());
    let state = if probe.is_online().await { "online" } else { "offline" };
    println!("{state} ({}:{})", config.probe.host, config.probe.port);
    Ok(())
}

/// Check the configured Gemini key with a single short prompt.
pub async fn handle_ping(session: &SessionArgs) -> CliResult {
    let config = session.config();
    let client = GeminiClient::from_config(&config)?;
    match client.smoke_test().await {
        Ok(text) => {
            println!("✓ {} responded: {}", client.model(), text.trim());
            Ok(())
        }
        Err(e) => Err(describe(e).into()),
    }
}

fn describe(e: AssistantError) -> String {
    let retry = if e.is_retryable() {
        "; may succeed if retried"
    } else {
        ""
    };
    format!(
        "✗ API test failed: {e} (suggestion: {:?}{retry})",
        e.recovery_suggestion()
    )
}

fn print_line(message: &ChatMessage) {
    let speaker = if message.is_user { "You" } else { "Assistant" };
    println!("[{}] {speaker}: {}", message.timestamp, message.text);
}
