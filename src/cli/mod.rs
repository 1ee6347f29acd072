//! Command-line host for the assistant.

pub mod chat;

use clap::{Args, Parser, Subcommand};

use crate::config::AssistantConfig;

/// FitPro fitness assistant
#[derive(Parser, Debug)]
#[command(name = "fitpro", version, about = "FitPro — fitness assistant CLI")]
pub struct Cli {
    #[command(flatten)]
    pub session: SessionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat session (`/clear` resets history, `/quit` exits)
    Chat,
    /// Ask a single question and print the reply
    Ask(AskArgs),
    /// Report whether the connectivity probe sees the network
    Probe,
    /// Send a test prompt to Gemini to check the API key
    Ping,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Gemini model (overrides FITPRO_GEMINI_MODEL)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Ignore any configured API key and answer offline only
    #[arg(long, global = true)]
    pub offline: bool,
}

impl SessionArgs {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> AssistantConfig {
        let mut config = AssistantConfig::from_env();
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if self.offline {
            config.api_key = None;
        }
        config
    }
}

/// Arguments for `fitpro ask`.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question (joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

impl AskArgs {
    pub fn text(&self) -> String {
        self.message.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_chat_with_defaults() {
        let cli = Cli::try_parse_from(["fitpro", "chat"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat));
        assert!(cli.session.model.is_none());
        assert!(!cli.session.offline);
    }

    #[test]
    fn parse_ask_joins_words() {
        let cli = Cli::try_parse_from(["fitpro", "ask", "how", "many", "steps?"]).unwrap();
        match cli.command {
            Commands::Ask(args) => assert_eq!(args.text(), "how many steps?"),
            other => panic!("expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fitpro",
            "ask",
            "--offline",
            "-m",
            "gemini-2.0-flash",
            "hello",
        ])
        .unwrap();
        assert!(cli.session.offline);
        assert_eq!(cli.session.model.as_deref(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn offline_flag_drops_key() {
        let args = SessionArgs {
            model: None,
            offline: true,
        };
        assert!(!args.config().has_credentials());
    }

    #[test]
    fn parse_ask_without_message_is_error() {
        assert!(Cli::try_parse_from(["fitpro", "ask"]).is_err());
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["fitpro"]).is_err());
    }
}
