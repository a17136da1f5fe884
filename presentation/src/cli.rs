//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// Demo agent wiring a console UI to an LLM-driven tool pipeline.
#[derive(Parser, Debug)]
#[command(name = "agent-relay", version, about)]
pub struct Cli {
    /// Prompt to process in one-shot mode
    pub prompt: Option<String>,

    /// Start interactive chat mode
    #[arg(long)]
    pub chat: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the technical event view on stderr
    #[arg(long)]
    pub quiet: bool,

    /// Force the local (keyword) resolution strategy even with a key configured
    #[arg(long)]
    pub no_remote: bool,

    /// Path to a config file (merged over relay.toml and the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Store an API key in the global config file and exit
    #[arg(long, value_name = "KEY")]
    pub set_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_shot_prompt() {
        let cli = Cli::parse_from(["agent-relay", "show my portfolio", "-vv", "--quiet"]);
        assert_eq!(cli.prompt.as_deref(), Some("show my portfolio"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert!(!cli.chat);
    }

    #[test]
    fn parses_chat_mode_flags() {
        let cli = Cli::parse_from(["agent-relay", "--chat", "--no-remote"]);
        assert!(cli.chat);
        assert!(cli.no_remote);
        assert!(cli.prompt.is_none());
    }
}
