//! REPL (Read-Eval-Print Loop) for interactive chat
//!
//! Reads prompts, hands them to the [`AgentRuntime`], and lets the
//! attached event sinks render everything the run produces. The REPL
//! itself only prints the banner and slash-command output.

use relay_application::{AgentRuntime, RunRejected, ToolRegistry};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;

/// Interactive chat REPL.
pub struct ChatRepl {
    runtime: Arc<AgentRuntime>,
    registry: Arc<dyn ToolRegistry>,
    strategy_label: String,
}

impl ChatRepl {
    pub fn new(runtime: Arc<AgentRuntime>, registry: Arc<dyn ToolRegistry>) -> Self {
        Self {
            runtime,
            registry,
            strategy_label: "local".to_string(),
        }
    }

    /// Name the active resolution strategy in the banner.
    pub fn with_strategy_label(mut self, label: impl Into<String>) -> Self {
        self.strategy_label = label.into();
        self
    }

    /// Run the interactive REPL.
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("agent-relay").join("history.txt"));
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline("you> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    // The sinks render the run; busy rejections already
                    // surfaced through the custom event.
                    if let Err(RunRejected::AlreadyActive) =
                        self.runtime.process_prompt(line).await
                    {
                        continue;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          agent-relay - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Strategy: {}", self.strategy_label);
        println!("Tools:    {}", self.tool_names().join(", "));
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /tools    - List available tools");
        println!("  /quit     - Exit chat");
        println!();
    }

    fn tool_names(&self) -> Vec<String> {
        self.registry
            .list()
            .into_iter()
            .map(|definition| definition.name)
            .collect()
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /tools           - List available tools");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/tools" => {
                println!();
                for definition in self.registry.list() {
                    println!("  {} - {}", definition.name, definition.description);
                    for param in &definition.parameters {
                        let required = if param.required { "required" } else { "optional" };
                        println!(
                            "      {} ({}, {}): {}",
                            param.name, param.param_type, required, param.description
                        );
                    }
                }
                println!();
                false
            }
            _ => {
                println!("Unknown command: {}. Try /help.", cmd);
                false
            }
        }
    }
}
