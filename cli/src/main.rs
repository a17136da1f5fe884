//! CLI entrypoint for agent-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection: registry + portfolio tools, resolver strategy
//! (remote with local fallback, or local only), event sinks, and the
//! run orchestrator.

use anyhow::{Result, bail};
use clap::Parser;
use relay_application::{
    AgentRuntime, CompletionClient, DiagnosticsSink, EventSink, FallbackResolver, FanoutSink,
    FixedDelayPacing, IntentResolver, ModelResolver, NoDiagnostics, RuleResolver, ToolRegistry,
};
use relay_domain::Portfolio;
use relay_infrastructure::{
    ConfigLoader, HttpCompletionClient, InMemoryToolRegistry, JsonlEventLogger, RelayConfig,
    register_portfolio_tools,
};
use relay_presentation::{ChatRepl, Cli, EventLogView, TranscriptView};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Credential storage mode: write the key and exit.
    if let Some(key) = &cli.set_key {
        let path = ConfigLoader::store_api_key(key)?;
        println!("API key saved to {}", path.display());
        return Ok(());
    }

    let config = ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?;

    // === Dependency Injection ===

    // Application state and tool registry
    let portfolio = Arc::new(Mutex::new(Portfolio::seeded()));
    let registry: Arc<dyn ToolRegistry> = Arc::new(InMemoryToolRegistry::new());
    register_portfolio_tools(registry.as_ref(), portfolio.clone())?;

    // Event sinks: technical log (stderr), transcript (stdout), JSONL file
    let mut sinks: Vec<Arc<dyn EventSink>> = Vec::new();
    if !cli.quiet {
        sinks.push(Arc::new(EventLogView::new()));
    }
    sinks.push(Arc::new(TranscriptView::new()));

    let mut diagnostics: Arc<dyn DiagnosticsSink> = Arc::new(NoDiagnostics);
    if let Some(events_path) = &config.log.events_path
        && let Some(logger) = JsonlEventLogger::new(events_path)
    {
        info!("event log at {}", logger.path().display());
        let logger = Arc::new(logger);
        sinks.push(logger.clone());
        diagnostics = logger;
    }
    let sink = Arc::new(FanoutSink::new(sinks));

    // Resolution strategy: remote (with local fallback) when a key is
    // configured, local rules otherwise.
    let (resolver, summarizer, strategy_label) = build_resolver(&config, &cli, &registry, &diagnostics);
    info!("using {strategy_label} resolution strategy");

    let mut runtime = AgentRuntime::new(registry.clone(), resolver, sink)
        .with_pacing(Arc::new(FixedDelayPacing::from_millis(
            config.streaming.chunk_delay_ms,
        )))
        .with_diagnostics(diagnostics);
    if let Some(summarizer) = summarizer {
        runtime = runtime.with_summarizer(summarizer);
    }
    let runtime = Arc::new(runtime);

    if cli.chat {
        let repl = ChatRepl::new(runtime, registry).with_strategy_label(strategy_label);
        repl.run().await?;
        return Ok(());
    }

    let Some(prompt) = cli.prompt else {
        bail!("A prompt is required. Use --chat for interactive mode.");
    };

    // One-shot mode: the sinks render the whole run.
    let _ = runtime.process_prompt(&prompt).await;
    Ok(())
}

/// Pick the resolution strategy from config and flags.
fn build_resolver(
    config: &RelayConfig,
    cli: &Cli,
    registry: &Arc<dyn ToolRegistry>,
    diagnostics: &Arc<dyn DiagnosticsSink>,
) -> (
    Arc<dyn IntentResolver>,
    Option<Arc<dyn CompletionClient>>,
    String,
) {
    let local = Arc::new(RuleResolver::new());

    if config.remote_enabled() && !cli.no_remote {
        let client: Arc<dyn CompletionClient> = Arc::new(HttpCompletionClient::new(&config.api));
        let remote = ModelResolver::new(client.clone(), registry.clone());
        let resolver = FallbackResolver::new(Arc::new(remote), local)
            .with_diagnostics(diagnostics.clone());
        (
            Arc::new(resolver),
            Some(client),
            format!("remote ({})", config.api.model),
        )
    } else {
        (local, None, "local".to_string())
    }
}
