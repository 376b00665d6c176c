//! Main chat loop orchestration.
//!
//! Resolves configuration, the API key, and the optional document, then
//! hands control to `ChatSession::run` until the user leaves.

use console::style;
use tracing::{debug, info};
use uuid::Uuid;

use bobby_core::chat::client::ConversationClient;
use bobby_core::chat::session::{ChatSession, EXIT_KEYWORD, SessionEnd};
use bobby_infra::config::{default_config_path, load_session_config};
use bobby_infra::document::load_document_context;
use bobby_infra::llm::create_provider;
use bobby_infra::secret::resolve_api_key;
use bobby_observe::tracing_setup::session_span;

use crate::cli::Cli;
use super::input::ChatInput;
use super::renderer::ConsoleSink;

/// Run the interactive chat loop.
pub async fn run_chat_loop(cli: &Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = load_session_config(&config_path).await;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let api_key = resolve_api_key(&config.provider.api_key_env)?;

    let document = match &config.document_path {
        Some(path) => load_document_context(path).await,
        None => None,
    };

    let provider = create_provider(&config.provider, &config.model, &api_key);

    let session_id = Uuid::now_v7().to_string();
    let span = session_span(&session_id, provider.name(), &config.model);
    info!(
        session_id = %session_id,
        model = %config.model,
        max_history = config.max_history,
        document = document.is_some(),
        "Starting chat session"
    );

    print_banner(&config.persona.name, &config.model);

    let client = ConversationClient::new(provider, config, document.as_deref()).with_span(span);
    debug!(chars = client.system_prompt().len(), "System prompt rendered");
    let mut session = ChatSession::new(client);

    let (mut input, _writer) = ChatInput::new("> ".to_string())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    let mut sink = ConsoleSink::new();

    let end = session.run(&mut input, &mut sink).await;
    drop(input);

    if end == SessionEnd::Interrupted {
        println!("\nExiting chat...");
    }

    info!(
        session_id = %session_id,
        turns = session.turn_count(),
        reason = ?end,
        "Chat session ended"
    );
    Ok(())
}

fn print_banner(name: &str, model: &str) {
    println!();
    println!("  {} {}", style(name).bold(), style(format!("({model})")).dim());
    println!(
        "  {}",
        style(format!("Type '{EXIT_KEYWORD}' or press Ctrl+D to leave.")).dim()
    );
    println!();
}
