use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use turn_relay::cli::Console;
use turn_relay::core::InboundTurn;
use turn_relay::logging;
use turn_relay::relay::{RelayConfig, TurnOutcome, TurnRelay};
use turn_relay::remote::{HttpConversationClient, HttpTokenClient};
use turn_relay::session::FileSessionStore;

/// Conversation id the console channel runs under
const CONSOLE_CONVERSATION_ID: &str = "console";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging system
    let _guard = logging::init_logging()?;

    tracing::info!("=== Turn Relay Starting ===");

    // Create console for terminal I/O; it doubles as the reply sink
    let console = Console::new();

    // Relay configuration from environment
    let config = RelayConfig::from_env()?;

    // Wire up the collaborators: token endpoint, messaging service, state store
    let tokens = Arc::new(HttpTokenClient::new(
        &config.token_endpoint,
        &config.bot_id,
        &config.tenant_id,
    ));
    let client = Arc::new(HttpConversationClient::new(&config.messaging_base_url));
    let store = Arc::new(FileSessionStore::new());

    let relay = TurnRelay::new(config, store, tokens, client);

    // Ctrl-C cancels an in-flight reply drain at its next wait boundary
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, cancelling");
            ctrl_c_cancel.cancel();
        }
    });

    console.print_banner();

    // Announce the conversation to the relay (greeting, remote setup)
    let started = InboundTurn::conversation_started(CONSOLE_CONVERSATION_ID);
    relay.handle(&started, &console, &cancel).await?;

    loop {
        if cancel.is_cancelled() {
            break;
        }

        let input = console.read_input()?;
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        let turn = InboundTurn::message(CONSOLE_CONVERSATION_ID, input);
        match relay.handle(&turn, &console, &cancel).await? {
            TurnOutcome::Completed { delivered: 0 } => {
                console.print_system("No reply from the agent");
            }
            TurnOutcome::Discarded => {
                console.print_system("Message did not match the command prefix");
            }
            TurnOutcome::Failed { message } => {
                // The error reply already reached the console via the sink
                tracing::warn!("Turn failed: {}", message);
            }
            _ => {}
        }
    }

    tracing::info!("=== Turn Relay Shutting Down ===");

    Ok(())
}
