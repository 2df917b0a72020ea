//! Quote Generator A2A agent server

use anyhow::Context;
use quote_a2a::{A2AServer, DefaultRequestHandler};
use quote_agent::{QuoteExecutor, QuoteGenerator, agent_card, telemetry};
use quote_utils::{AppConfig, init_tracing};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;
    init_tracing(config.log_format);

    info!(?config, "Starting quote agent");

    let telemetry = telemetry::from_config(&config.telemetry);
    let generator = QuoteGenerator::from_settings(&config.openai).with_telemetry(telemetry.clone());
    let executor = QuoteExecutor::new(generator);

    let card = agent_card(&config.server.public_url);
    let base_url = config.server.public_url.trim_end_matches('/');

    println!("🎯 Quote Generator A2A Agent");
    println!("{}", "=".repeat(50));
    println!("🌐 Agent will be available at: {base_url}");
    println!("📝 Agent Card: {base_url}/.well-known/agent.json");
    if telemetry.is_enabled() {
        println!("📊 Observability: Enabled with Langfuse");
    } else {
        println!("📊 Observability: Disabled");
    }
    println!("Press Ctrl+C to stop the agent");
    println!();

    let server = A2AServer::new(card, DefaultRequestHandler::new(Arc::new(executor)));
    let served = server.serve(&config.server.bind_address()).await;

    telemetry.flush().await;
    info!("Observability shutdown completed");

    served.with_context(|| format!("Server on {} failed", config.server.bind_address()))
}
