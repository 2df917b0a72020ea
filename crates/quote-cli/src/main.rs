//! Command-line test client for the quote agent

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use quote_a2a::{A2AClient, AgentCard};
use quote_utils::{LogFormat, init_tracing};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Requests sent by the automated test run
const TEST_MESSAGES: [&str; 6] = [
    "Generate a quote about success",
    "Give me an inspirational quote about courage",
    "Create a quote about teamwork",
    "Give me a random quote",
    "Surprise me with a quote",
    "Generate a motivational quote",
];

const TEST_PAUSE: Duration = Duration::from_secs(1);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "quote-cli")]
#[command(about = "Test client for the Quote Generator A2A agent", long_about = None)]
struct Args {
    /// Base URL of the agent
    #[arg(long, default_value = "http://localhost:8080")]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Fetch and print the agent card
    Card,
    /// Send the canonical test requests
    Test,
    /// Read requests from stdin until `quit`
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(LogFormat::Compact);

    let args = Args::parse();
    info!(url = %args.url, "Starting quote-cli");

    let client = A2AClient::new(&args.url, Duration::from_secs(args.timeout))
        .with_context(|| format!("Invalid agent URL '{}'", args.url))?;

    match args.command {
        Some(Command::Card) => show_card(&client).await?,
        Some(Command::Test) => {
            run_tests(&client, TEST_PAUSE).await;
        }
        Some(Command::Interactive) => interactive(&client).await?,
        None => {
            println!("🎯 Quote Generator A2A Agent - Test Client");
            println!("{}", "=".repeat(50));
            println!();
            if !health_check(&args.url).await {
                println!("Please start the agent first with: cargo run --bin quote-agent");
                return Ok(());
            }
            println!();
            run_tests(&client, TEST_PAUSE).await;
        }
    }

    Ok(())
}

/// Fetch the agent card with a short timeout
async fn health_check(url: &str) -> bool {
    let client = match A2AClient::new(url, HEALTH_TIMEOUT) {
        Ok(client) => client,
        Err(e) => {
            println!("❌ Invalid agent URL: {e}");
            return false;
        }
    };

    match client.get_agent_card().await {
        Ok(_) => {
            println!("✅ Agent is running and accessible");
            true
        }
        Err(e) => {
            println!("❌ Agent is not running or not accessible: {e}");
            false
        }
    }
}

async fn show_card(client: &A2AClient) -> anyhow::Result<()> {
    let card = client
        .get_agent_card()
        .await
        .context("Failed to fetch agent card")?;

    println!("📝 Agent: {} (v{})", card.name, card.version);
    println!("📋 Description: {}", card.description);
    println!("🌐 URL: {}", card.url);
    println!("🛠️  Skills: {} available", card.skills.len());
    println!("{}", skills_table(&card));
    Ok(())
}

fn skills_table(card: &AgentCard) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Skill", "Description", "Tags", "Examples"]);

    for skill in &card.skills {
        table.add_row(vec![
            skill.name.clone(),
            skill.description.clone(),
            skill.tags.join(", "),
            skill.examples.join("\n"),
        ]);
    }
    table
}

/// Send every test message; returns the number of failed cases
async fn run_tests(client: &A2AClient, pause: Duration) -> usize {
    println!("🧪 Starting Quote Generation Tests");
    println!("{}", "=".repeat(50));

    let mut failures = 0;
    for (i, message) in TEST_MESSAGES.iter().enumerate() {
        let case = i + 1;
        println!("Test {case}: '{message}'");

        match client.send_text(message).await {
            Ok(reply) if !reply.is_empty() => {
                println!("📥 Response: {reply}");
                println!("✅ Test passed");
            }
            Ok(_) => {
                println!("❌ No quote text found in response");
                failures += 1;
            }
            Err(e) => {
                println!("❌ Test {case} failed: {e}");
                warn!(case, error = %e, "Test request failed");
                failures += 1;
            }
        }
        println!("{}", "-".repeat(50));

        tokio::time::sleep(pause).await;
    }

    println!(
        "🎯 Quote Generation Tests Completed! {}/{} passed",
        TEST_MESSAGES.len() - failures,
        TEST_MESSAGES.len()
    );
    failures
}

fn is_exit_command(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q")
}

async fn interactive(client: &A2AClient) -> anyhow::Result<()> {
    let card = client
        .get_agent_card()
        .await
        .context("Failed to initialize client")?;

    println!("🎮 Interactive {} Test Mode", card.name);
    println!("Type 'quit' to exit");
    println!("{}", "-".repeat(40));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nEnter your quote request: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if is_exit_command(input) {
            break;
        }
        if input.is_empty() {
            println!("Please enter a quote request.");
            continue;
        }

        println!("🔄 Generating quote...");
        match client.send_text(input).await {
            Ok(reply) if !reply.is_empty() => println!("✨ {reply}"),
            Ok(_) => println!("❌ No quote received"),
            Err(e) => println!("❌ Error: {e}"),
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}
