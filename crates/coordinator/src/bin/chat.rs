//! Interactive console for the Wayfarer travel assistant.
//!
//! Usage:
//!   wayfarer-chat --config config.toml
//!
//! Commands inside the loop: `cards` shows the agent cards, `quit` exits.
//!
//! # Environment Variables
//!
//! - `DASHSCOPE_API_KEY` or `OPENAI_API_KEY` - model API key

use std::io::{self, BufRead, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer_coordinator::{Coordinator, CoordinatorConfig};

fn print_cards(cards: &[wayfarer_coordinator::AgentCardInfo]) {
    println!("\nAgent cards:");
    for info in cards {
        println!("\n--- Agent: {} ---", info.name);
        println!("Address: {}", info.url);
        println!("Status: {}", if info.online { "online" } else { "offline" });
        if let Some(card) = &info.card {
            println!("Description: {}", card.description);
            for skill in &card.skills {
                println!("Skill: {} - {}", skill.name, skill.description);
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Wayfarer chat console");
                println!();
                println!("Usage: wayfarer-chat [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>  Path to config.toml");
                println!("  -h, --help           Show this help message");
                println!();
                println!("Commands: 'cards' shows agent cards, 'quit' exits.");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => CoordinatorConfig::from_file(path)?,
        None => CoordinatorConfig::default(),
    };
    let coordinator = Coordinator::new(config)?;

    println!("Wayfarer travel assistant");
    println!("Ask a travel question and press enter. Type 'cards' for agent cards, 'quit' to exit.");
    print_cards(&coordinator.agent_cards().await);

    let stdin = io::stdin();
    loop {
        print!("\nYour question: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let prompt = line.trim();

        match prompt {
            "" => continue,
            "quit" => {
                println!("Thanks for using Wayfarer. Goodbye!");
                break;
            }
            "cards" => print_cards(&coordinator.agent_cards().await),
            _ => {
                println!("Analyzing your request...");
                let reply = coordinator.process(prompt).await;
                println!("\nAssistant:\n{reply}");
            }
        }
    }

    Ok(())
}
