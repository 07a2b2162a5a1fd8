//! `carcare chat` — Interactive chat mode.

use carcare_agent::RemoteAnswerClient;
use carcare_core::message::ChatSession;
use std::io::Write;
use tokio::io::{self, AsyncBufReadExt, BufReader};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (config, client) = super::build_client()?;

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        5K Car Care Assistant — Chat          ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:  {}", client.provider_name());
    println!("  Model:     {}", config.provider.model);
    println!(
        "  API key:   {}",
        if config.has_api_key() { "configured" } else { "missing (offline answers only)" }
    );
    println!();
    println!("  Ask about services, booking, hours or contact details.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut session = ChatSession::new();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let question = line.trim();
        if question.is_empty() {
            prompt()?;
            continue;
        }
        if is_exit(question) {
            break;
        }

        eprint!("  ...");
        session = exchange(&client, session, question).await;
        eprint!("\r     \r");

        println!();
        if let Some(answer) = session.last_answer() {
            for line in answer.lines() {
                println!("  Assistant > {line}");
            }
        }
        println!();
        prompt()?;
    }

    tracing::debug!(session = %session.id, exchanges = session.exchanges(), "Chat session ended");

    println!();
    println!("  Goodbye! 🚗");
    println!();

    Ok(())
}

/// Resolve one question and return the session with the exchange appended.
pub async fn exchange(
    client: &RemoteAnswerClient,
    session: ChatSession,
    question: &str,
) -> ChatSession {
    let answer = client.resolve(question).await;
    session.with_exchange(question, answer)
}

fn is_exit(line: &str) -> bool {
    matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q")
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}
