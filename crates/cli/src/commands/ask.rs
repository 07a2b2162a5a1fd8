//! `carcare ask` — Answer a single question.

use carcare_agent::{AnswerSource, Resolution};

pub async fn run(
    question: &str,
    offline: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, client) = super::build_client()?;

    let resolution = if offline {
        client.resolve_offline(question)
    } else {
        eprint!("  Thinking...");
        let r = client.resolve_detailed(question).await;
        eprint!("\r              \r");
        r
    };

    println!("{}", resolution.answer);

    if verbose {
        eprintln!();
        eprintln!("  [{}]", describe(&resolution));
    }

    Ok(())
}

/// One-line summary of where an answer came from.
pub fn describe(resolution: &Resolution) -> String {
    match &resolution.source {
        AnswerSource::Remote { attempts } => {
            format!("remote model, {attempts} attempt(s)")
        }
        AnswerSource::Fallback {
            reason,
            attempts,
            topic,
        } => format!(
            "knowledge fallback ({reason:?}, topic {}), {attempts} remote attempt(s)",
            topic.as_str()
        ),
    }
}
