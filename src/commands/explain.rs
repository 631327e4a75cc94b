use anyhow::{Context, Result};

use vaxassist::config::Config;
use vaxassist::dialogue::ConversationContext;
use vaxassist::knowledge::KnowledgeBase;

use super::build_assistant;

pub fn explain(config: &Config, text: &str) -> Result<()> {
    let assistant = build_assistant(config)?;
    let explanation = assistant.explain(&ConversationContext::default(), text);

    println!("Input:       {text}");
    println!("Normalized:  {}", explanation.normalized);
    for (from, to) in &explanation.corrections {
        println!("  corrected  {from} -> {to}");
    }
    println!(
        "Sentiment:   polarity {:.2}, subjectivity {:.2}",
        explanation.sentiment.polarity, explanation.sentiment.subjectivity
    );
    println!(
        "Emotion:     {}",
        explanation.emotion.map(|e| e.as_str()).unwrap_or("none")
    );
    println!(
        "Entities:    {}",
        if explanation.entities.is_empty() {
            "-".to_string()
        } else {
            explanation.entities.join(", ")
        }
    );
    println!("Route:       {}", explanation.route);

    println!("Top matches:");
    for m in &explanation.top_matches {
        println!("  {:<28} {:.3}", m.intent, m.confidence);
    }

    Ok(())
}

pub fn intents() -> Result<()> {
    let kb = KnowledgeBase::builtin().context("Failed to load knowledge base")?;

    println!("{} intents", kb.len());
    println!("================================");
    for entry in kb.entries() {
        println!(
            "{:<28} {:>3} patterns {:>3} replies",
            entry.intent,
            entry.patterns.len(),
            entry.responses.len()
        );
    }

    let languages = kb.translations().languages();
    println!("\nPre-translated languages: {}", languages.join(", "));

    Ok(())
}
