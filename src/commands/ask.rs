use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use vaxassist::config::Config;
use vaxassist::dialogue::{ConversationContext, SessionStore};

use super::{build_assistant, reply_language};

pub async fn ask(config: &Config, text: &str, lang: Option<&str>) -> Result<()> {
    let assistant = build_assistant(config)?;
    let lang = reply_language(lang);

    let mut ctx = ConversationContext::default();
    let reply = assistant.respond(&mut ctx, text, &lang).await;
    println!("{reply}");

    Ok(())
}

pub async fn chat(config: &Config, lang: Option<&str>, session: Option<String>) -> Result<()> {
    let assistant = build_assistant(config)?;
    let lang = reply_language(lang);
    let session_id = session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let sessions = SessionStore::new();

    println!("vaxassist chat (session {session_id}). Type 'quit' to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if matches!(text, "quit" | "exit") {
            break;
        }

        let reply = assistant
            .respond_in_session(&sessions, &session_id, text, &lang)
            .await;
        println!("{reply}");

        sessions.evict_idle(config.session_idle()).await;
    }

    tracing::info!(session = %session_id, "Chat ended");
    Ok(())
}
