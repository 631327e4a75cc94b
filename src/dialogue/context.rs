//! Per-conversation state
//!
//! The assistant itself is stateless between turns. Callers either keep a
//! [`ConversationContext`] themselves, use a [`Conversation`], or park
//! contexts in a [`SessionStore`] keyed by session id.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::Assistant;

/// Short-term memory of one conversation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    /// Location of the last successful statistics answer
    pub last_location: Option<String>,
}

impl ConversationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }
}

/// Contexts for many concurrent conversations
///
/// Two turns of the same session running at once may overwrite each
/// other's context; the last save wins.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, (ConversationContext, Instant)>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for `session_id`, empty when unknown
    pub async fn load(&self, session_id: &str) -> ConversationContext {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|(ctx, _)| ctx.clone())
            .unwrap_or_default()
    }

    /// Store the context and mark the session active
    pub async fn save(&self, session_id: &str, ctx: ConversationContext) {
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), (ctx, Instant::now()));
    }

    /// Drop sessions idle longer than `max_idle`, returning how many
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, (_, last_active)| last_active.elapsed() <= max_idle);

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    /// Number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Check if empty
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// One conversation bound to a shared assistant
#[derive(Debug, Clone)]
pub struct Conversation {
    assistant: Arc<Assistant>,
    context: ConversationContext,
}

impl Conversation {
    /// Start a conversation with an empty context
    pub fn new(assistant: Arc<Assistant>) -> Self {
        Self {
            assistant,
            context: ConversationContext::default(),
        }
    }

    /// Answer one user message
    pub async fn respond(&mut self, user_text: &str, lang: &str) -> String {
        self.assistant.respond(&mut self.context, user_text, lang).await
    }

    /// Current context
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }
}
