//! Session store
//!
//! Short-lived key-value store mapping a session identifier to conversation
//! history. `put` overwrites the full history and resets the idle TTL; there
//! is no partial-update or delete API. A "new chat" is simply a fresh
//! identifier. Concurrent writers for the same identifier race and the last
//! write wins; chat history is best-effort by design.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::watch;

use stylist_core::Turn;

/// Pluggable session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Ordered turn sequence for the session; empty if absent or expired.
    async fn get(&self, session_id: &str) -> Vec<Turn>;

    /// Overwrite the session's history and reset its expiry.
    async fn put(&self, session_id: &str, turns: Vec<Turn>);
}

struct SessionEntry {
    turns: Vec<Turn>,
    expires_at: Instant,
}

/// In-memory store with an idle TTL per session.
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Drop every expired session. Called by the background cleanup task;
    /// reads already treat expired entries as absent.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Start a background task sweeping expired sessions every `interval`.
    /// Returns a shutdown sender that stops the task.
    pub fn start_cleanup_task(self: &Arc<Self>, interval: Duration) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let store = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = store.purge_expired();
                        if removed > 0 {
                            tracing::info!(removed, "expired sessions removed");
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("session cleanup task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Vec<Turn> {
        let entries = self.entries.read();
        match entries.get(session_id) {
            Some(entry) if entry.expires_at > Instant::now() => entry.turns.clone(),
            _ => Vec::new(),
        }
    }

    async fn put(&self, session_id: &str, turns: Vec<Turn>) {
        let entry = SessionEntry {
            turns,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().insert(session_id.to_string(), entry);
    }
}
