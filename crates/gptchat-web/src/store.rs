//! Session store: maps session IDs to their conversation state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use gptchat_ai::{Session, SessionParams, Turn};
use gptchat_common::SessionId;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// Everything the UI layer keeps for one browser session.
pub struct SessionEntry {
    pub session: Session,
    /// The visible transcript, passed into every turn.
    pub history: Vec<Turn>,
    last_seen: Instant,
}

impl SessionEntry {
    fn new(params: SessionParams) -> Self {
        Self {
            session: Session::new(params),
            history: Vec::new(),
            last_seen: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_seen.elapsed()
    }

    /// Forget the transcript and the committed buffer.
    pub fn reset(&mut self) {
        self.history.clear();
        self.session.clear();
    }
}

/// Thread-safe session store. Each entry has its own lock, so turns in
/// different sessions never wait on each other.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Mutex<SessionEntry>>>>>,
    defaults: SessionParams,
}

impl SessionStore {
    pub fn new(defaults: SessionParams) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            defaults,
        }
    }

    /// Parameters a new session starts with.
    pub fn defaults(&self) -> &SessionParams {
        &self.defaults
    }

    /// Fetch the entry for `id`, creating it with default parameters.
    pub async fn get_or_create(&self, id: &SessionId) -> Arc<Mutex<SessionEntry>> {
        if let Some(entry) = self.sessions.read().await.get(id) {
            return entry.clone();
        }

        let mut map = self.sessions.write().await;
        map.entry(id.clone())
            .or_insert_with(|| {
                tracing::debug!(session_id = %id, "Creating session");
                Arc::new(Mutex::new(SessionEntry::new(self.defaults.clone())))
            })
            .clone()
    }

    #[cfg(test)]
    async fn contains(&self, id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    /// Evict sessions idle for longer than `max_idle`. Returns the number
    /// evicted.
    ///
    /// An entry is kept while any handler holds a reference to it, locked or
    /// not, so a request that fetched an entry never ends up on an orphan.
    /// New references can only be taken through the map, which is
    /// write-locked here.
    pub async fn reap_idle(&self, max_idle: Duration) -> usize {
        let mut map = self.sessions.write().await;
        let before = map.len();
        map.retain(|id, entry| {
            let stale = Arc::strong_count(entry) == 1
                && entry
                    .try_lock()
                    .map(|e| e.idle_for() > max_idle)
                    .unwrap_or(false);
            if stale {
                tracing::info!(session_id = %id, "Reaping idle session");
            }
            !stale
        });
        before - map.len()
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Periodically evict idle sessions.
pub fn spawn_reaper(store: SessionStore, ttl: Duration, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(every).await;
            let reaped = store.reap_idle(ttl).await;
            let count = store.count().await;
            tracing::debug!(sessions = count, reaped, "Reaper tick");
        }
    })
}
