//! In-memory registry of live sessions, keyed by id.
//!
//! Each session sits behind its own mutex, so two requests against the same
//! session run one after the other while different sessions never contend.
//! Nothing is persisted; sessions vanish with the process. A session nobody has
//! touched for `idle_ttl` is dropped the next time a session is registered.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::interview::session::SessionController;
use crate::llm_client::LanguageModel;

/// How long a session may sit idle before it is evicted.
pub const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

pub type SharedSession = Arc<Mutex<SessionController>>;

struct StoredSession {
    session: SharedSession,
    last_used: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    llm: Arc<dyn LanguageModel>,
    question_count: usize,
    idle_ttl: Duration,
    sessions: Arc<RwLock<HashMap<Uuid, StoredSession>>>,
}

impl SessionStore {
    pub fn new(llm: Arc<dyn LanguageModel>, question_count: usize) -> Self {
        Self {
            llm,
            question_count,
            idle_ttl: DEFAULT_SESSION_IDLE_TTL,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_idle_ttl(mut self, idle_ttl: Duration) -> Self {
        self.idle_ttl = idle_ttl;
        self
    }

    /// A fresh, unregistered controller wired to the shared model client.
    pub fn new_controller(&self) -> SessionController {
        SessionController::with_question_count(self.llm.clone(), self.question_count)
    }

    /// Registers `controller` under a new id, evicting idle sessions first.
    pub async fn insert(&self, controller: SessionController) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, stored| now.duration_since(stored.last_used) < self.idle_ttl);
        if sessions.len() < before {
            debug!("Evicted {} idle sessions", before - sessions.len());
        }

        sessions.insert(
            id,
            StoredSession {
                session: Arc::new(Mutex::new(controller)),
                last_used: now,
            },
        );
        id
    }

    /// Looks up a live session and marks it as used.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        if now.duration_since(sessions.get(&id)?.last_used) >= self.idle_ttl {
            sessions.remove(&id);
            return None;
        }
        let stored = sessions.get_mut(&id)?;
        stored.last_used = now;
        Some(stored.session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Number of sessions that have not yet gone idle.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|stored| now.duration_since(stored.last_used) < self.idle_ttl)
            .count()
    }
}
