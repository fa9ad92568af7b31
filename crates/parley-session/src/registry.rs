use crate::session::ConversationSession;
use crate::source::CatalogSource;
use crate::transcript::TranscriptEntry;
use parley_core::ParleyResult;
use parley_intents::Memory;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// A registered session. The id never changes; turns are serialized by the inner mutex.
#[derive(Debug)]
pub struct SessionHandle {
    id: Uuid,
    session: Mutex<ConversationSession>,
}

impl SessionHandle {
    fn new(session: ConversationSession) -> Self {
        Self {
            id: session.id(),
            session: Mutex::new(session),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Run one turn. Concurrent callers on the same handle take turns.
    pub async fn respond(&self, text: &str) -> String {
        self.session.lock().await.respond(text)
    }

    /// Exclusive access to the session, for inspection or multi-step use.
    pub async fn lock(&self) -> MutexGuard<'_, ConversationSession> {
        self.session.lock().await
    }

    pub async fn memory(&self) -> Memory {
        self.session.lock().await.memory().clone()
    }

    pub async fn transcript(&self) -> Vec<TranscriptEntry> {
        self.session.lock().await.transcript().entries().to_vec()
    }
}

/// Maps session ids to live sessions for the lifetime of the process.
///
/// Construct one and share it behind an `Arc`; there is no global instance.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<SessionHandle>>>,
    catalog: Arc<dyn CatalogSource>,
}

impl SessionRegistry {
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            catalog,
        }
    }

    /// Return the session registered under `id`, or create a new one.
    ///
    /// An id that is absent, malformed or unknown is not reused: the new
    /// session gets a freshly generated id, which callers must use from then on.
    pub async fn get_or_create(&self, id: Option<&str>) -> ParleyResult<Arc<SessionHandle>> {
        if let Some(existing) = self.lookup(id).await {
            return Ok(existing);
        }

        if let Some(requested) = id {
            debug!(requested = %requested, "Unknown session id, allocating a new session");
        }

        let catalog = self.catalog.load().await?;
        let handle = Arc::new(SessionHandle::new(ConversationSession::new(catalog)));

        let mut sessions = self.sessions.write().await;
        sessions.insert(handle.id(), handle.clone());
        info!(
            session_id = %handle.id(),
            sessions = sessions.len(),
            catalog = %self.catalog.describe(),
            "Session created"
        );
        Ok(handle)
    }

    /// Look up an existing session without creating one.
    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionHandle>> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Only the hyphenated form handed out by this registry counts as known.
    async fn lookup(&self, id: Option<&str>) -> Option<Arc<SessionHandle>> {
        let raw = id?;
        let id = Uuid::try_parse(raw).ok()?;
        if raw != id.hyphenated().to_string() {
            return None;
        }
        self.get(id).await
    }
}
