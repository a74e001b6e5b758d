//! Live sessions, each owning its own ledger.
//!
//! Sessions idle longer than the configured TTL are dropped the next time
//! the registry is touched; there is no background sweeper.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use tracing::info;

use standpos_core::{DomainError, DomainResult, SessionId};
use standpos_ledger::Ledger;

use crate::context::SessionContext;

#[derive(Debug)]
struct SessionEntry {
    ledger: Arc<Mutex<Ledger>>,
    last_access: Instant,
}

/// In-memory session table. Ending or expiring a session drops its ledger.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Start a session with an empty ledger.
    pub fn create(&self) -> DomainResult<SessionContext> {
        self.create_at(Instant::now())
    }

    /// Resolve a live session and mark it as used.
    pub fn get(&self, session_id: SessionId) -> DomainResult<SessionContext> {
        self.get_at(session_id, Instant::now())
    }

    /// End a session; its ledger is discarded.
    pub fn end(&self, session_id: SessionId) -> DomainResult<()> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        sessions.remove(&session_id).ok_or_else(DomainError::not_found)?;
        info!(session_id = %session_id, live_sessions = sessions.len(), "session ended");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn create_at(&self, now: Instant) -> DomainResult<SessionContext> {
        let session_id = SessionId::new();
        let ledger = Arc::new(Mutex::new(Ledger::new()));

        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        self.evict_idle(&mut sessions, now);
        sessions.insert(
            session_id,
            SessionEntry {
                ledger: Arc::clone(&ledger),
                last_access: now,
            },
        );
        info!(session_id = %session_id, live_sessions = sessions.len(), "session started");

        Ok(SessionContext::new(session_id, ledger))
    }

    fn get_at(&self, session_id: SessionId, now: Instant) -> DomainResult<SessionContext> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        self.evict_idle(&mut sessions, now);
        let entry = sessions.get_mut(&session_id).ok_or_else(DomainError::not_found)?;
        entry.last_access = now;
        Ok(SessionContext::new(session_id, Arc::clone(&entry.ledger)))
    }

    fn evict_idle(&self, sessions: &mut HashMap<SessionId, SessionEntry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_access) < self.idle_ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            info!(expired, live_sessions = sessions.len(), "idle sessions expired");
        }
    }
}

fn poisoned() -> DomainError {
    DomainError::internal("session registry lock poisoned")
}
