use std::sync::{Arc, Mutex};

use standpos_core::{DomainError, DomainResult, SessionId};
use standpos_ledger::{Ledger, LedgerSnapshot};

/// Session context for a request.
///
/// Resolved by the session middleware and present for all session-scoped
/// routes. Owns a handle to the session's ledger; there is no global ledger.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: SessionId,
    ledger: Arc<Mutex<Ledger>>,
}

impl SessionContext {
    pub fn new(session_id: SessionId, ledger: Arc<Mutex<Ledger>>) -> Self {
        Self { session_id, ledger }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Run one operation against the ledger while holding its lock.
    pub fn with_ledger<T>(&self, f: impl FnOnce(&mut Ledger) -> DomainResult<T>) -> DomainResult<T> {
        let mut ledger = self
            .ledger
            .lock()
            .map_err(|_| DomainError::internal("session ledger lock poisoned"))?;
        f(&mut ledger)
    }

    /// Owned copy of both tables; the lock is released on return.
    pub fn snapshot(&self) -> DomainResult<LedgerSnapshot> {
        self.with_ledger(|ledger| Ok(ledger.snapshot()))
    }
}
