use std::sync::Mutex;
use shared::Session;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session lock poisoned")]
    LockFailed,
}

/// The process-wide voting session behind a single lock.
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Mutex<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` inside the critical section. Reads and writes never interleave.
    pub fn with<T>(&self, f: impl FnOnce(&mut Session) -> T) -> Result<T, StoreError> {
        let mut session = self.session.lock().map_err(|e| {
            error!("Failed to acquire session lock: {}", e);
            StoreError::LockFailed
        })?;
        Ok(f(&mut session))
    }
}
