//! Thread-safe store giving serial transaction execution.
//!
//! Holding the mutex for the whole closure is the strongest form of
//! serializable isolation: concurrent submitters against the same book are
//! processed one at a time in lock-acquisition order.

use std::sync::{Mutex, MutexGuard};

use ringside_types::{Result, RingsideError};

use crate::{MemoryStore, MemoryTx};

#[derive(Debug, Default)]
pub struct SharedStore {
    inner: Mutex<MemoryStore>,
}

impl SharedStore {
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryStore>> {
        self.inner
            .lock()
            .map_err(|_| RingsideError::Internal("store mutex poisoned".to_string()))
    }

    /// Run `f` inside a transaction: commit on `Ok`, roll back on `Err`.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut MemoryTx<'_>) -> Result<T>,
    {
        let mut guard = self.lock()?;
        let mut tx = guard.begin();
        match f(&mut tx) {
            Ok(value) => {
                tx.commit();
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(error = %err, "Transaction aborted");
                tx.rollback();
                Err(err)
            }
        }
    }

    /// Read committed state.
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&MemoryStore) -> T,
    {
        let guard = self.lock()?;
        Ok(f(&guard))
    }
}
