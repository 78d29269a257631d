//! In-memory key-value store with per-entry expiry.

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::resp::RespValue;

#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("Invalid key data type")]
    InvalidKeyType,
}

/// A stored value and the instant it stops being visible, if any.
#[derive(Debug, Clone)]
struct Entry {
    value: RespValue,
    expires_at: Option<Instant>,
}

/// Shared map behind a single lock. Every operation takes the lock exactly
/// once, so concurrent connections never observe a torn entry.
#[derive(Debug, Default)]
pub struct KeyValueStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl KeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing whatever was there before.
    /// With an expiry the entry stops being visible `expiry` from now.
    ///
    /// Keys must be textual: simple strings or non-null bulk strings.
    pub async fn set(
        &self,
        key: &RespValue,
        value: RespValue,
        expiry: Option<Duration>,
    ) -> Result<(), StoreError> {
        let key = key.as_text().ok_or(StoreError::InvalidKeyType)?;
        let expires_at = expiry.map(|duration| Instant::now() + duration);

        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    /// Looks up `key`. An entry whose expiry has passed is removed here and
    /// reported as absent; nothing reaps expired entries in the background.
    pub async fn get(&self, key: &RespValue) -> Result<Option<RespValue>, StoreError> {
        let key = key.as_text().ok_or(StoreError::InvalidKeyType)?;

        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.get(key) else {
            return Ok(None);
        };

        if let Some(expires_at) = entry.expires_at {
            if Instant::now() >= expires_at {
                debug!("key {} expired", key);
                entries.remove(key);
                return Ok(None);
            }
        }

        Ok(Some(entry.value.clone()))
    }

    /// Number of resident entries, including ones whose expiry has passed but
    /// that no read has removed yet.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
