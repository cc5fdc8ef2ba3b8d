//! Sled-backed session store
//!
//! Durable key-value persistence for the session flag and profile data,
//! using sled with an in-memory (`temporary`) mode for tests.

use async_trait::async_trait;
use sled::Db;
use std::sync::Arc;

use crate::store::{Result, SessionStore, StoreError};

/// Sled store configuration
#[derive(Debug, Clone)]
pub struct SledConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for immediate flush)
    pub flush_every_ms: Option<u64>,
}

impl Default for SledConfig {
    fn default() -> Self {
        Self {
            path: "ledgeline_kv.db".to_string(),
            cache_capacity: 8 * 1024 * 1024, // 8MB, session data is tiny
            use_compression: true,
            flush_every_ms: Some(500),
        }
    }
}

impl SledConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Sled-backed [`SessionStore`] implementation.
///
/// Values are stored as UTF-8 bytes. Clones share the same underlying
/// database handle.
#[derive(Debug, Clone)]
pub struct SledSessionStore {
    db: Arc<Db>,
}

impl SledSessionStore {
    /// Open (or create) a store at the configured path.
    pub fn open(config: SledConfig) -> Result<Self> {
        let mut db_config = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression);

        if let Some(ms) = config.flush_every_ms {
            db_config = db_config.flush_every_ms(Some(ms));
        }

        let db = db_config.open()?;
        tracing::debug!("Opened session store at {}", config.path);
        Ok(Self { db: Arc::new(db) })
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for SledSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let value = String::from_utf8(bytes.to_vec())
                    .map_err(|_| StoreError::Corrupt { key: key.to_string() })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }
}
