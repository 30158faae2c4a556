//! In-memory sessions

use async_trait::async_trait;
use authsome_domain::Identity;
use authsome_domain::error::Result;
use authsome_domain::ports::SessionStore;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Session entries for a single client
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, Identity>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn read(&self, key: &str) -> Result<Option<Identity>> {
        Ok(self.entries.get(key).map(|entry| entry.clone()))
    }

    async fn write(&self, key: &str, identity: &Identity) -> Result<()> {
        self.entries.insert(key.to_string(), identity.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug)]
struct SessionSlot {
    store: Arc<MemorySessionStore>,
    created_at: Instant,
    last_access: Instant,
}

impl SessionSlot {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            store: Arc::new(MemorySessionStore::new()),
            created_at: now,
            last_access: now,
        }
    }
}

/// Maps session ids to their stores
///
/// A web integration looks the store up by the session cookie's id at the
/// start of each request and hands it to the `RequestContext`.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, SessionSlot>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the store for `session_id`, marking it as accessed
    pub fn get_or_create(&self, session_id: &str) -> Arc<MemorySessionStore> {
        let mut slot = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(SessionSlot::new);
        slot.last_access = Instant::now();
        Arc::clone(&slot.store)
    }

    /// Get the store for `session_id` if it exists
    pub fn get(&self, session_id: &str) -> Option<Arc<MemorySessionStore>> {
        self.sessions
            .get(session_id)
            .map(|slot| Arc::clone(&slot.store))
    }

    /// Drop a session entirely
    pub fn remove(&self, session_id: &str) -> Option<Arc<MemorySessionStore>> {
        self.sessions.remove(session_id).map(|(_, slot)| slot.store)
    }

    /// Get the number of active sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Age of a session since creation
    pub fn age(&self, session_id: &str) -> Option<Duration> {
        self.sessions
            .get(session_id)
            .map(|slot| slot.created_at.elapsed())
    }

    /// Drop sessions not accessed within `max_idle`; returns how many were dropped
    pub fn cleanup_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        let now = Instant::now();
        self.sessions
            .retain(|_, slot| now.duration_since(slot.last_access) < max_idle);
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            debug!(removed, "Dropped idle sessions");
        }
        removed
    }
}
