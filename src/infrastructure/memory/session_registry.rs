//! In-Memory Session Registry Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{SessionError, SessionRegistryPort};
use crate::domain::regeneration::{RegenerationSession, SessionState};

/// 内存会话注册表
pub struct InMemorySessionRegistry {
    sessions: DashMap<Uuid, Arc<RegenerationSession>>,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistryPort for InMemorySessionRegistry {
    fn create(&self, session: RegenerationSession) -> Result<Arc<RegenerationSession>, SessionError> {
        let id = session.id();
        let session = Arc::new(session);
        match self.sessions.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(SessionError::AlreadyExists(id)),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(session.clone());
                tracing::info!(result_id = %id, owner_id = session.owner_id(), "Session created");
                Ok(session)
            }
        }
    }

    fn get(&self, id: Uuid) -> Result<Arc<RegenerationSession>, SessionError> {
        self.sessions
            .get(&id)
            .map(|s| s.value().clone())
            .ok_or(SessionError::NotFound(id))
    }

    fn retire(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .remove(&id)
            .map(|_| {
                tracing::info!(result_id = %id, "Session retired");
            })
            .ok_or(SessionError::NotFound(id))
    }

    fn expired(&self, idle_timeout_secs: u64) -> Vec<Uuid> {
        // 超出 chrono 可表示范围时，不可能有会话空闲这么久
        let Some(timeout) = i64::try_from(idle_timeout_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
        else {
            return Vec::new();
        };
        let now = Utc::now();

        self.sessions
            .iter()
            .filter_map(|entry| {
                let session = entry.value();
                if session.state() == SessionState::Idle && session.idle_for(now) > timeout {
                    Some(*entry.key())
                } else {
                    None
                }
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
