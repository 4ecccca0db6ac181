use chrono::{DateTime, Utc};
use std::time::Instant;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::features::reports::services::ReportStore;

/// Mutable part of a session, guarded by the session lock
#[derive(Debug)]
pub struct SessionState {
    pub reports: ReportStore,
    pub last_active_at: Instant,
}

/// One isolated unit of interaction. Owns exactly one report store.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub state: Mutex<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            state: Mutex::new(SessionState {
                reports: ReportStore::new(),
                last_active_at: Instant::now(),
            }),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
