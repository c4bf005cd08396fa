//! Server-side holding area for phase one of a booking. Entries are keyed by
//! (user, room) and never touch the database.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StagedBooking {
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub service_ids: Vec<Uuid>,
    pub staged_at: DateTime<Utc>,
}

type StagingKey = (Uuid, Uuid);

#[derive(Clone)]
pub struct StagingStore {
    entries: Arc<RwLock<HashMap<StagingKey, StagedBooking>>>,
    ttl: Duration,
}

impl StagingStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Store or replace the user's selection for `staged.room_id`.
    pub async fn put(&self, user_id: Uuid, staged: StagedBooking) {
        let mut entries = self.entries.write().await;
        let now = Utc::now();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        entries.insert((user_id, staged.room_id), staged);
    }

    pub async fn get(&self, user_id: Uuid, room_id: Uuid) -> Option<StagedBooking> {
        self.get_at(user_id, room_id, Utc::now()).await
    }

    pub async fn get_at(
        &self,
        user_id: Uuid,
        room_id: Uuid,
        now: DateTime<Utc>,
    ) -> Option<StagedBooking> {
        let key = (user_id, room_id);
        {
            let entries = self.entries.read().await;
            match entries.get(&key) {
                None => return None,
                Some(entry) if !self.is_expired(entry, now) => return Some(entry.clone()),
                Some(_) => {}
            }
        }
        self.entries.write().await.remove(&key);
        None
    }

    pub async fn remove(&self, user_id: Uuid, room_id: Uuid) {
        self.entries.write().await.remove(&(user_id, room_id));
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn is_expired(&self, entry: &StagedBooking, now: DateTime<Utc>) -> bool {
        now - entry.staged_at > self.ttl
    }
}
