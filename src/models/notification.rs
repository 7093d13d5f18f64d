use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// In-app notification persisted by the dispatcher. Delivery beyond this row
/// (email, chat) is owned by the downstream notification collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub application_id: Uuid,
    pub event_type: String,
    pub title: String,
    pub body: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
