use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One candidate's application to one job. `status_id` always equals the
/// status of the most recent history entry once any transition has occurred.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: i64,
    pub candidate_id: Uuid,
    pub status_id: i64,
    pub score: Option<f64>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

/// Admin-managed status lookup. Statuses are data, not a compiled enum, so
/// new pipeline stages can be added without a rebuild. Transitions reference
/// statuses by id, never by name, so renames don't break the workflow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationStatus {
    pub id: i64,
    pub name: String,
    pub sort_order: Option<i32>,
    pub is_active: bool,
}

/// Immutable ledger row. Written exactly once per real transition, never
/// updated or deleted. `changed_by` is null for system-initiated changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusHistoryEntry {
    pub id: i64,
    pub application_id: Uuid,
    pub status_id: i64,
    pub changed_by: Option<Uuid>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// History entry joined with its status label, for read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StatusHistoryView {
    pub id: i64,
    pub application_id: Uuid,
    pub status_id: i64,
    pub status_name: String,
    pub changed_by: Option<Uuid>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
