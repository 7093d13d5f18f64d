use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateApplicationPayload {
    pub job_id: i64,
    pub candidate_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicationStatusPayload {
    pub status_id: i64,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkStatusUpdatePayload {
    #[validate(length(min = 1, message = "application_ids must not be empty"))]
    pub application_ids: Vec<Uuid>,

    pub status_id: i64,

    #[serde(default, deserialize_with = "trim_optional_string")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkStatusUpdateResponse {
    pub updated_count: i64,
    pub skipped_ids: Vec<Uuid>,
}

// Custom deserializer to trim strings and convert empty strings to None
fn trim_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}
