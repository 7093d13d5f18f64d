use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-position weight profile. Weights are integer percentages and must sum
/// to exactly 100; callers are validated at the boundary, the hardcoded
/// default is trusted. At most one active row per position.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScoringConfiguration {
    pub id: i64,
    pub position_id: i64,
    pub skill_weight: i32,
    pub experience_weight: i32,
    pub interview_weight: i32,
    pub test_weight: i32,
    pub education_weight: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_SKILL_WEIGHT: i32 = 30;
pub const DEFAULT_EXPERIENCE_WEIGHT: i32 = 20;
pub const DEFAULT_INTERVIEW_WEIGHT: i32 = 30;
pub const DEFAULT_TEST_WEIGHT: i32 = 15;
pub const DEFAULT_EDUCATION_WEIGHT: i32 = 5;

/// Latest computed score for one application. One mutable slot keyed by
/// application id, overwritten on every recompute; there is no score history.
/// `breakdown` holds the serialized snapshot for audit/debugging only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AutomatedScore {
    pub application_id: Uuid,
    pub skill_score: f64,
    pub experience_score: f64,
    pub interview_score: f64,
    pub test_score: f64,
    pub education_score: f64,
    pub total_score: f64,
    pub breakdown: String,
    pub calculated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Ranking row: score joined with its application for a single job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RankingEntry {
    pub application_id: Uuid,
    pub candidate_id: Uuid,
    pub total_score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub interview_score: f64,
    pub education_score: f64,
    pub calculated_at: DateTime<Utc>,
}
