use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Weight profile submitted for a position. Each weight is a percentage;
/// the five together must sum to exactly 100, checked at the boundary
/// before anything is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ScoringConfigurationPayload {
    #[validate(range(min = 0, max = 100))]
    pub skill_weight: i32,
    #[validate(range(min = 0, max = 100))]
    pub experience_weight: i32,
    #[validate(range(min = 0, max = 100))]
    pub interview_weight: i32,
    #[validate(range(min = 0, max = 100))]
    pub test_weight: i32,
    #[validate(range(min = 0, max = 100))]
    pub education_weight: i32,
}

impl ScoringConfigurationPayload {
    pub fn weights_sum(&self) -> i32 {
        self.skill_weight
            + self.experience_weight
            + self.interview_weight
            + self.test_weight
            + self.education_weight
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentScore {
    pub score: f64,
    pub weight: i32,
}

/// Structured breakdown persisted alongside the numeric columns (as
/// serialized text, audit/debugging only) and returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScoreBreakdown {
    pub skill_match: ComponentScore,
    pub experience: ComponentScore,
    pub interview: ComponentScore,
    pub test: ComponentScore,
    pub education: ComponentScore,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreResponse {
    pub application_id: Uuid,
    pub breakdown: ScoreBreakdown,
    pub total_score: f64,
    pub calculated_at: chrono::DateTime<chrono::Utc>,
}
