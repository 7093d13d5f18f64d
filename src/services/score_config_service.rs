use crate::dto::scoring_dto::ScoringConfigurationPayload;
use crate::error::{Error, Result};
use crate::models::score::{
    ScoringConfiguration, DEFAULT_EDUCATION_WEIGHT, DEFAULT_EXPERIENCE_WEIGHT,
    DEFAULT_INTERVIEW_WEIGHT, DEFAULT_SKILL_WEIGHT, DEFAULT_TEST_WEIGHT,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct ScoreConfigService {
    pool: PgPool,
}

impl ScoreConfigService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_active(&self, position_id: i64) -> Result<Option<ScoringConfiguration>> {
        let config = sqlx::query_as::<_, ScoringConfiguration>(
            "SELECT * FROM scoring_configurations WHERE position_id = $1 AND is_active",
        )
        .bind(position_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(config)
    }

    /// Replaces the active configuration for a position, or inserts one if
    /// none exists. Rejects before touching the database when the weights
    /// don't sum to 100, so a failed update leaves the prior profile intact.
    pub async fn create_or_update(
        &self,
        position_id: i64,
        payload: &ScoringConfigurationPayload,
    ) -> Result<ScoringConfiguration> {
        validate_weights(payload)?;

        let config = if let Some(existing) = self.get_active(position_id).await? {
            sqlx::query_as::<_, ScoringConfiguration>(
                r#"
                UPDATE scoring_configurations
                SET skill_weight = $1, experience_weight = $2, interview_weight = $3,
                    test_weight = $4, education_weight = $5, updated_at = NOW()
                WHERE id = $6
                RETURNING *
                "#,
            )
            .bind(payload.skill_weight)
            .bind(payload.experience_weight)
            .bind(payload.interview_weight)
            .bind(payload.test_weight)
            .bind(payload.education_weight)
            .bind(existing.id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, ScoringConfiguration>(
                r#"
                INSERT INTO scoring_configurations
                    (position_id, skill_weight, experience_weight, interview_weight, test_weight, education_weight)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(position_id)
            .bind(payload.skill_weight)
            .bind(payload.experience_weight)
            .bind(payload.interview_weight)
            .bind(payload.test_weight)
            .bind(payload.education_weight)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(config)
    }

    /// Scoring falls back to the stock profile when a position was never
    /// configured; the row is persisted on first use. The stock weights are
    /// trusted and skip the sum check.
    pub async fn get_or_create_default(&self, position_id: i64) -> Result<ScoringConfiguration> {
        if let Some(config) = self.get_active(position_id).await? {
            return Ok(config);
        }

        let config = sqlx::query_as::<_, ScoringConfiguration>(
            r#"
            INSERT INTO scoring_configurations
                (position_id, skill_weight, experience_weight, interview_weight, test_weight, education_weight)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (position_id) WHERE is_active
            DO UPDATE SET updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(position_id)
        .bind(DEFAULT_SKILL_WEIGHT)
        .bind(DEFAULT_EXPERIENCE_WEIGHT)
        .bind(DEFAULT_INTERVIEW_WEIGHT)
        .bind(DEFAULT_TEST_WEIGHT)
        .bind(DEFAULT_EDUCATION_WEIGHT)
        .fetch_one(&self.pool)
        .await?;
        Ok(config)
    }
}

pub fn validate_weights(payload: &ScoringConfigurationPayload) -> Result<()> {
    let sum = payload.weights_sum();
    if sum != 100 {
        return Err(Error::BadRequest(format!(
            "Scoring weights must sum to 100, got {}",
            sum
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(weights: [i32; 5]) -> ScoringConfigurationPayload {
        ScoringConfigurationPayload {
            skill_weight: weights[0],
            experience_weight: weights[1],
            interview_weight: weights[2],
            test_weight: weights[3],
            education_weight: weights[4],
        }
    }

    #[test]
    fn accepts_weights_summing_to_hundred() {
        assert!(validate_weights(&payload([30, 20, 30, 15, 5])).is_ok());
        assert!(validate_weights(&payload([100, 0, 0, 0, 0])).is_ok());
    }

    #[test]
    fn rejects_weights_not_summing_to_hundred() {
        let err = validate_weights(&payload([30, 20, 20, 15, 5])).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
        assert!(validate_weights(&payload([30, 20, 30, 15, 10])).is_err());
        assert!(validate_weights(&payload([0, 0, 0, 0, 0])).is_err());
    }

    #[test]
    fn stock_profile_sums_to_hundred() {
        let sum = DEFAULT_SKILL_WEIGHT
            + DEFAULT_EXPERIENCE_WEIGHT
            + DEFAULT_INTERVIEW_WEIGHT
            + DEFAULT_TEST_WEIGHT
            + DEFAULT_EDUCATION_WEIGHT;
        assert_eq!(sum, 100);
    }
}
