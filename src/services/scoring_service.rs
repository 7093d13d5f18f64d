use crate::dto::scoring_dto::ScoreResponse;
use crate::error::{Error, Result};
use crate::models::application::JobApplication;
use crate::models::score::{AutomatedScore, RankingEntry};
use crate::services::notification_service::{NotificationService, ScoreComputedEvent};
use crate::services::score_calculator::ScoreCalculator;
use crate::services::score_config_service::ScoreConfigService;
use crate::services::snapshot_service::SnapshotService;
use sqlx::PgPool;
use uuid::Uuid;

/// Computes and persists the automated ranking score for one application.
/// Recomputation overwrites the single score slot per application; the same
/// snapshot always yields the same breakdown.
#[derive(Clone)]
pub struct ScoringService {
    pool: PgPool,
    snapshots: SnapshotService,
    configs: ScoreConfigService,
    notifier: NotificationService,
}

impl ScoringService {
    pub fn new(pool: PgPool, notifier: NotificationService) -> Self {
        let snapshots = SnapshotService::new(pool.clone());
        let configs = ScoreConfigService::new(pool.clone());
        Self {
            pool,
            snapshots,
            configs,
            notifier,
        }
    }

    async fn get_application(&self, id: Uuid) -> Result<JobApplication> {
        let application = sqlx::query_as::<_, JobApplication>(
            "SELECT * FROM job_applications WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        application.ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))
    }

    pub async fn compute_score(&self, application_id: Uuid) -> Result<ScoreResponse> {
        let application = self.get_application(application_id).await?;
        let snapshot = self.snapshots.load(&application).await?;
        let config = self.configs.get_or_create_default(snapshot.position_id).await?;

        let breakdown = ScoreCalculator::evaluate(&snapshot, &config);
        let breakdown_json = serde_json::to_string(&breakdown)?;

        let stored = sqlx::query_as::<_, AutomatedScore>(
            r#"
            INSERT INTO automated_scores
                (application_id, skill_score, experience_score, interview_score,
                 test_score, education_score, total_score, breakdown)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (application_id) DO UPDATE SET
                skill_score = EXCLUDED.skill_score,
                experience_score = EXCLUDED.experience_score,
                interview_score = EXCLUDED.interview_score,
                test_score = EXCLUDED.test_score,
                education_score = EXCLUDED.education_score,
                total_score = EXCLUDED.total_score,
                breakdown = EXCLUDED.breakdown,
                calculated_at = NOW(),
                is_deleted = FALSE
            RETURNING *
            "#,
        )
        .bind(application_id)
        .bind(breakdown.skill_match.score)
        .bind(breakdown.experience.score)
        .bind(breakdown.interview.score)
        .bind(breakdown.test.score)
        .bind(breakdown.education.score)
        .bind(breakdown.total)
        .bind(&breakdown_json)
        .fetch_one(&self.pool)
        .await?;

        // Denormalized cache of the latest total on the application row.
        sqlx::query("UPDATE job_applications SET score = $1, updated_at = NOW() WHERE id = $2")
            .bind(stored.total_score)
            .bind(application_id)
            .execute(&self.pool)
            .await?;

        self.notifier.dispatch_score_computed(ScoreComputedEvent {
            application_id,
            candidate_id: application.candidate_id,
            total_score: stored.total_score,
        });

        Ok(ScoreResponse {
            application_id,
            breakdown,
            total_score: stored.total_score,
            calculated_at: stored.calculated_at,
        })
    }

    pub async fn get_score(&self, application_id: Uuid) -> Result<AutomatedScore> {
        let score = sqlx::query_as::<_, AutomatedScore>(
            "SELECT * FROM automated_scores WHERE application_id = $1 AND NOT is_deleted",
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;
        score.ok_or_else(|| {
            Error::NotFound(format!(
                "No score computed for application {}",
                application_id
            ))
        })
    }

    /// Latest scores for every live application on a job, best first. Ties
    /// keep storage order.
    pub async fn get_rankings(&self, job_id: i64) -> Result<Vec<RankingEntry>> {
        let rankings = sqlx::query_as::<_, RankingEntry>(
            r#"
            SELECT s.application_id, a.candidate_id, s.total_score,
                   s.skill_score, s.experience_score, s.interview_score,
                   s.education_score, s.calculated_at
            FROM automated_scores s
            JOIN job_applications a ON a.id = s.application_id
            WHERE a.job_id = $1 AND NOT a.is_deleted AND NOT s.is_deleted
            ORDER BY s.total_score DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rankings)
    }
}
