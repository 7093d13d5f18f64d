use crate::error::{Error, Result};
use crate::models::application::JobApplication;
use crate::models::snapshot::{ApplicationSnapshot, CandidateSkill};
use sqlx::{PgPool, Row};

/// Read-only access to collaborator-owned data. Jobs, skills, qualifications
/// and interviews are managed elsewhere; this service only assembles the
/// snapshot one score computation reads.
#[derive(Clone)]
pub struct SnapshotService {
    pool: PgPool,
}

impl SnapshotService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn load(&self, application: &JobApplication) -> Result<ApplicationSnapshot> {
        let position_row = sqlx::query("SELECT position_id FROM jobs WHERE id = $1")
            .bind(application.job_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(position_row) = position_row else {
            return Err(Error::NotFound(format!(
                "Job {} not found",
                application.job_id
            )));
        };
        let position_id: i64 = position_row.try_get("position_id")?;

        let mut required_skill_ids = Vec::new();
        let mut preferred_skill_ids = Vec::new();
        let skill_rows = sqlx::query("SELECT skill_id, is_required FROM job_skills WHERE job_id = $1")
            .bind(application.job_id)
            .fetch_all(&self.pool)
            .await?;
        for row in skill_rows {
            let skill_id: i64 = row.try_get("skill_id")?;
            if row.try_get::<bool, _>("is_required")? {
                required_skill_ids.push(skill_id);
            } else {
                preferred_skill_ids.push(skill_id);
            }
        }

        let candidate_rows = sqlx::query(
            "SELECT skill_id, years_of_experience FROM candidate_skills WHERE candidate_id = $1",
        )
        .bind(application.candidate_id)
        .fetch_all(&self.pool)
        .await?;
        let candidate_skills = candidate_rows
            .into_iter()
            .map(|row| {
                Ok(CandidateSkill {
                    skill_id: row.try_get("skill_id")?,
                    years_of_experience: row.try_get("years_of_experience")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let qualification_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM candidate_qualifications WHERE candidate_id = $1",
        )
        .bind(application.candidate_id)
        .fetch_one(&self.pool)
        .await?;

        let feedback_ratings: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT f.rating
            FROM interview_feedback f
            JOIN interviews i ON i.id = f.interview_id
            WHERE i.application_id = $1
            "#,
        )
        .bind(application.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ApplicationSnapshot {
            application_id: application.id,
            position_id,
            required_skill_ids,
            preferred_skill_ids,
            candidate_skills,
            qualification_count,
            feedback_ratings,
        })
    }
}
