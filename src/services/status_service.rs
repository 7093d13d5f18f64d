use crate::dto::application_dto::{CreateApplicationPayload, UpdateApplicationStatusPayload};
use crate::error::{Error, Result};
use crate::models::application::{ApplicationStatus, JobApplication, StatusHistoryView};
use crate::services::notification_service::{NotificationService, StatusChangeEvent};
use sqlx::PgPool;
use uuid::Uuid;

/// Result of one transition request. A same-status update is a suppressed
/// no-op: the application is returned untouched, no ledger row is written
/// and no notification fires.
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
    Changed(JobApplication),
    Unchanged(JobApplication),
}

impl TransitionOutcome {
    pub fn application(&self) -> &JobApplication {
        match self {
            TransitionOutcome::Changed(app) | TransitionOutcome::Unchanged(app) => app,
        }
    }
}

/// Coordinates a single application's status change: validate, update the
/// current status, append exactly one ledger entry, hand the event off to
/// the dispatcher.
///
/// Statuses form an unconstrained directed graph over the admin-managed
/// status rows. Any status may move to any other, including out of "Hired"
/// or "Rejected", so recruiters can revert mistakes and skip stages. Do not
/// add an allowed-transition table here; the openness is intended behaviour,
/// not a missing check.
#[derive(Clone)]
pub struct StatusService {
    pool: PgPool,
    notifier: NotificationService,
}

impl StatusService {
    pub fn new(pool: PgPool, notifier: NotificationService) -> Self {
        Self { pool, notifier }
    }

    pub async fn get_application(&self, id: Uuid) -> Result<JobApplication> {
        let application = sqlx::query_as::<_, JobApplication>(
            "SELECT * FROM job_applications WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        application.ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))
    }

    pub async fn get_status(&self, id: i64) -> Result<ApplicationStatus> {
        let status = sqlx::query_as::<_, ApplicationStatus>(
            "SELECT * FROM application_statuses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        status.ok_or_else(|| Error::NotFound(format!("Status {} not found", id)))
    }

    pub async fn get_status_by_name(&self, name: &str) -> Result<ApplicationStatus> {
        let status = sqlx::query_as::<_, ApplicationStatus>(
            "SELECT * FROM application_statuses WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        status.ok_or_else(|| Error::NotFound(format!("Status '{}' not found", name)))
    }

    pub async fn list_statuses(&self) -> Result<Vec<ApplicationStatus>> {
        let statuses = sqlx::query_as::<_, ApplicationStatus>(
            "SELECT * FROM application_statuses WHERE is_active ORDER BY sort_order, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(statuses)
    }

    /// Creates an application in the configured initial status and writes
    /// the creation ledger entry synchronously. This is the one place where
    /// a history row is part of creation rather than a later transition.
    pub async fn create_application(
        &self,
        payload: &CreateApplicationPayload,
        actor: Option<Uuid>,
    ) -> Result<JobApplication> {
        let initial = self
            .get_status_by_name(&crate::config::get_config().applied_status_name)
            .await?;

        let application = sqlx::query_as::<_, JobApplication>(
            r#"
            INSERT INTO job_applications (job_id, candidate_id, status_id, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(payload.job_id)
        .bind(payload.candidate_id)
        .bind(initial.id)
        .bind(actor)
        .fetch_one(&self.pool)
        .await?;

        self.append_history(
            application.id,
            initial.id,
            actor,
            Some("Application created".to_string()),
        )
        .await?;

        Ok(application)
    }

    /// A real transition updates the current status, appends one ledger
    /// entry and schedules the notification. Concurrent transitions on the
    /// same application are last-writer-wins on the current status while
    /// each still appends its own ledger entry; no optimistic-concurrency
    /// token is enforced.
    pub async fn transition(
        &self,
        id: Uuid,
        payload: &UpdateApplicationStatusPayload,
        actor: Option<Uuid>,
    ) -> Result<TransitionOutcome> {
        let application = self.get_application(id).await?;

        if application.status_id == payload.status_id {
            return Ok(TransitionOutcome::Unchanged(application));
        }

        let previous = self.get_status(application.status_id).await?;
        let next = self.get_status(payload.status_id).await?;

        let updated = sqlx::query_as::<_, JobApplication>(
            r#"
            UPDATE job_applications
            SET status_id = $1, updated_at = NOW(), updated_by = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(next.id)
        .bind(actor)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        self.append_history(id, next.id, actor, payload.note.clone())
            .await?;

        self.notifier.dispatch_status_change(StatusChangeEvent {
            application_id: updated.id,
            candidate_id: updated.candidate_id,
            previous_status: previous.name,
            new_status: next.name,
        });

        Ok(TransitionOutcome::Changed(updated))
    }

    /// Ledger entries are append-only: inserted exactly once per real
    /// transition, never updated or deleted.
    pub(crate) async fn append_history(
        &self,
        application_id: Uuid,
        status_id: i64,
        actor: Option<Uuid>,
        note: Option<String>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO application_status_history (application_id, status_id, changed_by, note)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(application_id)
        .bind(status_id)
        .bind(actor)
        .bind(note)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Ledger for one application, oldest first; insertion order breaks
    /// timestamp ties.
    pub async fn get_history(&self, application_id: Uuid) -> Result<Vec<StatusHistoryView>> {
        self.get_application(application_id).await?;

        let entries = sqlx::query_as::<_, StatusHistoryView>(
            r#"
            SELECT h.id, h.application_id, h.status_id, s.name AS status_name,
                   h.changed_by, h.note, h.created_at
            FROM application_status_history h
            JOIN application_statuses s ON s.id = h.status_id
            WHERE h.application_id = $1
            ORDER BY h.created_at, h.id
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub(crate) fn notifier(&self) -> &NotificationService {
        &self.notifier
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}
