use std::collections::HashMap;

use crate::dto::application_dto::{BulkStatusUpdatePayload, BulkStatusUpdateResponse};
use crate::error::{Error, Result};
use crate::services::notification_service::StatusChangeEvent;
use crate::services::status_service::StatusService;
use sqlx::Row;
use uuid::Uuid;

/// Per-item plan for one bulk request. `to_change` gets the bulk write plus
/// a ledger entry and notification each; `unchanged` are loaded applications
/// already in the target status (suppressed no-ops); `skipped` are requested
/// ids that don't resolve to a live application.
#[derive(Debug, Default, PartialEq)]
struct BulkPlan {
    to_change: Vec<Uuid>,
    unchanged: Vec<Uuid>,
    skipped: Vec<Uuid>,
}

/// Pure partition of the requested ids against what actually loaded.
/// Duplicate request ids collapse to one occurrence.
fn plan_bulk(requested: &[Uuid], loaded: &HashMap<Uuid, i64>, target_status: i64) -> BulkPlan {
    let mut plan = BulkPlan::default();
    let mut seen = std::collections::HashSet::new();
    for id in requested {
        if !seen.insert(*id) {
            continue;
        }
        match loaded.get(id) {
            None => plan.skipped.push(*id),
            Some(current) if *current == target_status => plan.unchanged.push(*id),
            Some(_) => plan.to_change.push(*id),
        }
    }
    plan
}

/// Applies one transition to a batch of applications. Deliberately not a
/// wrapping transaction: the status update is a single bulk write, but
/// ledger entries and notifications are per-item and independent, so one
/// item's failure never rolls back the rest. A crash mid-batch leaves a
/// partial update applied; callers treat the aggregate counts as the source
/// of truth.
#[derive(Clone)]
pub struct BulkService {
    statuses: StatusService,
}

impl BulkService {
    pub fn new(statuses: StatusService) -> Self {
        Self { statuses }
    }

    pub async fn apply_bulk(
        &self,
        payload: &BulkStatusUpdatePayload,
        actor: Option<Uuid>,
    ) -> Result<BulkStatusUpdateResponse> {
        if payload.application_ids.is_empty() {
            return Err(Error::BadRequest(
                "application_ids must not be empty".to_string(),
            ));
        }

        let target = self.statuses.get_status(payload.status_id).await?;
        let pool = self.statuses.pool();

        let rows = sqlx::query(
            r#"
            SELECT id, status_id, candidate_id
            FROM job_applications
            WHERE id = ANY($1) AND NOT is_deleted
            "#,
        )
        .bind(&payload.application_ids)
        .fetch_all(pool)
        .await?;

        let mut current_status = HashMap::new();
        let mut candidates = HashMap::new();
        for row in &rows {
            let id: Uuid = row.try_get("id")?;
            let status_id: i64 = row.try_get("status_id")?;
            current_status.insert(id, status_id);
            candidates.insert(id, row.try_get::<Uuid, _>("candidate_id")?);
        }

        let plan = plan_bulk(&payload.application_ids, &current_status, target.id);

        if !plan.to_change.is_empty() {
            sqlx::query(
                r#"
                UPDATE job_applications
                SET status_id = $1, updated_at = NOW(), updated_by = $2
                WHERE id = ANY($3)
                "#,
            )
            .bind(target.id)
            .bind(actor)
            .bind(&plan.to_change)
            .execute(pool)
            .await?;
        }

        // Status labels resolved once; per-item work below must not fail the
        // batch, so errors are logged and the loop moves on.
        let mut label_cache: HashMap<i64, String> = HashMap::new();
        label_cache.insert(target.id, target.name.clone());

        for id in &plan.to_change {
            if let Err(e) = self
                .statuses
                .append_history(*id, target.id, actor, payload.note.clone())
                .await
            {
                tracing::error!(error = ?e, application_id = %id, "Bulk history append failed");
                continue;
            }

            let previous_id = current_status.get(id).copied().unwrap_or(target.id);
            let previous_name = match label_cache.get(&previous_id) {
                Some(name) => name.clone(),
                None => match self.statuses.get_status(previous_id).await {
                    Ok(status) => {
                        label_cache.insert(status.id, status.name.clone());
                        status.name
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, application_id = %id, "Bulk status lookup failed");
                        continue;
                    }
                },
            };

            if let Some(candidate_id) = candidates.get(id) {
                self.statuses
                    .notifier()
                    .dispatch_status_change(StatusChangeEvent {
                        application_id: *id,
                        candidate_id: *candidate_id,
                        previous_status: previous_name,
                        new_status: target.name.clone(),
                    });
            }
        }

        Ok(BulkStatusUpdateResponse {
            updated_count: (plan.to_change.len() + plan.unchanged.len()) as i64,
            skipped_ids: plan.skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn partitions_valid_missing_and_unchanged() {
        let requested = ids(3);
        let mut loaded = HashMap::new();
        loaded.insert(requested[0], 1);
        loaded.insert(requested[2], 2);
        // requested[1] does not exist

        let plan = plan_bulk(&requested, &loaded, 2);
        assert_eq!(plan.to_change, vec![requested[0]]);
        assert_eq!(plan.unchanged, vec![requested[2]]);
        assert_eq!(plan.skipped, vec![requested[1]]);
    }

    #[test]
    fn mixed_batch_counts_only_existing_ids() {
        // Three requested, one unknown: two count as updated, one skipped.
        let requested = ids(3);
        let mut loaded = HashMap::new();
        loaded.insert(requested[0], 1);
        loaded.insert(requested[2], 1);

        let plan = plan_bulk(&requested, &loaded, 7);
        assert_eq!(plan.to_change.len() + plan.unchanged.len(), 2);
        assert_eq!(plan.skipped, vec![requested[1]]);
    }

    #[test]
    fn duplicate_request_ids_collapse() {
        let id = Uuid::new_v4();
        let mut loaded = HashMap::new();
        loaded.insert(id, 1);

        let plan = plan_bulk(&[id, id, id], &loaded, 2);
        assert_eq!(plan.to_change, vec![id]);
        assert!(plan.unchanged.is_empty());
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn empty_load_skips_everything() {
        let requested = ids(2);
        let plan = plan_bulk(&requested, &HashMap::new(), 2);
        assert!(plan.to_change.is_empty());
        assert_eq!(plan.skipped, requested);
    }
}
