use crate::error::Result;
use crate::utils::{signature::sign_payload, time};
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

pub const EVENT_STATUS_CHANGED: &str = "status_changed";
pub const EVENT_SCORE_COMPUTED: &str = "score_computed";

#[derive(Debug, Clone, Serialize)]
pub struct StatusChangeEvent {
    pub application_id: Uuid,
    pub candidate_id: Uuid,
    pub previous_status: String,
    pub new_status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreComputedEvent {
    pub application_id: Uuid,
    pub candidate_id: Uuid,
    pub total_score: f64,
}

/// Best-effort fan-out. Persists an in-app notification row and posts a
/// signed webhook to the downstream notification collaborator. Delivery is
/// at-most-once: no retry, no dead-letter queue.
#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
    client: Client,
    webhook_url: Option<String>,
}

impl NotificationService {
    pub fn new(pool: PgPool, webhook_url: Option<String>) -> Self {
        Self {
            pool,
            client: Client::new(),
            webhook_url,
        }
    }

    /// Detaches delivery from the calling request. The caller's obligation
    /// ends once the task is spawned; a failure is logged and swallowed,
    /// never surfaced on the triggering request.
    pub fn dispatch_status_change(&self, event: StatusChangeEvent) {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.deliver_status_change(&event).await {
                tracing::error!(
                    error = ?e,
                    application_id = %event.application_id,
                    "Status change notification failed"
                );
            }
        });
    }

    pub fn dispatch_score_computed(&self, event: ScoreComputedEvent) {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.deliver_score_computed(&event).await {
                tracing::error!(
                    error = ?e,
                    application_id = %event.application_id,
                    "Score notification failed"
                );
            }
        });
    }

    async fn deliver_status_change(&self, event: &StatusChangeEvent) -> Result<()> {
        let title = format!("Application moved to {}", event.new_status);
        let body = format!(
            "Status changed from {} to {}",
            event.previous_status, event.new_status
        );
        self.insert_notification(event.candidate_id, event.application_id, EVENT_STATUS_CHANGED, &title, Some(&body))
            .await?;
        self.post_webhook(EVENT_STATUS_CHANGED, serde_json::to_value(event)?)
            .await
    }

    async fn deliver_score_computed(&self, event: &ScoreComputedEvent) -> Result<()> {
        let title = format!("Application score updated: {:.1}", event.total_score);
        self.insert_notification(event.candidate_id, event.application_id, EVENT_SCORE_COMPUTED, &title, None)
            .await?;
        self.post_webhook(EVENT_SCORE_COMPUTED, serde_json::to_value(event)?)
            .await
    }

    async fn insert_notification(
        &self,
        candidate_id: Uuid,
        application_id: Uuid,
        event_type: &str,
        title: &str,
        body: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (candidate_id, application_id, event_type, title, body)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(candidate_id)
        .bind(application_id)
        .bind(event_type)
        .bind(title)
        .bind(body)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn post_webhook(&self, event_type: &str, payload: serde_json::Value) -> Result<()> {
        let Some(url) = &self.webhook_url else {
            return Ok(());
        };

        let envelope = json!({
            "event_type": event_type,
            "payload": payload,
            "sent_at": time::to_rfc3339(time::now()),
        });
        let raw = envelope.to_string();
        let secret = &crate::config::get_config().webhook_secret;
        let signature = sign_payload(secret, &raw);

        self.client
            .post(url)
            .header("content-type", "application/json")
            .header("X-Webhook-Signature", signature)
            .body(raw)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_change_event_payload_shape() {
        let event = StatusChangeEvent {
            application_id: Uuid::nil(),
            candidate_id: Uuid::nil(),
            previous_status: "Applied".into(),
            new_status: "Shortlisted".into(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["previous_status"], "Applied");
        assert_eq!(value["new_status"], "Shortlisted");
        assert!(value["application_id"].is_string());
        assert!(value["candidate_id"].is_string());
    }

    #[test]
    fn score_event_carries_total() {
        let event = ScoreComputedEvent {
            application_id: Uuid::nil(),
            candidate_id: Uuid::nil(),
            total_score: 28.0,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["total_score"], 28.0);
    }
}
