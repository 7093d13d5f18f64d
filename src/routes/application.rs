use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::application_dto::{
        BulkStatusUpdatePayload, CreateApplicationPayload, UpdateApplicationStatusPayload,
    },
    error::Result,
    middleware::auth::Claims,
    services::status_service::TransitionOutcome,
    AppState,
};

fn actor(claims: &Option<Extension<Claims>>) -> Option<uuid::Uuid> {
    claims.as_ref().and_then(|c| c.actor_id())
}

pub async fn create_application(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .status_service
        .create_application(&payload, actor(&claims))
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    put,
    path = "/api/integration/applications/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Status updated (or already in the target status)"),
        (status = 404, description = "Application or status not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    claims: Option<Extension<Claims>>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    let outcome = state
        .status_service
        .transition(id, &payload, actor(&claims))
        .await?;
    let changed = matches!(outcome, TransitionOutcome::Changed(_));
    Ok(Json(json!({
        "application": outcome.application(),
        "changed": changed,
    })))
}

#[utoipa::path(
    post,
    path = "/api/integration/applications/bulk-update",
    request_body = BulkStatusUpdatePayload,
    responses(
        (status = 200, description = "Per-item outcome aggregate"),
        (status = 400, description = "Empty application list"),
        (status = 404, description = "Target status not found")
    )
)]
#[axum::debug_handler]
pub async fn bulk_update_status(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(payload): Json<BulkStatusUpdatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let result = state.bulk_service.apply_bulk(&payload, actor(&claims)).await?;
    Ok(Json(result))
}

pub async fn get_application_history(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse> {
    let history = state.status_service.get_history(id).await?;
    Ok(Json(history))
}

pub async fn list_application_statuses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let statuses = state.status_service.list_statuses().await?;
    Ok(Json(statuses))
}
