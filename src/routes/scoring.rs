use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::scoring_dto::{ScoringConfigurationPayload, ScoreResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/integration/score/{application_id}",
    params(
        ("application_id" = uuid::Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Score computed", body = ScoreResponse),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn compute_score(
    State(state): State<AppState>,
    Path(application_id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse> {
    let result = state.scoring_service.compute_score(application_id).await?;
    Ok(Json(result))
}

pub async fn get_score(
    State(state): State<AppState>,
    Path(application_id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse> {
    let score = state.scoring_service.get_score(application_id).await?;
    Ok(Json(score))
}

pub async fn get_rankings(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let rankings = state.scoring_service.get_rankings(job_id).await?;
    Ok(Json(rankings))
}

pub async fn get_scoring_configuration(
    State(state): State<AppState>,
    Path(position_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let config = state.score_config_service.get_active(position_id).await?;
    match config {
        Some(c) => Ok(Json(c)),
        None => Err(crate::error::Error::NotFound(format!(
            "No scoring configuration for position {}",
            position_id
        ))),
    }
}

#[utoipa::path(
    post,
    path = "/api/integration/scoring/configuration/{position_id}",
    params(
        ("position_id" = i64, Path, description = "Position ID")
    ),
    request_body = ScoringConfigurationPayload,
    responses(
        (status = 201, description = "Configuration stored"),
        (status = 400, description = "Weights do not sum to 100")
    )
)]
#[axum::debug_handler]
pub async fn upsert_scoring_configuration(
    State(state): State<AppState>,
    Path(position_id): Path<i64>,
    Json(payload): Json<ScoringConfigurationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let config = state
        .score_config_service
        .create_or_update(position_id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(config)))
}
