pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    bulk_service::BulkService, notification_service::NotificationService,
    score_config_service::ScoreConfigService, scoring_service::ScoringService,
    status_service::StatusService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub scoring_service: ScoringService,
    pub score_config_service: ScoreConfigService,
    pub status_service: StatusService,
    pub bulk_service: BulkService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let notification_service =
            NotificationService::new(pool.clone(), config.notification_webhook_url.clone());
        let scoring_service = ScoringService::new(pool.clone(), notification_service.clone());
        let score_config_service = ScoreConfigService::new(pool.clone());
        let status_service = StatusService::new(pool.clone(), notification_service.clone());
        let bulk_service = BulkService::new(status_service.clone());

        Self {
            pool,
            scoring_service,
            score_config_service,
            status_service,
            bulk_service,
            notification_service,
        }
    }
}
