pub mod bulk_service;
pub mod notification_service;
pub mod score_calculator;
pub mod score_config_service;
pub mod scoring_service;
pub mod snapshot_service;
pub mod status_service;
