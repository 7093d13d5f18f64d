use ats_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let integration_api = Router::new()
        .route(
            "/api/integration/score/:application_id",
            get(routes::scoring::get_score).post(routes::scoring::compute_score),
        )
        .route(
            "/api/integration/rankings/:job_id",
            get(routes::scoring::get_rankings),
        )
        .route(
            "/api/integration/scoring/configuration/:position_id",
            get(routes::scoring::get_scoring_configuration)
                .post(routes::scoring::upsert_scoring_configuration),
        )
        .route(
            "/api/integration/applications",
            post(routes::application::create_application),
        )
        .route(
            "/api/integration/applications/bulk-update",
            post(routes::application::bulk_update_status),
        )
        .route(
            "/api/integration/applications/:id",
            put(routes::application::update_application_status),
        )
        .route(
            "/api/integration/applications/:id/history",
            get(routes::application::get_application_history),
        )
        .route(
            "/api/integration/dictionaries/application-statuses",
            get(routes::application::list_application_statuses),
        )
        .layer(axum::middleware::from_fn(
            ats_backend::middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            ats_backend::middleware::rate_limit::new_rps_state(config.integration_rps),
            ats_backend::middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(integration_api)
        .with_state(app_state)
        .layer(ats_backend::middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
