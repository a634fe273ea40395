use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use quizbee_backend::{
    config::{get_config, init_config},
    middleware::rate_limit::{throttle, RateLimiter},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let app_state = AppState::new();

    let base_routes = Router::new()
        .route("/", get(routes::pages::index))
        .route("/health", get(routes::health::health));

    let quiz_api = Router::new()
        .route("/api/quiz/generate", post(routes::quiz::generate_quiz))
        .route("/api/quiz/grade", post(routes::quiz::grade_quiz))
        .route("/api/quiz/export", post(routes::quiz::export_quiz))
        .layer(axum::middleware::from_fn_with_state(
            RateLimiter::new(config.public_rps),
            throttle,
        ));

    let app = base_routes
        .merge(quiz_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
