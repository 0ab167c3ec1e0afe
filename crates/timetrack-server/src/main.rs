use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use timetrack_api::handlers::{auth, calendar, health, timer};
use timetrack_api::state::AppState;
use timetrack_core::services::{AuthService, CalendarService, TimerService};
use timetrack_infrastructure::database::connection;
use timetrack_infrastructure::database::postgres::{PgSessionRepository, PgUserRepository};
use timetrack_security::JwtService;
use timetrack_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    timetrack_shared::telemetry::init_telemetry();

    info!("Timetrack server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    let pool = connection::create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database connection established.");

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations applied.");

    // Wire repositories and services once, at startup
    let session_repo = Arc::new(PgSessionRepository::new(pool.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pool));
    let jwt = Arc::new(JwtService::new(
        config.jwt.secret.clone(),
        config.jwt.token_expiry,
    ));

    let state = AppState {
        timer: Arc::new(TimerService::new(session_repo.clone())),
        calendar: Arc::new(CalendarService::new(session_repo)),
        auth: Arc::new(AuthService::new(user_repo, jwt.clone())),
        jwt,
        config: config.clone(),
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth routes
        .route("/auth/signup", post(auth::signup))
        .route("/auth/signin", post(auth::signin))
        .route("/auth/me", get(auth::me))
        // Timer routes
        .route("/timer/start", post(timer::start))
        .route("/timer/stop/{id}", post(timer::stop))
        .route("/timer/active", get(timer::active))
        .route("/timer/sessions", get(timer::sessions))
        .route("/timer/{id}/notes", patch(timer::update_notes))
        .route("/timer/{id}", delete(timer::delete))
        // Calendar routes
        .route("/calendar/daily/{date}", get(calendar::daily))
        .route("/calendar/range", get(calendar::range))
        .route("/calendar/contributions", get(calendar::contributions))
        .route("/calendar/monthly/{year}/{month}", get(calendar::monthly))
        // Add State
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin("http://localhost:5173".parse::<axum::http::HeaderValue>()?)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PATCH,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                ]),
        );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
