mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::{self, routes as auth_routes, AuthService, TokenService};
use crate::features::challenges::{routes as challenges_routes, ChallengeService};
use crate::features::grading::{GradingService, GradingSettings};
use crate::features::leaderboard::{routes as leaderboard_routes, LeaderboardService};
use crate::features::submissions::{
    routes as submissions_routes, PgSubmissionStore, SubmissionService, SubmissionStore,
};
use crate::modules::completion::{CompletionClient, GroqClient};
use crate::shared::prompts::PromptRenderer;
use axum::{middleware::from_fn_with_state, Json, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Starting {} v{} (environment={}, tokio_worker_threads={}, pid={})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment,
        worker_threads,
        std::process::id()
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Auth: locally issued HS256 tokens
    let jwt_validator = Arc::new(auth::JwtValidator::new(&config.auth));
    let token_service = Arc::new(TokenService::new(&config.auth));
    let auth_service = Arc::new(AuthService::new(pool.clone(), Arc::clone(&token_service)));
    tracing::info!("Auth services initialized (issuer={})", config.auth.issuer);

    let challenge_service = Arc::new(ChallengeService::new(pool.clone()));

    // Grading pipeline
    let groq_client = GroqClient::new(&config.grading)
        .map_err(|e| anyhow::anyhow!("Failed to create completion client: {}", e))?;
    tracing::info!(
        "Grading service initialized (model={}, pass_threshold={})",
        groq_client.model(),
        config.grading.pass_threshold
    );
    let completion_client: Arc<dyn CompletionClient> = Arc::new(groq_client);
    let prompts = PromptRenderer::with_overrides(&config.grading.template_dir);
    let grading_service = Arc::new(GradingService::new(
        completion_client,
        GradingSettings::from(&config.grading),
        prompts,
    ));

    let submission_store: Arc<dyn SubmissionStore> =
        Arc::new(PgSubmissionStore::new(pool.clone()));
    let submission_service = Arc::new(SubmissionService::new(
        submission_store,
        Arc::clone(&grading_service),
    ));

    let leaderboard_service = Arc::new(LeaderboardService::new(pool.clone()));

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::basic_auth_middleware,
            ))
    } else {
        if config.app.is_production() {
            tracing::warn!("Swagger UI is public in production; set SWAGGER_USERNAME and SWAGGER_PASSWORD");
        } else {
            tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        }
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(challenges_routes::protected_routes(Arc::clone(
            &challenge_service,
        )))
        .merge(submissions_routes::routes(submission_service))
        .route_layer(from_fn_with_state(
            jwt_validator.clone(),
            middleware::auth_middleware,
        ));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }

    let environment = config.app.environment.clone();
    let root = move || async move {
        Json(serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "status": "ok",
            "environment": environment,
        }))
    };

    let status_routes = Router::new()
        .route("/", axum::routing::get(root))
        .route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(challenges_routes::public_routes(challenge_service))
        .merge(leaderboard_routes::routes(leaderboard_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(status_routes)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
