mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::pickups::{routes as pickups_routes, PickupService};
use crate::features::reports::routes as reports_routes;
use crate::features::sessions::{routes as sessions_routes, SessionService, SessionSweeper};
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
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

async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Assemble every feature router behind the shared middleware stack
fn build_app(config: &Config, session_service: Arc<SessionService>) -> Router {
    let dashboard_service = Arc::new(DashboardService::new(Arc::clone(&session_service)));
    let pickup_service = Arc::new(PickupService::new(config.pickups.data_path.clone()));

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
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let api_routes = Router::new()
        .merge(sessions_routes::routes(Arc::clone(&session_service)))
        .merge(reports_routes::routes(session_service))
        .merge(dashboard_routes::routes(dashboard_service))
        .merge(pickups_routes::routes(pickup_service));

    Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
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
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
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
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let session_service = Arc::new(SessionService::new(config.session.idle_timeout));
    match config.session.idle_timeout {
        Some(timeout) => {
            let sweeper =
                SessionSweeper::new(Arc::clone(&session_service), config.session.sweep_interval);
            tokio::spawn(async move {
                sweeper.run().await;
            });
            tracing::info!(
                "Session sweeper spawned (idle_timeout={}s)",
                timeout.as_secs()
            );
        }
        None => tracing::info!("Session sweeping disabled; sessions live until ended"),
    }

    match &config.pickups.data_path {
        Some(path) => tracing::info!("Pickup dataset: {}", path.display()),
        None => tracing::warn!("PICKUP_DATA_PATH not set; pickup endpoints will return 404"),
    }

    let app = build_app(&config, session_service);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AppConfig, PickupConfig, SessionConfig, SwaggerConfig};
    use crate::shared::test_helpers::{create_session, test_server};
    use axum::http::StatusCode;
    use axum_test::multipart::MultipartForm;
    use serde_json::Value;
    use std::time::Duration;

    fn test_config() -> Config {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_allowed_origins: vec!["*".to_string()],
                max_request_body_size: 1024 * 1024,
            },
            session: SessionConfig {
                idle_timeout: None,
                sweep_interval: Duration::from_secs(60),
            },
            pickups: PickupConfig { data_path: None },
            swagger: SwaggerConfig {
                username: None,
                password: None,
                title: "Line Monitor API".to_string(),
                version: "0.1.0".to_string(),
                description: String::new(),
            },
        }
    }

    #[tokio::test]
    async fn test_full_report_workflow() {
        let app = build_app(&test_config(), Arc::new(SessionService::new(None)));
        let server = test_server(app);

        server.get("/health").await.assert_status_ok();

        let id = create_session(&server).await;
        let reports_url = format!("/api/sessions/{}/reports", id);

        let response = server
            .post(&reports_url)
            .multipart(
                MultipartForm::new()
                    .add_text("line", "1번 라인")
                    .add_text("issue_type", "기타")
                    .add_text("details", "벨트 소음 발생"),
            )
            .await;
        response.assert_status(StatusCode::CREATED);
        assert!(response.headers().contains_key("x-request-id"));

        let summary: Value = server
            .get(&format!("/api/dashboard/summary?session_id={}", id))
            .await
            .json();
        assert_eq!(summary["data"]["session_report_count"], 1);

        server
            .delete(&format!("/api/sessions/{}", id))
            .await
            .assert_status_ok();
        server
            .get(&reports_url)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let server = test_server(build_app(
            &test_config(),
            Arc::new(SessionService::new(None)),
        ));
        let doc: Value = server.get("/api-docs/openapi.json").await.json();
        assert_eq!(doc["info"]["title"], "Line Monitor API");
    }
}
