use std::fmt::Display;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use marketing_api::config::ServerConfig;
use marketing_api::router::build_app_router;
use marketing_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env().unwrap_or_else(|e| fatal("Invalid configuration", e));
    tracing::info!(
        addr = %config.addr(),
        max_connections = config.pool.max_connections,
        queue_limit = config.pool.queue_limit,
        wait_for_connections = config.pool.wait_for_connections,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = marketing_db::create_pool(&config.database_url, &config.pool)
        .await
        .unwrap_or_else(|e| fatal("Failed to connect to database", e));
    tracing::info!("Database connection pool created");

    marketing_db::health_check(&pool)
        .await
        .unwrap_or_else(|e| fatal("Database health check failed", e));
    tracing::info!("Database health check passed");

    marketing_db::schema::initialize_schema(&pool)
        .await
        .unwrap_or_else(|e| fatal("Error initializing database", e));
    tracing::info!("Database tables initialized");

    // --- Router ---
    let state = AppState { pool: pool.clone() };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| fatal("Failed to bind to address", e));
    tracing::info!(%addr, "Server running");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    tracing::info!("Server stopped accepting connections, closing pool");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// `LOG_FORMAT=json` switches to structured JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "marketing_api=debug,marketing_db=debug,tower_http=debug".into()
    });
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Startup failures leave nothing half-running: log and exit non-zero.
fn fatal(context: &str, err: impl Display) -> ! {
    tracing::error!(error = %err, "{context}");
    std::process::exit(1);
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
