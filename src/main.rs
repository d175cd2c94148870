//! ArtsHub Server, the booking platform for arts organizations.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use artshub_core::config::AppConfig;
use artshub_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("ARTSHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Configuration loaded (env: {})", env);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ArtsHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = artshub_database::connection::DatabasePool::connect(&config.database)
        .await?
        .into_pool();

    artshub_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Initialize repositories ──────────────────────────
    let resource_repo = Arc::new(
        artshub_database::repositories::resource::ResourceRepository::new(db_pool.clone()),
    );
    let booking_repo = Arc::new(
        artshub_database::repositories::booking::BookingRepository::new(db_pool.clone()),
    );

    // ── Step 3: Payment gateway ──────────────────────────────────
    let payment_gateway = artshub_service::payment::gateway_from_config(&config.payment)?;
    if config.payment.enabled {
        tracing::info!("Payment gateway enabled: {}", config.payment.endpoint_url);
    } else {
        tracing::info!("Payment gateway disabled, paid bookings await API confirmation");
    }

    // ── Step 4: Initialize services ──────────────────────────────
    tracing::info!("Initializing services...");
    let catalog_service = Arc::new(artshub_service::catalog::CatalogService::new(
        Arc::clone(&resource_repo),
        config.booking.clone(),
    ));
    let availability_service = Arc::new(artshub_service::availability::AvailabilityService::new(
        Arc::clone(&resource_repo),
        Arc::clone(&booking_repo),
        config.booking.clone(),
    ));
    let pricing_service = Arc::new(artshub_service::pricing::PricingService::new(Arc::clone(
        &resource_repo,
    )));
    let booking_service = Arc::new(artshub_service::booking::service::BookingService::new(
        Arc::clone(&booking_repo),
        Arc::clone(&resource_repo),
        payment_gateway,
        config.booking.clone(),
    ));
    tracing::info!("Services initialized");

    // ── Step 5: Start background scheduler ───────────────────────
    let scheduler = if config.worker.enabled {
        tracing::info!("Starting background scheduler...");
        let scheduler = artshub_worker::scheduler::CronScheduler::new(
            Arc::clone(&booking_repo),
            config.booking.clone(),
        )
        .await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background scheduler disabled");
        None
    };

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app_state = artshub_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        catalog_service,
        availability_service,
        pricing_service,
        booking_service,
    };

    let app = artshub_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("ArtsHub server listening on {}", addr);

    // ── Step 7: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    tracing::info!("ArtsHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
