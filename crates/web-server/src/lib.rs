use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use configuration::Config;
use database::{PgFundRepository, PgQuoteRepository, PoolSettings};
use services::{FundRepository, FundService, QuoteRepository, QuoteService};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod auth;
pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub fund_service: FundService,
    pub quote_service: QuoteService,
    /// Expected `SCRAPER-KEY` header value. `None` disables every write.
    pub scraper_key: Option<String>,
}

impl AppState {
    pub fn new(fund_service: FundService, quote_service: QuoteService, scraper_key: Option<String>) -> Self {
        Self {
            fund_service,
            quote_service,
            scraper_key: scraper_key.filter(|key| !key.is_empty()),
        }
    }

    /// Wires both services on the same pair of repositories.
    pub fn from_repositories(
        fund_repo: Arc<dyn FundRepository>,
        quote_repo: Arc<dyn QuoteRepository>,
        scraper_key: Option<String>,
    ) -> Self {
        Self::new(
            FundService::new(fund_repo.clone()),
            QuoteService::new(fund_repo, quote_repo),
            scraper_key,
        )
    }
}

/// Builds the application router with its middleware stack.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    let create_quote = post(handlers::create_quote).route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_scraper_key,
    ));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/funds", get(handlers::get_funds))
        .route("/funds/:isin", get(handlers::get_fund))
        .route("/funds/:isin/quotes", get(handlers::get_quotes).merge(create_quote))
        .route("/funds/:isin/quotes/:date", get(handlers::get_quote))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(64 * 1024))
}

/// The main function to configure and run the web server.
///
/// Opens the connection pool, serves until Ctrl-C or SIGTERM, then closes the pool.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;

    let db_pool = database::connect(&PoolSettings {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        acquire_timeout: config.database.acquire_timeout(),
    })
    .await?;

    let fund_repo: Arc<dyn FundRepository> = Arc::new(PgFundRepository::new(db_pool.clone()));
    let quote_repo: Arc<dyn QuoteRepository> = Arc::new(PgQuoteRepository::new(db_pool.clone()));
    let app_state = Arc::new(AppState::from_repositories(
        fund_repo,
        quote_repo,
        config.auth.scraper_key.clone(),
    ));

    if app_state.scraper_key.is_none() {
        tracing::warn!("No scraper key configured, quote creation is disabled.");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    tracing::info!("Database connection pool closed.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C.");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM.");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("Received Ctrl+C, shutting down."),
        _ = terminate => tracing::warn!("Received SIGTERM, shutting down."),
    }
}
