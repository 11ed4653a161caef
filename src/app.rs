/*
 * Responsibility
 * - Config 読み込み → 依存生成 (PgPool / TokenVerifier) → Router 組み立て
 * - Middleware の適用 (security headers / CORS / transport)
 * - axum::serve() で起動、SIGTERM / Ctrl+C で graceful shutdown
 */
use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use service_kit::{middleware, shutdown_signal, telemetry};
use sqlx::postgres::PgPoolOptions;
use token_gate::TokenVerifier;

use crate::{
    api::{self, v1::handlers::health::health},
    config::Config,
    state::AppState,
};

pub async fn run() -> Result<()> {
    telemetry::init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;
    telemetry::init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        service = %config.service,
        env = ?config.app_env,
        addr = %config.addr,
        issuer = config.gate.issuer(),
        audience = config.gate.audience(),
        "starting SCM service"
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let verifier = Arc::new(TokenVerifier::new(&config.gate));

    Ok(AppState::new(db, verifier, config.service))
}

pub(crate) fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(&state))
        .with_state(state);

    let router = middleware::security_headers::apply(router, config.app_env);
    let router = middleware::cors::apply(router, config.app_env, &config.cors_allowed_origins);
    middleware::http::apply(router, &config.http)
}
