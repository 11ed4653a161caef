use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde_json::json;
use service_kit::{middleware, shutdown_signal, telemetry};
use token_gate::{TokenIssuer, TokenVerifier};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;

pub async fn run() -> Result<(), AppError> {
    telemetry::init_tracing();
    let config = Config::from_env()?;
    telemetry::init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        issuer = config.gate.issuer(),
        max_ttl_seconds = config.access_token_ttl_seconds,
        "starting identity service"
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, addr = %config.addr, "failed to bind");
            AppError::Internal
        })?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "server error");
            AppError::Internal
        })?;

    tracing::info!("server stopped");
    Ok(())
}

fn build_state(config: &Config) -> AppState {
    let issuer = Arc::new(TokenIssuer::new(&config.gate, config.access_token_ttl_seconds));
    let verifier = Arc::new(TokenVerifier::new(&config.gate));
    AppState::new(issuer, verifier)
}

fn build_router(state: AppState, config: &Config) -> Router {
    async fn health() -> Json<serde_json::Value> {
        Json(json!({"status": "ok", "service": "identity"}))
    }

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(&state))
        .with_state(state);

    let router = middleware::security_headers::apply(router, config.app_env);
    let router = middleware::cors::apply(router, config.app_env, &config.cors_allowed_origins);
    middleware::http::apply(router, &config.http)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let mut vars: HashMap<&str, &str> = [
            ("AUTH_SECRET_KEY", "identity-app-secret"),
            ("AUTH_ISSUER", "https://identity.scm.local"),
            ("AUTH_AUDIENCE", "scm-services"),
        ]
        .into_iter()
        .collect();
        vars.extend(pairs.iter().copied());
        Config::from_source(|key| vars.get(key).map(|v| v.to_string())).unwrap()
    }

    fn app(config: &Config) -> Router {
        build_router(build_state(config), config)
    }

    #[tokio::test]
    async fn health_carries_request_id_and_security_headers() {
        let config = config(&[]);
        let res = app(&config)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));
        assert_eq!(res.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[tokio::test]
    async fn production_cors_only_allows_listed_origins() {
        let config = config(&[
            ("APP_ENV", "production"),
            ("AUTH_SECRET_KEY", "a-production-grade-secret-of-32-bytes!"),
            ("CORS_ALLOWED_ORIGINS", "https://console.example"),
        ]);

        let allowed = app(&config)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://console.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://console.example"
        );

        let other = app(&config)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(!other.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn oversized_token_request_is_rejected() {
        let config = config(&[]);
        let body = format!("{{\"sub\":\"{}\"}}", "x".repeat(32 * 1024));
        let res = app(&config)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/token")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
