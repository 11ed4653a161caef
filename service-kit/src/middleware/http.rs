//! Transport middleware applied to every route.
//!
//! - Request-Id generation + propagation (`x-request-id`)
//! - Access logging (TraceLayer)
//! - Body size limit and global timeout from [`HttpLimits`]

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Transport limits applied to every route.
#[derive(Debug, Clone)]
pub struct HttpLimits {
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for HttpLimits {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

pub fn apply<S>(router: Router<S>, limits: &HttpLimits) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let request_id_header = HeaderName::from_static("x-request-id");

    // Outermost first: every response, including 408/413, carries the request id.
    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(TraceLayer::new_for_http())
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        .layer(RequestBodyLimitLayer::new(limits.body_limit_bytes))
        .layer(TimeoutLayer::new(limits.request_timeout));

    router.layer(layers)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::Request,
        routing::{get, post},
    };
    use tower::ServiceExt;

    use super::*;

    fn app(limits: HttpLimits) -> Router {
        let router = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "late"
                }),
            )
            .route("/echo", post(|body: String| async move { body }));
        apply(router, &limits)
    }

    #[tokio::test]
    async fn sets_and_propagates_request_id() {
        let res = app(HttpLimits::default())
            .oneshot(Request::get("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(res.headers().contains_key("x-request-id"));

        let res = app(HttpLimits::default())
            .oneshot(
                Request::get("/ok")
                    .header("x-request-id", "req-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.headers()["x-request-id"], "req-123");
    }

    #[tokio::test]
    async fn slow_requests_time_out_with_a_request_id() {
        let limits = HttpLimits {
            request_timeout: Duration::from_millis(20),
            ..HttpLimits::default()
        };
        let res = app(limits)
            .oneshot(
                Request::get("/slow")
                    .header("x-request-id", "req-timeout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(res.headers()["x-request-id"], "req-timeout");
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected() {
        let limits = HttpLimits {
            body_limit_bytes: 8,
            ..HttpLimits::default()
        };
        let res = app(limits)
            .oneshot(
                Request::post("/echo")
                    .body(Body::from("this body is too long"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
