//! axum glue: bearer extraction → verification → policy check.
//!
//! On success the verified [`Principal`] is inserted into request extensions
//! and handlers receive it through the `Principal` extractor. On failure the
//! request never reaches the handler: 401 for verification failures, 403 for
//! policy denial.
//!
//! ```ignore
//! let read = PolicyGuard::new(verifier.clone(), policies.read.clone());
//! Router::new().route("/products", guarded(get(list_products), &read))
//! ```

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{FromRequestParts, State},
    http::{HeaderMap, Request, header, request::Parts},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::claims::Claims;
use crate::error::AuthError;
use crate::policy::Policy;
use crate::verifier::TokenVerifier;

/// Authenticated caller, available to handlers behind a guard.
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject: String,
    pub roles: Vec<String>,
    pub claims: Claims,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub.clone(),
            roles: claims.roles.clone(),
            claims,
        }
    }
}

/// Takes the `Principal` the guard stored in extensions.
/// Missing means the route is not behind a guard; reject as 401.
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}

/// `Authorization: Bearer <token>` → `<token>`. The scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let (scheme, token) = value
        .trim_start()
        .split_once(' ')
        .ok_or(AuthError::MissingCredentials)?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::MissingCredentials);
    }
    let token = token.trim();

    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(token)
}

/// Verifier plus the policy a route requires.
///
/// `policy: None` only authenticates; any valid token passes.
#[derive(Debug, Clone)]
pub struct PolicyGuard {
    verifier: Arc<TokenVerifier>,
    policy: Option<Arc<Policy>>,
}

impl PolicyGuard {
    pub fn new(verifier: Arc<TokenVerifier>, policy: Policy) -> Self {
        Self {
            verifier,
            policy: Some(Arc::new(policy)),
        }
    }

    pub fn authenticated(verifier: Arc<TokenVerifier>) -> Self {
        Self {
            verifier,
            policy: None,
        }
    }

    pub fn policy(&self) -> Option<&Policy> {
        self.policy.as_deref()
    }

    /// Full gate decision for one request's headers.
    pub fn check(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        let token = bearer_token(headers)?;
        let claims = self.verifier.verify(token)?;

        if let Some(policy) = &self.policy {
            policy.require(&claims)?;
        }

        Ok(Principal::from(claims))
    }
}

/// Put every route of `router` behind `guard`.
///
/// Uses `route_layer`, so unmatched paths still 404 instead of 401.
pub fn require<S>(router: Router<S>, guard: PolicyGuard) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(guard, enforce))
}

/// Put the handlers of one `MethodRouter` behind `guard`.
///
/// Lets one path carry different policies per method:
/// `guarded(get(list), &read).merge(guarded(post(create), &write))`.
pub fn guarded<S>(method_router: MethodRouter<S>, guard: &PolicyGuard) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    method_router.route_layer(middleware::from_fn_with_state(guard.clone(), enforce))
}

async fn enforce(
    State(guard): State<PolicyGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let principal = match guard.check(req.headers()) {
        Ok(principal) => principal,
        Err(err @ AuthError::PolicyDenied { .. }) => {
            tracing::info!(error = %err, "request denied by policy");
            return Err(err);
        }
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(err);
        }
    };

    tracing::debug!(
        subject = %principal.subject,
        policy = guard.policy().map(Policy::name).unwrap_or("authenticated"),
        "request authorized"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
