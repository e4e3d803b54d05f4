use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Statically configured token set for the auth gate. An empty set denies
/// every request.
#[derive(Clone)]
pub struct AuthState {
    tokens: Arc<HashSet<String>>,
}

impl AuthState {
    pub fn new(tokens: impl IntoIterator<Item = String>) -> Self {
        Self {
            tokens: Arc::new(tokens.into_iter().collect()),
        }
    }

    pub fn allows(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Auth gate middleware: allow or deny based on path and headers. On deny
/// the handler chain never runs. `/health` is exempt.
pub async fn require_bearer_token(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if req.uri().path() == "/health" {
        return next.run(req).await;
    }

    let allowed = bearer_token(req.headers())
        .map(|token| auth.allows(token))
        .unwrap_or(false);

    if !allowed {
        tracing::warn!(path = %req.uri().path(), "Rejected unauthenticated request");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized." })),
        )
            .into_response();
    }

    next.run(req).await
}
