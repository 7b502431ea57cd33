use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the verified user identity in request extensions.
///
/// Handlers read this instead of touching the token themselves; the request
/// never reaches them without it.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that verifies bearer tokens and attaches the user id to the
/// request.
///
/// A missing token terminates the request with 401; a present but
/// unverifiable token terminates it with 403. The two must stay
/// distinguishable to clients.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.verify_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Forbidden: Invalid token"
            })),
        )
            .into_response()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::error!("Failed to parse user ID from token: {}", e);
        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Forbidden: Invalid token"
            })),
        )
            .into_response()
    })?;

    // Attach verified identity as a request-scoped value
    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Pull the raw token string out of the `authorization` header.
///
/// The token is carried as the raw signed string; a `Bearer ` prefix is
/// tolerated and stripped but not required.
fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Unauthorized: Missing token"
                })),
            )
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Forbidden: Invalid token"
            })),
        )
            .into_response()
    })?;

    Ok(auth_str.strip_prefix("Bearer ").unwrap_or(auth_str))
}
