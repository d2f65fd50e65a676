use auth::TokenCategory;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated identity through a request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: String,
}

/// Middleware guarding protected routes with a bearer access token.
///
/// A refresh token is never a valid API credential: the category claim is
/// checked alongside signature and expiry.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.codec.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token validation failed");
        unauthorized("Invalid or expired token")
    })?;

    match state.codec.is_expired(token) {
        Ok(false) => {}
        _ => return Err(unauthorized("Invalid or expired token")),
    }

    if claims.category != TokenCategory::Access {
        tracing::warn!(category = %claims.category, "Non-access token presented as bearer");
        return Err(unauthorized("Invalid or expired token"));
    }

    req.extensions_mut().insert(AuthenticatedUser {
        username: claims.username,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ));
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
