use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::AppendHeaders;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::errors::AuthError;
use crate::inbound::http::cookies::refresh_cookie;
use crate::inbound::http::cookies::REFRESH_COOKIE;
use crate::inbound::http::router::AppState;

/// Rotation entry point: exchange the refresh cookie for a fresh pair.
///
/// Deliberately does not re-verify the password; a valid, store-present
/// refresh token is the delegated proof of the original login.
pub async fn reissue(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let refresh = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::from(AuthError::MissingRefreshToken))?;

    let pair = state
        .auth_service
        .reissue(&refresh)
        .await
        .map_err(ApiError::from)?;

    let jar = jar.add(refresh_cookie(&pair.refresh, state.refresh_ttl_secs));
    let headers = AppendHeaders([(
        header::AUTHORIZATION,
        format!("Bearer {}", pair.access),
    )]);

    Ok((
        jar,
        headers,
        ApiSuccess::new(
            StatusCode::OK,
            ReissueResponseData {
                access_token: pair.access,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReissueResponseData {
    pub access_token: String,
}
