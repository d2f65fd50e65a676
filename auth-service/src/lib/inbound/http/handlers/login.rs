use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::AppendHeaders;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::cookies::refresh_cookie;
use crate::inbound::http::router::AppState;

/// Login entry point: verify credentials, mint an access/refresh pair,
/// persist the refresh record, and hand both tokens to the client.
///
/// The access token travels as a bearer credential in the Authorization
/// header (and the response body, for non-browser clients); the refresh
/// token only ever travels inside the http-only cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let pair = state
        .auth_service
        .login(&body.username, &body.password)
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
            LoginResponseData {
                access_token: pair.access,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
}
