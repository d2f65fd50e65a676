use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use time::Duration;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh";

/// Build the http-only refresh-token cookie.
///
/// Not script-readable; max-age matches the refresh token's own lifetime so
/// the browser drops the cookie when the token inside it dies.
pub fn refresh_cookie(refresh_token: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, refresh_token.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(max_age_secs))
        .build()
}
