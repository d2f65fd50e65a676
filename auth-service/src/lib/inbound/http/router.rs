use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::reissue::reissue;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::ports::AuthServicePort;

/// Shared state for the HTTP layer.
///
/// The service sits behind its port as a trait object so tests can wire
/// in-memory adapters; the codec is the immutable signing key holder the
/// bearer middleware validates against.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub codec: Arc<TokenCodec>,
    pub refresh_ttl_secs: i64,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    codec: Arc<TokenCodec>,
    refresh_ttl_secs: i64,
) -> Router {
    let state = AppState {
        auth_service,
        codec,
        refresh_ttl_secs,
    };

    let public_routes = Router::new()
        .route("/login", post(login))
        .route("/reissue", post(reissue))
        .route("/join", post(register));

    let protected_routes = Router::new()
        .route("/api/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
