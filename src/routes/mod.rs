//! HTTP routes for the relay
//!
//! Every path accepts `POST` (relay) and `OPTIONS` (preflight); any other
//! method gets a 405. All responses carry the same fixed CORS headers.

pub mod relay;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware,
    routing::post,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{middleware::auth::auth_middleware, AppState};

/// `Access-Control-Allow-Origin` value
pub const CORS_ALLOW_ORIGIN: &str = "*";
/// `Access-Control-Allow-Methods` value
pub const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";
/// `Access-Control-Allow-Headers` value
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth wraps only the POST handler so the method gate answers first
    let relay_route = post(relay::relay)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .options(relay::preflight)
        .fallback(relay::method_not_allowed);

    Router::new()
        .route("/", relay_route.clone())
        .route("/*path", relay_route)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        // Fixed CORS headers on every response, errors included
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static(CORS_ALLOW_ORIGIN),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(CORS_ALLOW_METHODS),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(CORS_ALLOW_HEADERS),
                )),
        )
        .with_state(state)
}
