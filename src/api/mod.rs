use crate::auth::{self, Gate};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

pub mod handlers;

/// Build the application router with the gate installed as a pre-handler
/// layer.
///
/// The layer wraps every route and the fallback, so the login/logout paths
/// need no routes of their own and unknown paths are still challenged. The
/// health endpoint is registered outside the gate: probes have no browser
/// session.
#[must_use]
pub fn app(gate: Arc<Gate>) -> Router {
    let protected = Router::new()
        .route("/", get(handlers::root))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(gate, auth::intercept));

    Router::new()
        .merge(protected)
        .route("/health", get(handlers::health))
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, gate: Arc<Gate>) -> Result<()> {
    let app = app(gate).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &Request<Body>| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span)),
    );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
