//! HTTP server setup and routing

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::query::{self, QueryError};
use crate::{Bibliography, Result};

/// Data set shared by every handler, loaded once at startup
pub type SharedBibliography = Arc<Bibliography>;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    items: usize,
    sites: usize,
}

/// Query string pairs in request order; a repeated name is allowed
type QueryPairs = Vec<(String, String)>;

/// Health check endpoint
async fn health(State(bibliography): State<SharedBibliography>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        items: bibliography.len(),
        sites: bibliography.sites().len(),
    })
}

/// Frontend items of one site
async fn get_bibliography(
    State(bibliography): State<SharedBibliography>,
    params: std::result::Result<Query<QueryPairs>, QueryRejection>,
    headers: HeaderMap,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return error_response(&QueryError::MalformedQuery(rejection.body_text())),
    };
    // The first siteId wins
    let site_id = params.iter().find(|(name, _)| name == "siteId").map(|(_, value)| value.as_str());

    let answer = match bibliography.query(site_id) {
        Ok(answer) => answer,
        Err(err) => return error_response(&err),
    };

    let if_none_match = headers.get(IF_NONE_MATCH).and_then(|value| value.to_str().ok());
    if if_none_match.is_some_and(|tag| answer.matches(tag)) {
        debug!(etag = %answer.etag, "not modified");
        return (
            StatusCode::NOT_MODIFIED,
            [(CACHE_CONTROL, query::CACHE_CONTROL)],
            [(ETAG, answer.etag)],
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(CONTENT_TYPE, "application/json"), (CACHE_CONTROL, answer.cache_control())],
        [(ETAG, answer.etag)],
        answer.body,
    )
        .into_response()
}

fn error_response(err: &QueryError) -> Response {
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    debug!(%status, error = %err, "rejected bibliography query");
    (status, Json(err.body())).into_response()
}

/// Build the axum router
pub fn build_router(bibliography: SharedBibliography) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/bibliography", get(get_bibliography))
        .layer(TraceLayer::new_for_http())
        .with_state(bibliography)
}

/// Run the query server.
///
/// This function blocks until the server is shut down.
pub async fn run(bibliography: Bibliography, bind: &str) -> Result<()> {
    let items = bibliography.len();
    let router = build_router(Arc::new(bibliography));

    let listener = TcpListener::bind(bind).await?;
    let addr = listener.local_addr()?;
    info!(%addr, items, "query server listening");

    axum::serve(listener, router).await?;
    Ok(())
}
