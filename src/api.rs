//! REST API server for the Agora backend
//!
//! Serves a liveness route and the proposal listing. Each request is
//! stateless; the registry is immutable shared data.

use axum::{
    extract::{Request, State},
    http::{self, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::proposals::{Proposal, ProposalRegistry};

const ROOT_BANNER: &str = "Self-Governance App Backend is Running!";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ServiceState {
    pub proposals: Arc<ProposalRegistry>,
}

impl ServiceState {
    pub fn new(proposals: ProposalRegistry) -> Self {
        Self {
            proposals: Arc::new(proposals),
        }
    }
}

// ============================================================================
// API Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct ProposalsResponse {
    pub proposals: Vec<Proposal>,
}

// ============================================================================
// Middleware
// ============================================================================

/// Request logging middleware. Logs method, path, status and duration.
async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "api.request"
    );

    response
}

// ============================================================================
// API Server
// ============================================================================

/// Build the router with all endpoints (for testing)
pub fn build_router(state: ServiceState) -> Router {
    // CORS configuration - allow all origins with credentials
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(vec![http::Method::GET, http::Method::OPTIONS])
        .allow_headers(vec![http::header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(root))
        .route("/api/proposals", get(list_proposals))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
        .layer(cors)
}

/// Run the API server on the given port until the process exits.
pub async fn run_server(
    state: ServiceState,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    println!("🚀 Agora backend listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn root() -> &'static str {
    ROOT_BANNER
}

async fn list_proposals(
    State(state): State<ServiceState>,
) -> Result<Json<ProposalsResponse>, ApiError> {
    Ok(Json(ProposalsResponse {
        proposals: state.proposals.all().to_vec(),
    }))
}
