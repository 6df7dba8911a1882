//! # Kumihimo HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /palette` - The eight strand colors
//! - `POST /validate` - Check a design against the row rules
//! - `POST /diagram` - Build a diagram from a saved solver reply
//! - `POST /design` - Validate, solve and build a diagram in one call
//!
//! ## Configuration (Environment Variables)
//!
//! - `KUMIHIMO_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `KUMIHIMO_RATE_LIMIT`: Requests per second (default: 20, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use handlers::{
    design_handler, diagram_handler, health_handler, log_diagnostics, palette_handler,
    validate_handler,
};
pub use middleware::{DEFAULT_RATE_LIMIT, create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    DiagramRequest, DiagramResponse, HealthResponse, PaletteEntryJson, PaletteResponse,
    ValidateResponse,
};

use crate::client::SolverClient;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use kumihimo_core::KumihimoError;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request body limit (1 MB). Designs are a few kilobytes at most.
const MAX_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state. Immutable; cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Bridge to the external solver.
    pub solver: SolverClient,
}

impl AppState {
    /// Create new app state around a solver client.
    #[must_use]
    pub fn new(solver: SolverClient) -> Self {
        Self { solver }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from `KUMIHIMO_CORS_ORIGINS`.
///
/// - `*`: any origin
/// - unset or no valid entries: localhost only
/// - otherwise: the listed origins
fn build_cors_layer() -> CorsLayer {
    match std::env::var("KUMIHIMO_CORS_ORIGINS").ok().as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (KUMIHIMO_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| match s.parse::<HeaderValue>() {
                    Ok(hv) => Some(hv),
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", s, e);
                        None
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                restricted_cors(allowed)
            }
        }
        None => build_localhost_cors(),
    }
}

/// CORS layer allowing only local development origins.
fn build_localhost_cors() -> CorsLayer {
    let origins = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();
    restricted_cors(origins)
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate limiting (if enabled)
pub fn create_router(state: AppState) -> Router {
    let rate_limit = get_rate_limit_from_env();

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/palette", get(handlers::palette_handler))
        .route("/validate", post(handlers::validate_handler))
        .route("/diagram", post(handlers::diagram_handler))
        .route("/design", post(handlers::design_handler));

    if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer())
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), KumihimoError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| KumihimoError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Kumihimo HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| KumihimoError::IoError(format!("Server error: {}", e)))
}
