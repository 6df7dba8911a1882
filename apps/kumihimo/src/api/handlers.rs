//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        DiagramRequest, DiagramResponse, HealthResponse, PaletteEntryJson, PaletteResponse,
        ValidateResponse,
    },
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use kumihimo_core::{Design, Diagram, DiagramBuilder, InputSummary, KumihimoError, Palette};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// PALETTE HANDLER
// =============================================================================

/// List the palette.
pub async fn palette_handler() -> impl IntoResponse {
    let colors = Palette::entries()
        .iter()
        .map(PaletteEntryJson::from)
        .collect();
    Json(PaletteResponse { colors })
}

// =============================================================================
// VALIDATE HANDLER
// =============================================================================

/// Validate a design without solving it.
pub async fn validate_handler(Json(design): Json<Design>) -> impl IntoResponse {
    match design.validate() {
        Ok(_) => (StatusCode::OK, Json(ValidateResponse::valid())),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidateResponse::rejected(e.to_string())),
        ),
    }
}

// =============================================================================
// DIAGRAM HANDLER
// =============================================================================

/// Build a diagram from a saved solver reply.
pub async fn diagram_handler(Json(request): Json<DiagramRequest>) -> impl IntoResponse {
    let diagram = DiagramBuilder::from_response(&request.response, &request.target_pattern);
    log_diagnostics(&diagram);
    (
        StatusCode::OK,
        Json(DiagramResponse::success(diagram.elements, &diagram.diagnostics)),
    )
}

// =============================================================================
// DESIGN HANDLER
// =============================================================================

/// Validate, solve and render a design.
pub async fn design_handler(
    State(state): State<AppState>,
    Json(design): Json<Design>,
) -> impl IntoResponse {
    let request = match design.validate() {
        Ok(r) => r,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(DiagramResponse::error(e.to_string())),
            );
        }
    };

    let response = match state.solver.solve(&request).await {
        Ok(r) => r,
        Err(e) => {
            let message = match e {
                KumihimoError::SolverUnavailable(msg) | KumihimoError::MalformedResponse(msg) => {
                    msg
                }
                other => other.to_string(),
            };
            return (StatusCode::BAD_GATEWAY, Json(DiagramResponse::error(message)));
        }
    };

    let diagram = DiagramBuilder::from_response(&response, &request.target_pattern);
    log_diagnostics(&diagram);

    let input = InputSummary::new(&request.start_state, &request.target_pattern);
    (
        StatusCode::OK,
        Json(
            DiagramResponse::success(diagram.elements, &diagram.diagnostics)
                .with_solve(input, response),
        ),
    )
}

/// Surface builder repairs in the log.
pub fn log_diagnostics(diagram: &Diagram) {
    for diagnostic in &diagram.diagnostics {
        tracing::warn!("Inconsistent solver data: {}", diagnostic);
    }
}
