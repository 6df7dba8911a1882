//! # Solver Contract
//!
//! Wire types for the external knot solver and the pure interpretation of
//! its replies. The transport itself lives in the app layer.
//!
//! ```text
//! POST /generate-knot
//! { "startState": ["R", ...], "targetPattern": [["R", "G"], ...] }
//!
//! 200 { "bestSolution": [["右右", ...], ...], "statesPath": [[...], ...],
//!       "startState": [...], "targetState": [...] }
//! ```
//!
//! Anything other than a 200 carrying a non-null `bestSolution` is a
//! failure; the body's optional `error` string becomes the message.

use crate::{ColorCode, KnotMove, KumihimoError};
use serde::{Deserialize, Serialize};

/// Path of the solve endpoint, relative to the solver base URL.
pub const SOLVE_PATH: &str = "/generate-knot";

/// Message used when a failed reply carries no `error` string.
pub const GENERIC_FAILURE_MESSAGE: &str = "failed to generate a solution";

/// Message used when the solver cannot be reached at all.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "solver request failed, please check the solver service";

/// A validated design, ready to send.
///
/// Only `PatternValidator::validate` builds these on the submission path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub start_state: Vec<ColorCode>,
    pub target_pattern: Vec<Vec<ColorCode>>,
}

/// A successful solver reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    /// One move sequence per pattern row.
    pub best_solution: Vec<Vec<KnotMove>>,
    /// Strand arrangement before the first row and after every row.
    #[serde(default)]
    pub states_path: Vec<Vec<ColorCode>>,
    #[serde(default)]
    pub start_state: Vec<ColorCode>,
    #[serde(default)]
    pub target_state: Vec<ColorCode>,
    /// Number of solutions the solver found, when it reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_solutions: Option<u64>,
}

/// Interpret a solver reply from its status code and raw body.
///
/// - 200 with a non-null `bestSolution` → `Ok(SolveResponse)`
/// - 200 whose `bestSolution` cannot be decoded → `MalformedResponse`
/// - anything else → `SolverUnavailable` with the body's `error` string or
///   `GENERIC_FAILURE_MESSAGE`
pub fn interpret_reply(status: u16, body: &[u8]) -> Result<SolveResponse, KumihimoError> {
    let value: Option<serde_json::Value> = serde_json::from_slice(body).ok();

    let has_solution = value
        .as_ref()
        .and_then(|v| v.get("bestSolution"))
        .is_some_and(|s| !s.is_null());

    match value {
        Some(value) if status == 200 && has_solution => serde_json::from_value(value)
            .map_err(|e| KumihimoError::MalformedResponse(e.to_string())),
        other => {
            let message = other
                .as_ref()
                .and_then(|v| v.get("error"))
                .and_then(|e| e.as_str())
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_FAILURE_MESSAGE);
            Err(KumihimoError::SolverUnavailable(message.to_string()))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
