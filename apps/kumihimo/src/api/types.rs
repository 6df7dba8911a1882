//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use kumihimo_core::{
    ColorCode, DiagramDiagnostic, DiagramElement, InputSummary, PaletteEntry, SolveResponse,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// PALETTE RESPONSE
// =============================================================================

/// One palette entry as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntryJson {
    pub code: ColorCode,
    pub label: String,
    pub display_color: String,
}

impl From<&PaletteEntry> for PaletteEntryJson {
    fn from(entry: &PaletteEntry) -> Self {
        Self {
            code: entry.code,
            label: entry.label.to_string(),
            display_color: entry.color.to_string(),
        }
    }
}

/// Palette listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteResponse {
    pub colors: Vec<PaletteEntryJson>,
}

// =============================================================================
// VALIDATE RESPONSE
// =============================================================================

/// Result of `POST /validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub error: Option<String>,
}

impl ValidateResponse {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(reason.into()),
        }
    }
}

// =============================================================================
// DIAGRAM REQUEST/RESPONSE
// =============================================================================

/// Body of `POST /diagram`: a saved solver reply and the pattern it solved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramRequest {
    pub response: SolveResponse,
    pub target_pattern: Vec<Vec<ColorCode>>,
}

/// A diagram, with the input summary and solver reply when a solve ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramResponse {
    pub success: bool,
    pub diagram: Vec<DiagramElement>,
    #[serde(default)]
    pub diagnostics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<SolveResponse>,
    pub error: Option<String>,
}

impl DiagramResponse {
    pub fn success(diagram: Vec<DiagramElement>, diagnostics: &[DiagramDiagnostic]) -> Self {
        Self {
            success: true,
            diagram,
            diagnostics: diagnostics.iter().map(ToString::to_string).collect(),
            input: None,
            solution: None,
            error: None,
        }
    }

    pub fn with_solve(mut self, input: InputSummary, solution: SolveResponse) -> Self {
        self.input = Some(input);
        self.solution = Some(solution);
        self
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            diagram: Vec::new(),
            diagnostics: Vec::new(),
            input: None,
            solution: None,
            error: Some(msg.into()),
        }
    }
}
