//! # kumihimo-core
//!
//! Pattern validation and braid diagram reconstruction for Kumihimo - THE LOGIC.
//!
//! A user designs a bracelet by choosing a strand count, the starting color
//! of every strand, and the target color of every knot, row by row. An
//! external solver finds the knot moves; this crate decides whether a design
//! may be sent at all, and turns the solver's answer into a diagram.
//!
//! ## Flow
//!
//! ```text
//! DesignSession ──▶ PatternValidator ──▶ SolveRequest ──▶ (solver, app layer)
//!                                                               │
//!        Diagram ◀── DiagramBuilder ◀── interpret_reply ◀───────┘
//! ```
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies (pure Rust)
//! - Validation fails fast with one reason
//! - Diagram construction never fails; repairs are reported as diagnostics
//! - The palette and knot tables are compile-time constants

// =============================================================================
// MODULES
// =============================================================================

pub mod diagram;
pub mod palette;
pub mod primitives;
pub mod session;
pub mod solver;
pub mod types;
pub mod validator;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ColorCode, DisplayColor, KnotMove, KumihimoError, StrandCount, ValidationError,
    parse_color_row,
};

// =============================================================================
// RE-EXPORTS: Components
// =============================================================================

pub use diagram::{Diagram, DiagramBuilder, DiagramDiagnostic, DiagramElement, InputSummary, Slot};
pub use palette::{Palette, PaletteEntry};
pub use primitives::{RowParity, knots_in_row};
pub use session::{Design, DesignSession, EditTarget};
pub use solver::{SolveRequest, SolveResponse, interpret_reply};
pub use validator::PatternValidator;
