//! # Braid Primitives
//!
//! Hardcoded structural constants for the Kumihimo CORE.
//!
//! These are compiled into the binary and are immutable at runtime.
//!
//! ## Primitives
//!
//! 1. **Strand Options**: The strand counts a design may be started with.
//! 2. **Row Parity**: Which rows knot every strand pair and which leave the
//!    outer strands passing through.
//! 3. **Input Limits**: Upper bounds applied at the API and file boundaries.

/// Strand counts offered when starting a design.
///
/// Every option is even. The validator re-checks parity anyway, since a
/// design file or API body can carry any number.
pub const STRAND_COUNT_OPTIONS: [usize; 5] = [4, 6, 8, 10, 12];

/// Strand count used for a fresh design.
pub const DEFAULT_STRAND_COUNT: usize = STRAND_COUNT_OPTIONS[0];

/// Maximum number of rows accepted in a target pattern.
///
/// The solver search is exponential in the row count; anything above this
/// is rejected at the boundary before it reaches the solver.
pub const MAX_PATTERN_ROWS: usize = 256;

/// Maximum number of strands accepted from a design file or request body.
pub const MAX_STRANDS: usize = 64;

/// Parity of a pattern row, in human (1-based) numbering.
///
/// Row index 0 is the first row and therefore `Odd`. Odd rows knot every
/// adjacent strand pair; even rows leave the first and last strand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowParity {
    /// Human rows 1, 3, 5, ...
    Odd,
    /// Human rows 2, 4, 6, ...
    Even,
}

impl RowParity {
    /// Parity of the 0-indexed row `row`.
    #[must_use]
    pub const fn of(row: usize) -> Self {
        if row % 2 == 0 { Self::Odd } else { Self::Even }
    }

    /// True for human rows 1, 3, 5, ...
    #[must_use]
    pub const fn is_odd(self) -> bool {
        matches!(self, Self::Odd)
    }

    /// Index of the first strand taking part in this row's knots.
    #[must_use]
    pub const fn first_strand(self) -> usize {
        match self {
            Self::Odd => 0,
            Self::Even => 1,
        }
    }
}

/// Number of knots the 0-indexed row `row` holds for `strand_count` strands.
///
/// `floor(n / 2)` for odd rows, `floor(n / 2) - 1` for even rows
/// (saturating at 0).
#[must_use]
pub const fn knots_in_row(strand_count: usize, row: usize) -> usize {
    let pairs = strand_count / 2;
    match RowParity::of(row) {
        RowParity::Odd => pairs,
        RowParity::Even => pairs.saturating_sub(1),
    }
}
