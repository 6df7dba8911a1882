//! # Pattern Validator
//!
//! Structural checks a design must pass before it is sent to the solver.
//!
//! - Fail fast: the first broken rule is reported, nothing is aggregated
//! - Pure: no side effects beyond the returned result
//! - A passing design is returned as a fully-assigned `SolveRequest`

use crate::primitives::{MAX_PATTERN_ROWS, MAX_STRANDS, knots_in_row};
use crate::solver::SolveRequest;
use crate::{ColorCode, ValidationError};

/// The PatternValidator enforces the braid's row structure.
///
/// Rules, in order:
/// 1. Every start strand holds a palette color, one per strand
/// 2. The strand count is even
/// 3. The pattern has at least one row
/// 4. Each row holds the knot count its parity dictates
/// 5. Each knot holds a palette color
///
/// Rules 4 and 5 run row by row. Between rules 3 and 4 the design is
/// checked against the boundary limits `MAX_STRANDS` and
/// `MAX_PATTERN_ROWS`; exceeding either is reported as `TooLarge`.
pub struct PatternValidator;

impl PatternValidator {
    /// Validate a design and produce the solver request.
    pub fn validate(
        strand_count: usize,
        start_state: &[Option<ColorCode>],
        target_pattern: &[Vec<Option<ColorCode>>],
    ) -> Result<SolveRequest, ValidationError> {
        let start = Self::assigned(start_state).ok_or(ValidationError::IncompleteStartColors)?;
        if start.len() != strand_count {
            return Err(ValidationError::StartLengthMismatch {
                expected: strand_count,
                actual: start.len(),
            });
        }

        if strand_count % 2 != 0 {
            return Err(ValidationError::OddStrandCount(strand_count));
        }

        if target_pattern.is_empty() {
            return Err(ValidationError::EmptyPattern);
        }

        Self::check_limits(strand_count, target_pattern.len())?;

        let mut rows = Vec::with_capacity(target_pattern.len());
        for (i, row) in target_pattern.iter().enumerate() {
            let expected = knots_in_row(strand_count, i);
            if row.len() != expected {
                return Err(ValidationError::RowKnotCount {
                    row: i + 1,
                    expected,
                    actual: row.len(),
                });
            }

            let knots =
                Self::assigned(row).ok_or(ValidationError::RowMissingColor { row: i + 1 })?;
            rows.push(knots);
        }

        Ok(SolveRequest {
            start_state: start,
            target_pattern: rows,
        })
    }

    /// Check a design without keeping the request.
    pub fn check(
        strand_count: usize,
        start_state: &[Option<ColorCode>],
        target_pattern: &[Vec<Option<ColorCode>>],
    ) -> Result<(), ValidationError> {
        Self::validate(strand_count, start_state, target_pattern).map(|_| ())
    }

    /// Unwrap a slot sequence if every slot holds a palette color.
    fn assigned(slots: &[Option<ColorCode>]) -> Option<Vec<ColorCode>> {
        slots
            .iter()
            .map(|slot| slot.filter(|c| c.is_known()))
            .collect()
    }

    fn check_limits(strand_count: usize, rows: usize) -> Result<(), ValidationError> {
        if strand_count > MAX_STRANDS {
            return Err(ValidationError::TooLarge(format!(
                "{} strands exceeds maximum {}",
                strand_count, MAX_STRANDS
            )));
        }
        if rows > MAX_PATTERN_ROWS {
            return Err(ValidationError::TooLarge(format!(
                "{} rows exceeds maximum {}",
                rows, MAX_PATTERN_ROWS
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
