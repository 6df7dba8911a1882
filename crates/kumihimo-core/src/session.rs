//! # Design Session
//!
//! The editable state of one pattern design: strand count, start colors,
//! target pattern and the color picker's current target.
//!
//! Every edit is a typed operation on structured values. The picker target
//! is an explicit `EditTarget`, consumed by `apply_color`, so there are no
//! sentinel indices meaning "not editing".
//!
//! A session lives for one design. It is not shared between threads and it
//! is never mutated by the diagram builder.

use crate::palette::Palette;
use crate::primitives::{RowParity, STRAND_COUNT_OPTIONS};
use crate::solver::SolveRequest;
use crate::validator::PatternValidator;
use crate::{ColorCode, KumihimoError, StrandCount, ValidationError};
use serde::{Deserialize, Serialize};

// =============================================================================
// DESIGN SNAPSHOT
// =============================================================================

/// Serializable snapshot of a design, used for design files and API bodies.
///
/// Unassigned slots are `null`. `strand_count` is kept raw so that a
/// desynchronized count still reaches the validator and is reported there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub strand_count: usize,
    pub start_state: Vec<Option<ColorCode>>,
    #[serde(default)]
    pub target_pattern: Vec<Vec<Option<ColorCode>>>,
}

impl Design {
    /// Run the pattern validator on this design.
    pub fn validate(&self) -> Result<SolveRequest, ValidationError> {
        PatternValidator::validate(self.strand_count, &self.start_state, &self.target_pattern)
    }
}

// =============================================================================
// EDIT TARGET
// =============================================================================

/// What the color picker is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EditTarget {
    /// A start strand.
    Start { index: usize },
    /// A knot of the target pattern.
    Target { row: usize, col: usize },
}

// =============================================================================
// SESSION
// =============================================================================

/// One design in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignSession {
    strand_count: StrandCount,
    start_state: Vec<Option<ColorCode>>,
    target_pattern: Vec<Vec<Option<ColorCode>>>,
    editing: Option<EditTarget>,
}

impl Default for DesignSession {
    fn default() -> Self {
        Self::new(StrandCount::default())
    }
}

impl DesignSession {
    /// Start a design with every strand unassigned and no rows.
    #[must_use]
    pub fn new(strand_count: StrandCount) -> Self {
        Self {
            strand_count,
            start_state: vec![None; strand_count.get()],
            target_pattern: Vec::new(),
            editing: None,
        }
    }

    /// Restore a session from a snapshot.
    ///
    /// The strand count must be one of the offered options and the start
    /// state must have one slot per strand.
    pub fn from_design(design: Design) -> Result<Self, KumihimoError> {
        let strand_count = StrandCount::new(design.strand_count)?;
        if design.start_state.len() != strand_count.get() {
            return Err(KumihimoError::InvalidEdit(format!(
                "Start state has {} slots for {} strands",
                design.start_state.len(),
                strand_count
            )));
        }
        Ok(Self {
            strand_count,
            start_state: design.start_state,
            target_pattern: design.target_pattern,
            editing: None,
        })
    }

    /// Snapshot the current design.
    #[must_use]
    pub fn design(&self) -> Design {
        Design {
            strand_count: self.strand_count.get(),
            start_state: self.start_state.clone(),
            target_pattern: self.target_pattern.clone(),
        }
    }

    /// Current strand count.
    #[must_use]
    pub const fn strand_count(&self) -> StrandCount {
        self.strand_count
    }

    /// Start colors, left to right.
    #[must_use]
    pub fn start_state(&self) -> &[Option<ColorCode>] {
        &self.start_state
    }

    /// Target pattern rows.
    #[must_use]
    pub fn target_pattern(&self) -> &[Vec<Option<ColorCode>>] {
        &self.target_pattern
    }

    /// The picker's current target, if open.
    #[must_use]
    pub const fn editing(&self) -> Option<EditTarget> {
        self.editing
    }

    /// Switch to the `index`-th strand option, clearing colors and pattern.
    pub fn select_strand_option(&mut self, index: usize) -> Result<(), KumihimoError> {
        let count = STRAND_COUNT_OPTIONS.get(index).copied().ok_or_else(|| {
            KumihimoError::InvalidEdit(format!("No strand option at index {}", index))
        })?;
        self.set_strand_count(StrandCount::new(count)?);
        Ok(())
    }

    /// Change the strand count. Start colors and pattern are reset.
    pub fn set_strand_count(&mut self, strand_count: StrandCount) {
        *self = Self::new(strand_count);
    }

    // -------------------------------------------------------------------------
    // Color picker
    // -------------------------------------------------------------------------

    /// Open the picker on a start strand or a target knot.
    pub fn open_picker(&mut self, target: EditTarget) -> Result<(), KumihimoError> {
        self.check_target(target)?;
        self.editing = Some(target);
        Ok(())
    }

    /// Close the picker without changing anything.
    pub fn close_picker(&mut self) {
        self.editing = None;
    }

    /// Apply `color` to whatever the picker is editing, then close it.
    pub fn apply_color(&mut self, color: ColorCode) -> Result<EditTarget, KumihimoError> {
        let target = self
            .editing
            .take()
            .ok_or_else(|| KumihimoError::InvalidEdit("Color picker is not open".to_string()))?;

        match target {
            EditTarget::Start { index } => self.set_start_color(index, color)?,
            EditTarget::Target { row, col } => self.set_knot_color(row, col, color)?,
        }
        Ok(target)
    }

    // -------------------------------------------------------------------------
    // Typed updates
    // -------------------------------------------------------------------------

    /// Set the color of start strand `index`.
    pub fn set_start_color(&mut self, index: usize, color: ColorCode) -> Result<(), KumihimoError> {
        let slot = self.start_state.get_mut(index).ok_or_else(|| {
            KumihimoError::InvalidEdit(format!("No start strand at index {}", index))
        })?;
        *slot = Some(color);
        Ok(())
    }

    /// Set the target color of knot `col` in row `row`.
    pub fn set_knot_color(
        &mut self,
        row: usize,
        col: usize,
        color: ColorCode,
    ) -> Result<(), KumihimoError> {
        let slot = self
            .target_pattern
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| {
                KumihimoError::InvalidEdit(format!("No knot at row {} column {}", row, col))
            })?;
        *slot = Some(color);
        Ok(())
    }

    /// Maximum knots row `row` may hold for the current strand count.
    #[must_use]
    pub fn max_knots(&self, row: usize) -> usize {
        let strands = self.strand_count.get();
        match RowParity::of(row) {
            RowParity::Odd => strands / 2,
            RowParity::Even => strands.saturating_sub(1) / 2,
        }
    }

    /// Append a row filled with the palette's default color.
    ///
    /// Returns the new row's index.
    pub fn add_row(&mut self) -> Result<usize, KumihimoError> {
        let row = self.target_pattern.len();
        let knots = self.max_knots(row);
        if knots == 0 {
            return Err(KumihimoError::InvalidEdit(format!(
                "Row {} has no knot positions",
                row + 1
            )));
        }
        self.target_pattern
            .push(vec![Some(Palette::default_code()); knots]);
        Ok(row)
    }

    /// Remove row `row`. Rows below it move up and change parity.
    pub fn remove_row(&mut self, row: usize) -> Result<(), KumihimoError> {
        if row >= self.target_pattern.len() {
            return Err(KumihimoError::InvalidEdit(format!("No row at index {}", row)));
        }
        self.target_pattern.remove(row);
        self.editing = None;
        Ok(())
    }

    /// Append one default-colored knot to row `row`, up to its maximum.
    pub fn add_knot(&mut self, row: usize) -> Result<(), KumihimoError> {
        let max = self.max_knots(row);
        let knots = self
            .target_pattern
            .get_mut(row)
            .ok_or_else(|| KumihimoError::InvalidEdit(format!("No row at index {}", row)))?;
        if knots.len() >= max {
            return Err(KumihimoError::InvalidEdit(format!(
                "Row {} can hold at most {} knots",
                row + 1,
                max
            )));
        }
        knots.push(Some(Palette::default_code()));
        Ok(())
    }

    /// Remove every row.
    pub fn clear_pattern(&mut self) {
        self.target_pattern.clear();
        self.editing = None;
    }

    /// Validate the current design.
    pub fn validate(&self) -> Result<SolveRequest, ValidationError> {
        PatternValidator::validate(
            self.strand_count.get(),
            &self.start_state,
            &self.target_pattern,
        )
    }

    fn check_target(&self, target: EditTarget) -> Result<(), KumihimoError> {
        let exists = match target {
            EditTarget::Start { index } => index < self.start_state.len(),
            EditTarget::Target { row, col } => self
                .target_pattern
                .get(row)
                .is_some_and(|r| col < r.len()),
        };
        if exists {
            Ok(())
        } else {
            Err(KumihimoError::InvalidEdit(format!(
                "Nothing to edit at {:?}",
                target
            )))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn four_strands() -> DesignSession {
        DesignSession::new(StrandCount::new(4).expect("valid"))
    }

    fn fill_start(session: &mut DesignSession, colors: &[ColorCode]) {
        for (i, &c) in colors.iter().enumerate() {
            session.set_start_color(i, c).expect("set");
        }
    }

    #[test]
    fn new_session_is_blank() {
        let session = four_strands();
        assert_eq!(session.start_state(), &[None, None, None, None]);
        assert!(session.target_pattern().is_empty());
        assert_eq!(session.editing(), None);
    }

    #[test]
    fn add_row_alternates_knot_counts() {
        let mut session = four_strands();
        session.add_row().expect("row 1");
        session.add_row().expect("row 2");
        session.add_row().expect("row 3");

        let lens: Vec<usize> = session.target_pattern().iter().map(Vec::len).collect();
        assert_eq!(lens, vec![2, 1, 2]);
        assert_eq!(session.target_pattern()[0][0], Some(ColorCode::Red));
    }

    #[test]
    fn add_knot_respects_maximum() {
        let mut session = four_strands();
        session.add_row().expect("row");
        assert!(session.add_knot(0).is_err());
        assert!(session.add_knot(5).is_err());
    }

    #[test]
    fn picker_dispatches_to_start() {
        let mut session = four_strands();
        session
            .open_picker(EditTarget::Start { index: 2 })
            .expect("open");

        let target = session.apply_color(ColorCode::Blue).expect("apply");

        assert_eq!(target, EditTarget::Start { index: 2 });
        assert_eq!(session.start_state()[2], Some(ColorCode::Blue));
        assert_eq!(session.editing(), None);
    }

    #[test]
    fn picker_dispatches_to_target() {
        let mut session = four_strands();
        session.add_row().expect("row");
        session
            .open_picker(EditTarget::Target { row: 0, col: 1 })
            .expect("open");
        session.apply_color(ColorCode::Orange).expect("apply");

        assert_eq!(
            session.target_pattern()[0],
            vec![Some(ColorCode::Red), Some(ColorCode::Orange)]
        );
    }

    #[test]
    fn closed_picker_ignores_colors() {
        let mut session = four_strands();
        session
            .open_picker(EditTarget::Start { index: 1 })
            .expect("open");
        session.close_picker();

        assert_eq!(session.editing(), None);
        assert!(matches!(
            session.apply_color(ColorCode::Green),
            Err(KumihimoError::InvalidEdit(_))
        ));
        assert_eq!(session.start_state()[1], None);
    }

    #[test]
    fn picker_rejects_missing_cells() {
        let mut session = four_strands();
        assert!(
            session
                .open_picker(EditTarget::Target { row: 0, col: 0 })
                .is_err()
        );
        assert!(session.open_picker(EditTarget::Start { index: 4 }).is_err());
        assert!(session.apply_color(ColorCode::Red).is_err());
    }

    #[test]
    fn strand_change_resets_design() {
        let mut session = four_strands();
        fill_start(&mut session, &[ColorCode::Red; 4]);
        session.add_row().expect("row");

        session.select_strand_option(1).expect("six strands");

        assert_eq!(session.strand_count().get(), 6);
        assert_eq!(session.start_state().len(), 6);
        assert!(session.start_state().iter().all(Option::is_none));
        assert!(session.target_pattern().is_empty());
        assert!(session.select_strand_option(9).is_err());
    }

    #[test]
    fn remove_row_and_clear() {
        let mut session = four_strands();
        session.add_row().expect("row");
        session.add_row().expect("row");
        session.remove_row(0).expect("remove");
        assert_eq!(session.target_pattern().len(), 1);
        assert!(session.remove_row(3).is_err());

        session.clear_pattern();
        assert!(session.target_pattern().is_empty());
    }

    #[test]
    fn validate_complete_session() {
        let mut session = four_strands();
        fill_start(
            &mut session,
            &[
                ColorCode::Red,
                ColorCode::Green,
                ColorCode::Blue,
                ColorCode::Yellow,
            ],
        );
        assert_eq!(session.validate(), Err(ValidationError::EmptyPattern));

        session.add_row().expect("row");
        session.add_row().expect("row");
        let request = session.validate().expect("valid");
        assert_eq!(request.target_pattern.len(), 2);
    }

    #[test]
    fn design_round_trip() {
        let mut session = four_strands();
        session.set_start_color(0, ColorCode::White).expect("set");
        session.add_row().expect("row");

        let design = session.design();
        let json = serde_json::to_string(&design).expect("serialize");
        assert!(json.contains(r#""startState":["W",null,null,null]"#));

        let restored =
            DesignSession::from_design(serde_json::from_str(&json).expect("parse")).expect("load");
        assert_eq!(restored, session);
    }

    #[test]
    fn design_with_short_start_is_rejected() {
        let design = Design {
            strand_count: 4,
            start_state: vec![Some(ColorCode::Red), Some(ColorCode::Green)],
            target_pattern: vec![
                vec![Some(ColorCode::Red), Some(ColorCode::Red)],
                vec![Some(ColorCode::Red)],
            ],
        };
        assert_eq!(
            design.validate(),
            Err(ValidationError::StartLengthMismatch {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn from_design_checks_slot_count() {
        let design = Design {
            strand_count: 4,
            start_state: vec![None; 3],
            target_pattern: Vec::new(),
        };
        assert!(DesignSession::from_design(design).is_err());
    }
}
