//! # Diagram Builder
//!
//! Reconstructs a renderable braid diagram from the solver's state path and
//! move sequence.
//!
//! The output alternates strand states and knot steps:
//!
//! ```text
//! State 0      R  G  B  Y
//! KnotStep 1   \     /
//! State 1      G  R  Y  B
//! KnotStep 2   |  >     |
//! State 2      G  Y  R  B
//! ```
//!
//! Colors are resolved through the palette at build time so renderers never
//! need it. Knot colors come from the user's target pattern, not from the
//! states: states only say where strands sit before and after a row.
//!
//! Construction never fails. Inconsistent solver data is repaired (extra
//! states truncated, impossible moves skipped) and every repair is recorded
//! as a `DiagramDiagnostic` for the caller to log.

use crate::palette::{FALLBACK_COLOR, Palette};
use crate::primitives::RowParity;
use crate::solver::SolveResponse;
use crate::{ColorCode, DisplayColor, KnotMove};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// DIAGRAM TYPES
// =============================================================================

/// One cell of a knot step, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Slot {
    /// A knot over two adjacent strands.
    Knot { glyph: char, color: DisplayColor },
    /// An outer strand of an even row, crossing through unknotted.
    Passthrough,
}

/// One renderable unit of the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagramElement {
    /// Strand colors at one point of the braid. `state_index` is 0-based.
    State {
        state_index: usize,
        colors: Vec<DisplayColor>,
    },
    /// The knots of one row. `step_index` is 1-based.
    KnotStep { step_index: usize, slots: Vec<Slot> },
}

impl DiagramElement {
    /// True for state elements.
    #[must_use]
    pub const fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }
}

/// A repair the builder applied to inconsistent solver data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagramDiagnostic {
    /// The state path was longer than `moves + 1` and was cut.
    StatesTruncated { received: usize, kept: usize },
    /// A move would cross strands beyond the layout; it was skipped.
    MoveOutOfRange { row: usize, move_index: usize },
    /// A move symbol had no glyph; its strands were consumed without a slot.
    UnrecognizedMove { row: usize, move_index: usize },
    /// The target pattern had no color for this knot; the fallback was used.
    MissingTargetColor { row: usize, knot: usize },
}

impl fmt::Display for DiagramDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatesTruncated { received, kept } => write!(
                f,
                "statesPath has {} entries, more than moves + 1; truncated to {}",
                received, kept
            ),
            Self::MoveOutOfRange { row, move_index } => write!(
                f,
                "row {} move {} exceeds the strand layout; skipped",
                row + 1,
                move_index + 1
            ),
            Self::UnrecognizedMove { row, move_index } => {
                write!(f, "row {} move {} is not a known knot", row + 1, move_index + 1)
            }
            Self::MissingTargetColor { row, knot } => write!(
                f,
                "row {} knot {} has no target color; using fallback",
                row + 1,
                knot + 1
            ),
        }
    }
}

/// A built diagram plus the repairs made while building it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagram {
    pub elements: Vec<DiagramElement>,
    #[serde(default)]
    pub diagnostics: Vec<DiagramDiagnostic>,
}

impl Diagram {
    /// Number of state elements.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_state()).count()
    }

    /// Number of knot-step elements.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.elements.len() - self.state_count()
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// The DiagramBuilder interleaves states and knot steps.
pub struct DiagramBuilder;

impl DiagramBuilder {
    /// Build the diagram for a solver reply and the pattern it solved.
    pub fn build(
        states_path: &[Vec<ColorCode>],
        best_solution: &[Vec<KnotMove>],
        target_pattern: &[Vec<ColorCode>],
    ) -> Diagram {
        let mut diagnostics = Vec::new();

        let kept = states_path.len().min(best_solution.len() + 1);
        if kept < states_path.len() {
            diagnostics.push(DiagramDiagnostic::StatesTruncated {
                received: states_path.len(),
                kept,
            });
        }
        let states_path = &states_path[..kept];

        let mut elements = Vec::with_capacity(kept * 2);
        for (i, state) in states_path.iter().enumerate() {
            elements.push(DiagramElement::State {
                state_index: i,
                colors: state.iter().map(|&c| Palette::resolve(c)).collect(),
            });

            if let Some(moves) = best_solution.get(i) {
                let row_target = target_pattern.get(i).map_or(&[][..], Vec::as_slice);
                let slots = Self::knot_slots(i, state.len(), moves, row_target, &mut diagnostics);
                elements.push(DiagramElement::KnotStep {
                    step_index: i + 1,
                    slots,
                });
            }
        }

        Diagram {
            elements,
            diagnostics,
        }
    }

    /// Build the diagram straight from a solver reply.
    pub fn from_response(response: &SolveResponse, target_pattern: &[Vec<ColorCode>]) -> Diagram {
        Self::build(&response.states_path, &response.best_solution, target_pattern)
    }

    /// Lay out the slots of row `row` over `strands` strand positions.
    fn knot_slots(
        row: usize,
        strands: usize,
        moves: &[KnotMove],
        row_target: &[ColorCode],
        diagnostics: &mut Vec<DiagramDiagnostic>,
    ) -> Vec<Slot> {
        let parity = RowParity::of(row);
        let mut slots = Vec::with_capacity(moves.len() + 2);
        let mut cursor = parity.first_strand();
        let mut knot = 0;

        if !parity.is_odd() {
            slots.push(Slot::Passthrough);
        }

        for (move_index, knot_move) in moves.iter().enumerate() {
            if cursor + 1 >= strands {
                diagnostics.push(DiagramDiagnostic::MoveOutOfRange { row, move_index });
                continue;
            }

            match knot_move.glyph() {
                Some(glyph) => {
                    let color = match row_target.get(knot) {
                        Some(&code) => Palette::resolve(code),
                        None => {
                            diagnostics.push(DiagramDiagnostic::MissingTargetColor { row, knot });
                            FALLBACK_COLOR
                        }
                    };
                    slots.push(Slot::Knot { glyph, color });
                }
                None => diagnostics.push(DiagramDiagnostic::UnrecognizedMove { row, move_index }),
            }

            cursor += 2;
            knot += 1;
        }

        if !parity.is_odd() && cursor < strands {
            slots.push(Slot::Passthrough);
        }

        slots
    }
}

// =============================================================================
// INPUT SUMMARY
// =============================================================================

/// Display colors of the design that produced a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSummary {
    pub start_state: Vec<DisplayColor>,
    pub target_knots: Vec<Vec<DisplayColor>>,
}

impl InputSummary {
    /// Resolve a start state and target pattern through the palette.
    #[must_use]
    pub fn new(start_state: &[ColorCode], target_pattern: &[Vec<ColorCode>]) -> Self {
        Self {
            start_state: start_state.iter().map(|&c| Palette::resolve(c)).collect(),
            target_knots: target_pattern
                .iter()
                .map(|row| row.iter().map(|&c| Palette::resolve(c)).collect())
                .collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorCode::{Blue as B, Green as G, Purple as P, Red as R, Yellow as Y};
    use crate::KnotMove::{LeftLeft, RightLeft, RightRight};

    fn knot_colors(element: &DiagramElement) -> Vec<DisplayColor> {
        match element {
            DiagramElement::KnotStep { slots, .. } => slots
                .iter()
                .filter_map(|s| match s {
                    Slot::Knot { color, .. } => Some(*color),
                    Slot::Passthrough => None,
                })
                .collect(),
            DiagramElement::State { .. } => Vec::new(),
        }
    }

    #[test]
    fn odd_row_has_no_passthrough() {
        let diagram = DiagramBuilder::build(
            &[vec![R, G, B, Y], vec![G, R, Y, B]],
            &[vec![RightRight, LeftLeft]],
            &[vec![P, B]],
        );

        assert_eq!(diagram.elements.len(), 3);
        assert_eq!(
            diagram.elements[1],
            DiagramElement::KnotStep {
                step_index: 1,
                slots: vec![
                    Slot::Knot {
                        glyph: '\\',
                        color: Palette::resolve(P)
                    },
                    Slot::Knot {
                        glyph: '/',
                        color: Palette::resolve(B)
                    },
                ],
            }
        );
        assert!(diagram.diagnostics.is_empty());
    }

    #[test]
    fn even_row_wraps_knots_in_passthroughs() {
        let diagram = DiagramBuilder::build(
            &[vec![R, G, B, Y], vec![G, R, Y, B], vec![G, Y, R, B]],
            &[vec![RightRight, LeftLeft], vec![RightLeft]],
            &[vec![R, G], vec![Y]],
        );

        match &diagram.elements[3] {
            DiagramElement::KnotStep { step_index, slots } => {
                assert_eq!(*step_index, 2);
                assert_eq!(
                    slots,
                    &vec![
                        Slot::Passthrough,
                        Slot::Knot {
                            glyph: '>',
                            color: Palette::resolve(Y)
                        },
                        Slot::Passthrough,
                    ]
                );
            }
            other => unreachable!("expected knot step, got {:?}", other),
        }
    }

    #[test]
    fn knot_color_comes_from_target_not_state() {
        let diagram = DiagramBuilder::build(
            &[vec![R, R, R, R], vec![R, R, R, R]],
            &[vec![RightRight, RightRight]],
            &[vec![B, G]],
        );
        assert_eq!(
            knot_colors(&diagram.elements[1]),
            vec![Palette::resolve(B), Palette::resolve(G)]
        );
    }

    #[test]
    fn extra_states_are_truncated() {
        let diagram = DiagramBuilder::build(
            &[vec![R, G], vec![G, R], vec![G, R], vec![R, G]],
            &[vec![RightRight]],
            &[vec![R]],
        );

        assert_eq!(diagram.elements.len(), 3);
        assert_eq!(
            diagram.diagnostics,
            vec![DiagramDiagnostic::StatesTruncated {
                received: 4,
                kept: 2
            }]
        );
    }

    #[test]
    fn moves_beyond_layout_are_skipped() {
        let diagram = DiagramBuilder::build(
            &[vec![R, G, B, Y], vec![G, R, Y, B]],
            &[vec![RightRight, LeftLeft, RightLeft]],
            &[vec![R, G, B]],
        );

        assert_eq!(knot_colors(&diagram.elements[1]).len(), 2);
        assert_eq!(
            diagram.diagnostics,
            vec![DiagramDiagnostic::MoveOutOfRange {
                row: 0,
                move_index: 2
            }]
        );
    }

    #[test]
    fn unrecognized_move_consumes_strands() {
        let diagram = DiagramBuilder::build(
            &[vec![R, G, B, Y], vec![R, G, B, Y]],
            &[vec![KnotMove::Unrecognized, LeftLeft]],
            &[vec![R, G]],
        );

        match &diagram.elements[1] {
            DiagramElement::KnotStep { slots, .. } => {
                assert_eq!(
                    slots,
                    &vec![Slot::Knot {
                        glyph: '/',
                        color: Palette::resolve(G)
                    }]
                );
            }
            other => unreachable!("expected knot step, got {:?}", other),
        }
        assert_eq!(diagram.diagnostics.len(), 1);
    }

    #[test]
    fn missing_target_color_uses_fallback() {
        let diagram = DiagramBuilder::build(&[vec![R, G], vec![G, R]], &[vec![RightRight]], &[]);
        assert_eq!(knot_colors(&diagram.elements[1]), vec![FALLBACK_COLOR]);
        assert_eq!(
            diagram.diagnostics,
            vec![DiagramDiagnostic::MissingTargetColor { row: 0, knot: 0 }]
        );
    }

    #[test]
    fn short_state_path_stops_early() {
        let diagram = DiagramBuilder::build(
            &[vec![R, G]],
            &[vec![RightRight], vec![RightRight]],
            &[vec![R], vec![]],
        );
        assert_eq!(diagram.state_count(), 1);
        assert_eq!(diagram.step_count(), 1);
    }

    #[test]
    fn empty_inputs_give_empty_diagram() {
        let diagram = DiagramBuilder::build(&[], &[], &[]);
        assert!(diagram.elements.is_empty());
        assert!(diagram.diagnostics.is_empty());
    }

    #[test]
    fn input_summary_resolves_colors() {
        let summary = InputSummary::new(&[R, G], &[vec![B]]);
        assert_eq!(summary.start_state[1].to_string(), "#00FF00");
        assert_eq!(summary.target_knots, vec![vec![Palette::resolve(B)]]);
    }

    #[test]
    fn elements_serialize_tagged() {
        let element = DiagramElement::KnotStep {
            step_index: 2,
            slots: vec![Slot::Passthrough],
        };
        let json = serde_json::to_string(&element).expect("serialize");
        assert_eq!(
            json,
            r#"{"type":"knot_step","step_index":2,"slots":[{"type":"passthrough"}]}"#
        );
    }
}
