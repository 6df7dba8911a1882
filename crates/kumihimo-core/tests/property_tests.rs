//! # Property-Based Tests
//!
//! Structural invariants of validation and diagram reconstruction,
//! checked with proptest over random designs and solver replies.

use kumihimo_core::{
    ColorCode, DiagramBuilder, DiagramElement, KnotMove, Palette, PatternValidator, Slot,
    ValidationError, knots_in_row,
};
use proptest::collection::vec;
use proptest::prelude::*;

fn color() -> impl Strategy<Value = ColorCode> {
    prop::sample::select(ColorCode::ALL.to_vec())
}

fn knot_move() -> impl Strategy<Value = KnotMove> {
    prop::sample::select(KnotMove::ALL.to_vec())
}

fn strand_count() -> impl Strategy<Value = usize> {
    prop::sample::select(vec![4usize, 6, 8, 10, 12])
}

/// A well-formed reply: `rows` move rows, `rows + 1` states, matching targets.
fn reply(
    strands: usize,
    rows: usize,
) -> impl Strategy<
    Value = (
        Vec<Vec<ColorCode>>,
        Vec<Vec<KnotMove>>,
        Vec<Vec<ColorCode>>,
    ),
> {
    let states = vec(vec(color(), strands), rows + 1);
    let moves: Vec<_> = (0..rows)
        .map(|i| vec(knot_move(), knots_in_row(strands, i)))
        .collect();
    let targets: Vec<_> = (0..rows)
        .map(|i| vec(color(), knots_in_row(strands, i)))
        .collect();
    (states, moves, targets)
}

fn knot_colors(slots: &[Slot]) -> Vec<kumihimo_core::DisplayColor> {
    slots
        .iter()
        .filter_map(|s| match s {
            Slot::Knot { color, .. } => Some(*color),
            Slot::Passthrough => None,
        })
        .collect()
}

proptest! {
    /// n states and n - 1 move rows give 2n - 1 alternating elements.
    #[test]
    fn elements_alternate(
        (states, moves, targets) in (strand_count(), 1usize..12)
            .prop_flat_map(|(s, r)| reply(s, r))
    ) {
        let diagram = DiagramBuilder::build(&states, &moves, &targets);

        prop_assert_eq!(diagram.elements.len(), 2 * states.len() - 1);
        for (i, element) in diagram.elements.iter().enumerate() {
            prop_assert_eq!(element.is_state(), i % 2 == 0);
        }
        prop_assert!(diagram.diagnostics.is_empty());
    }

    /// Extra states behave exactly like the truncated path.
    #[test]
    fn extra_states_truncate(
        (states, moves, targets) in (strand_count(), 1usize..8)
            .prop_flat_map(|(s, r)| reply(s, r)),
        extra in 1usize..4
    ) {
        let mut padded = states.clone();
        for _ in 0..extra {
            padded.push(states[0].clone());
        }

        let long = DiagramBuilder::build(&padded, &moves, &targets);
        let exact = DiagramBuilder::build(&states, &moves, &targets);

        prop_assert_eq!(long.elements.len(), 2 * moves.len() + 1);
        prop_assert_eq!(long.elements, exact.elements);
    }

    /// Knot colors always come from the target pattern.
    #[test]
    fn knot_colors_follow_targets(
        (states, moves, targets) in (strand_count(), 1usize..8)
            .prop_flat_map(|(s, r)| reply(s, r))
    ) {
        let diagram = DiagramBuilder::build(&states, &moves, &targets);

        for element in &diagram.elements {
            if let DiagramElement::KnotStep { step_index, slots } = element {
                let expected: Vec<_> = targets[step_index - 1]
                    .iter()
                    .map(|&c| Palette::resolve(c))
                    .collect();
                prop_assert_eq!(knot_colors(slots), expected);
            }
        }
    }

    /// Even rows start and end with a passthrough; odd rows never have one.
    #[test]
    fn passthroughs_only_on_even_rows(
        (states, moves, targets) in (strand_count(), 1usize..8)
            .prop_flat_map(|(s, r)| reply(s, r))
    ) {
        let diagram = DiagramBuilder::build(&states, &moves, &targets);

        for element in &diagram.elements {
            if let DiagramElement::KnotStep { step_index, slots } = element {
                let even_row = step_index % 2 == 0;
                let passthroughs = slots.iter().filter(|s| **s == Slot::Passthrough).count();
                prop_assert_eq!(passthroughs, if even_row { 2 } else { 0 });
                if even_row {
                    prop_assert_eq!(slots.first(), Some(&Slot::Passthrough));
                    prop_assert_eq!(slots.last(), Some(&Slot::Passthrough));
                }
            }
        }
    }

    /// An unassigned start slot is always the reported reason.
    #[test]
    fn incomplete_start_reported_first(
        strands in 3usize..13,
        hole in 0usize..12,
        rows in vec(vec(prop::option::of(color()), 0..7), 0..5)
    ) {
        let mut start: Vec<Option<ColorCode>> = vec![Some(ColorCode::Red); strands];
        start[hole % strands] = None;

        prop_assert_eq!(
            PatternValidator::check(strands, &start, &rows),
            Err(ValidationError::IncompleteStartColors)
        );
    }
}
