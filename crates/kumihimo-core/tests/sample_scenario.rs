//! # Sample Scenario Tests
//!
//! End-to-end checks over the four-strand sample design, from editing
//! through validation to the rendered diagram.

use kumihimo_core::ColorCode::{Blue as B, Green as G, Red as R, Yellow as Y};
use kumihimo_core::{
    DesignSession, DiagramBuilder, DiagramElement, EditTarget, KnotMove, Palette, Slot,
    StrandCount, ValidationError, interpret_reply,
};

const SAMPLE_REPLY: &str = r#"{
    "bestSolution": [["右右", "左左"], ["右左"]],
    "startState": ["R", "G", "B", "Y"],
    "statesPath": [
        ["R", "G", "B", "Y"],
        ["G", "R", "Y", "B"],
        ["G", "Y", "R", "B"]
    ],
    "targetState": ["G", "Y", "R", "B"]
}"#;

fn sample_session() -> DesignSession {
    let mut session = DesignSession::new(StrandCount::new(4).expect("valid"));
    for (index, color) in [R, G, B, Y].into_iter().enumerate() {
        session
            .open_picker(EditTarget::Start { index })
            .expect("open");
        session.apply_color(color).expect("apply");
    }
    session.add_row().expect("row 1");
    session.add_row().expect("row 2");
    session.set_knot_color(0, 0, G).expect("knot");
    session.set_knot_color(0, 1, Y).expect("knot");
    session.set_knot_color(1, 0, Y).expect("knot");
    session
}

mod row_structure {
    use super::*;

    #[test]
    fn four_strands_two_then_one() {
        let session = sample_session();
        let lens: Vec<usize> = session.target_pattern().iter().map(Vec::len).collect();
        assert_eq!(lens, vec![2, 1]);
        assert!(session.validate().is_ok());
    }

    #[test]
    fn fail_fast_on_incomplete_start() {
        let mut session = DesignSession::new(StrandCount::new(4).expect("valid"));
        session.set_start_color(0, R).expect("set");
        // Pattern is also empty; the start rule is reported first.
        assert_eq!(
            session.validate(),
            Err(ValidationError::IncompleteStartColors)
        );
    }
}

mod diagram_reconstruction {
    use super::*;

    #[test]
    fn sample_diagram_matches_expected_layout() {
        let session = sample_session();
        let request = session.validate().expect("valid");
        let response = interpret_reply(200, SAMPLE_REPLY.as_bytes()).expect("reply");

        let diagram = DiagramBuilder::from_response(&response, &request.target_pattern);

        assert!(diagram.diagnostics.is_empty());
        assert_eq!(diagram.elements.len(), 5);

        assert_eq!(
            diagram.elements[0],
            DiagramElement::State {
                state_index: 0,
                colors: [R, G, B, Y].map(Palette::resolve).to_vec(),
            }
        );
        assert_eq!(
            diagram.elements[1],
            DiagramElement::KnotStep {
                step_index: 1,
                slots: vec![
                    Slot::Knot {
                        glyph: '\\',
                        color: Palette::resolve(G)
                    },
                    Slot::Knot {
                        glyph: '/',
                        color: Palette::resolve(Y)
                    },
                ],
            }
        );
        assert_eq!(
            diagram.elements[2],
            DiagramElement::State {
                state_index: 1,
                colors: [G, R, Y, B].map(Palette::resolve).to_vec(),
            }
        );
        assert_eq!(
            diagram.elements[3],
            DiagramElement::KnotStep {
                step_index: 2,
                slots: vec![
                    Slot::Passthrough,
                    Slot::Knot {
                        glyph: '>',
                        color: Palette::resolve(Y)
                    },
                    Slot::Passthrough,
                ],
            }
        );
        assert_eq!(
            diagram.elements[4],
            DiagramElement::State {
                state_index: 2,
                colors: [G, Y, R, B].map(Palette::resolve).to_vec(),
            }
        );
    }

    #[test]
    fn duplicated_final_state_is_trimmed() {
        // Some solver builds append the end state twice.
        let response = interpret_reply(200, SAMPLE_REPLY.as_bytes()).expect("reply");
        let mut states = response.states_path.clone();
        states.push(states[2].clone());

        let target = vec![vec![G, Y], vec![Y]];
        let trimmed = DiagramBuilder::build(&states, &response.best_solution, &target);
        let clean = DiagramBuilder::build(&response.states_path, &response.best_solution, &target);

        assert_eq!(trimmed.elements, clean.elements);
        assert_eq!(trimmed.diagnostics.len(), 1);
    }

    #[test]
    fn moves_decode_to_expected_kinds() {
        let response = interpret_reply(200, SAMPLE_REPLY.as_bytes()).expect("reply");
        assert_eq!(
            response.best_solution,
            vec![
                vec![KnotMove::RightRight, KnotMove::LeftLeft],
                vec![KnotMove::RightLeft]
            ]
        );
    }
}
