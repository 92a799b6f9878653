use crate::ast::CmpOp;
use crate::parser::parse;
use crate::rewriter::invert_source;
use crate::unparse::unparse;
use proptest::prelude::*;

const INVERTIBLE: [CmpOp; 6] = [
    CmpOp::Lt,
    CmpOp::LtE,
    CmpOp::Gt,
    CmpOp::GtE,
    CmpOp::Eq,
    CmpOp::NotEq,
];

#[test]
fn test_inversion_table_is_involutive() {
    for op in INVERTIBLE {
        let flipped = op.inverse().unwrap();
        assert_ne!(flipped, op);
        assert_eq!(flipped.inverse(), Some(op));
    }
}

#[test]
fn test_inversion_table_is_injective() {
    let mut inverses: Vec<CmpOp> = INVERTIBLE.iter().map(|op| op.inverse().unwrap()).collect();
    inverses.sort_by_key(|op| op.name());
    inverses.dedup();
    assert_eq!(inverses.len(), INVERTIBLE.len());
}

#[test]
fn test_identity_and_membership_operators_have_no_inverse() {
    for op in [CmpOp::Is, CmpOp::IsNot, CmpOp::In, CmpOp::NotIn] {
        assert_eq!(op.inverse(), None);
    }
}

// Suffixed so a generated identifier can never collide with a keyword.
fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,4}".prop_map(|s| format!("{}_v", s))
}

fn cmp_symbol() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["<", "<=", ">", ">=", "==", "!="])
}

/// One `if` statement with a one- or two-operator comparison chain,
/// paired with its operator count.
fn comparison_line() -> impl Strategy<Value = (String, usize)> {
    (
        ident(),
        cmp_symbol(),
        ident(),
        proptest::option::of((cmp_symbol(), ident())),
    )
        .prop_map(|(a, op, b, tail)| match tail {
            Some((second_op, c)) => (
                format!("if {} {} {} {} {}:\n    pass", a, op, b, second_op, c),
                2,
            ),
            None => (format!("if {} {} {}:\n    pass", a, op, b), 1),
        })
}

fn join(lines: &[(String, usize)]) -> String {
    lines
        .iter()
        .map(|(line, _)| line.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #[test]
    fn prop_double_inversion_restores_canonical_source(
        lines in prop::collection::vec(comparison_line(), 1..5)
    ) {
        let source = join(&lines);
        let canonical = unparse(&parse(&source).unwrap()).unwrap();
        let once = invert_source(&source).unwrap();
        let twice = invert_source(&once.code).unwrap();
        prop_assert_eq!(twice.code, canonical);
        prop_assert_eq!(once.positions.len(), twice.positions.len());
    }

    #[test]
    fn prop_record_count_matches_operator_count(
        lines in prop::collection::vec(comparison_line(), 1..5)
    ) {
        let expected: usize = lines.iter().map(|(_, count)| count).sum();
        let inversion = invert_source(&join(&lines)).unwrap();
        prop_assert_eq!(inversion.positions.len(), expected);
    }

    #[test]
    fn prop_records_are_in_document_order(
        lines in prop::collection::vec(comparison_line(), 1..5)
    ) {
        let inversion = invert_source(&join(&lines)).unwrap();
        for pair in inversion.positions.windows(2) {
            prop_assert!((pair[0].line, pair[0].col) < (pair[1].line, pair[1].col));
        }
    }

    #[test]
    fn prop_operands_survive_inversion(
        a in ident(),
        op in cmp_symbol(),
        b in ident()
    ) {
        let source = format!("if {} {} {}:\n    pass", a, op, b);
        let inversion = invert_source(&source).unwrap();
        prop_assert!(inversion.code.contains(&a));
        prop_assert!(inversion.code.contains(&b));
        prop_assert_eq!(inversion.positions.len(), 1);
        prop_assert_eq!(inversion.positions[0].line, 1);
        prop_assert_eq!(inversion.positions[0].col, 3);
    }
}
