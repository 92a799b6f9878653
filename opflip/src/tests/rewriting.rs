use crate::parser::parse;
use crate::rewriter::{invert_module, invert_source, InvertedOp};
use crate::unparse::unparse;

fn record(line: usize, col: usize, kind: &'static str) -> InvertedOp {
    InvertedOp { line, col, kind }
}

#[test]
fn test_invert_single_comparison() {
    let inversion = invert_source("if x < y:\n    pass").unwrap();
    assert_eq!(inversion.positions, vec![record(1, 3, "LESS_THAN")]);
    assert_eq!(inversion.code, "if x >= y:\n    pass\n");
}

#[test]
fn test_invert_two_sequential_statements() {
    let inversion = invert_source("if x < y:\n    pass\nif x != y:\n    pass").unwrap();
    assert_eq!(
        inversion.positions,
        vec![record(1, 3, "LESS_THAN"), record(3, 3, "NOT_EQUAL")]
    );
    assert_eq!(inversion.code, "if x >= y:\n    pass\nif x == y:\n    pass\n");
}

#[test]
fn test_invert_two_comparisons_in_one_condition() {
    let inversion = invert_source("if x < y and y != z:\n    pass").unwrap();
    assert_eq!(
        inversion.positions,
        vec![record(1, 3, "LESS_THAN"), record(1, 13, "NOT_EQUAL")]
    );
    assert_eq!(inversion.code, "if x >= y and y == z:\n    pass\n");
}

#[test]
fn test_no_eligible_operators() {
    let inversion = invert_source("x = 5\ny = 10\nprint(x + y)").unwrap();
    assert!(inversion.positions.is_empty());
    assert_eq!(inversion.code, "x = 5\ny = 10\nprint(x + y)\n");
}

#[test]
fn test_invert_every_operator_kind() {
    let inversion = invert_source("a < b\na <= b\na > b\na >= b\na == b\na != b").unwrap();
    assert_eq!(
        inversion.positions,
        vec![
            record(1, 0, "LESS_THAN"),
            record(2, 0, "LESS_EQUAL"),
            record(3, 0, "GREATER_THAN"),
            record(4, 0, "GREATER_EQUAL"),
            record(5, 0, "EQUAL"),
            record(6, 0, "NOT_EQUAL"),
        ]
    );
    assert_eq!(
        inversion.code,
        "a >= b\na > b\na <= b\na < b\na != b\na == b\n"
    );
}

#[test]
fn test_invert_chained_comparison_offsets_by_index() {
    let inversion = invert_source("if a < b <= c:\n    pass").unwrap();
    assert_eq!(
        inversion.positions,
        vec![record(1, 3, "LESS_THAN"), record(1, 4, "LESS_EQUAL")]
    );
    assert_eq!(inversion.code, "if a >= b > c:\n    pass\n");
}

#[test]
fn test_membership_and_identity_left_untouched() {
    let inversion = invert_source("if x in y:\n    pass").unwrap();
    assert!(inversion.positions.is_empty());
    assert_eq!(inversion.code, "if x in y:\n    pass\n");

    let inversion = invert_source("if x is not y and a < b:\n    pass").unwrap();
    assert_eq!(inversion.positions, vec![record(1, 18, "LESS_THAN")]);
    assert_eq!(inversion.code, "if x is not y and a >= b:\n    pass\n");
}

#[test]
fn test_nested_comparison_in_call_arguments() {
    // Pre-order: the enclosing chain reports before the nested one.
    let inversion = invert_source("if f(a < b) != c:\n    pass").unwrap();
    assert_eq!(
        inversion.positions,
        vec![record(1, 3, "NOT_EQUAL"), record(1, 5, "LESS_THAN")]
    );
    assert_eq!(inversion.code, "if f(a >= b) == c:\n    pass\n");
}

#[test]
fn test_invert_inside_nested_blocks() {
    let source = "while x <= 0 and x < 0:\n    x = x + 5";
    let inversion = invert_source(source).unwrap();
    assert_eq!(
        inversion.positions,
        vec![record(1, 6, "LESS_EQUAL"), record(1, 17, "LESS_THAN")]
    );
    assert_eq!(inversion.code, "while x > 0 and x >= 0:\n    x = x + 5\n");
}

#[test]
fn test_invert_full_program() {
    let source = "x = 10\ny = 5\n\nwhile x <= 0 and x < 0:\n    x = x + 5\n    print(\"up\")\n\nif x >= y and x != 0:\n    print(\"a\")\nelse:\n    print(\"b\")\n";
    let inversion = invert_source(source).unwrap();
    assert_eq!(
        inversion.positions,
        vec![
            record(4, 6, "LESS_EQUAL"),
            record(4, 17, "LESS_THAN"),
            record(8, 3, "GREATER_EQUAL"),
            record(8, 14, "NOT_EQUAL"),
        ]
    );
    let expected = "x = 10\ny = 5\nwhile x > 0 and x >= 0:\n    x = x + 5\n    print(\"up\")\nif x < y and x == 0:\n    print(\"a\")\nelse:\n    print(\"b\")\n";
    assert_eq!(inversion.code, expected);
}

#[test]
fn test_record_count_matches_eligible_operator_count() {
    let source = "if a < b <= c:\n    pass\nif d in e:\n    pass\nif f == g:\n    pass";
    let inversion = invert_source(source).unwrap();
    // Three invertible operators; `in` produces no record.
    assert_eq!(inversion.positions.len(), 3);
}

#[test]
fn test_operands_are_not_mutated() {
    let inversion = invert_source("if alpha < beta:\n    pass").unwrap();
    assert!(inversion.code.contains("alpha"));
    assert!(inversion.code.contains("beta"));
    assert_eq!(inversion.code, "if alpha >= beta:\n    pass\n");
}

#[test]
fn test_double_inversion_restores_canonical_source() {
    let source = "if x < y and y != z:\n    pass\nwhile a >= b:\n    a = a - 1";
    let canonical = unparse(&parse(source).unwrap()).unwrap();
    let once = invert_source(source).unwrap();
    let twice = invert_source(&once.code).unwrap();
    assert_eq!(twice.code, canonical);
    assert_eq!(once.positions.len(), twice.positions.len());
}

#[test]
fn test_invert_module_keeps_operand_structure() {
    let module = parse("if x < y:\n    pass").unwrap();
    let before = module.clone();
    let (positions, inverted) = invert_module(module);
    assert_eq!(positions.len(), 1);
    // Inverting again restores the tree exactly: spans and operands are
    // untouched, only operator kinds changed.
    let (positions_again, restored) = invert_module(inverted);
    assert_eq!(positions_again.len(), 1);
    assert_eq!(restored, before);
}

#[test]
fn test_parse_failure_propagates() {
    let err = invert_source("if x <:\n    pass").unwrap_err();
    assert!(err.to_string().starts_with("Parse error"));
}

#[test]
fn test_positions_serialize_to_json() {
    let inversion = invert_source("if x < y:\n    pass").unwrap();
    let json = serde_json::to_value(&inversion).unwrap();
    assert_eq!(json["positions"][0]["line"], 1);
    assert_eq!(json["positions"][0]["col"], 3);
    assert_eq!(json["positions"][0]["kind"], "LESS_THAN");
    assert_eq!(json["code"], "if x >= y:\n    pass\n");
}
