//! Behavioral tests for the decompilation pass: operator mapping, control
//! flow shaping, the adjacency heuristic, and graceful degradation.
mod common;

use bunkai::prelude::*;
use common::{blocks_of_type, decompile_ok, only_block_of_type};

#[test]
fn test_literal_values_become_shadow_blocks() {
    let ws = decompile_ok("var a = 5;\nvar b = 'hi';\nvar c = true;\n");
    let number = only_block_of_type(&ws, "math_number");
    assert!(number.shadow);
    assert_eq!(number.field_value("NUM"), Some("5"));
    let text = only_block_of_type(&ws, "text");
    assert_eq!(text.field_value("TEXT"), Some("hi"));
    let boolean = only_block_of_type(&ws, "logic_boolean");
    assert_eq!(boolean.field_value("BOOL"), Some("TRUE"));
}

#[test]
fn test_binary_operator_mapping() {
    let ws = decompile_ok("var x = 1 + 2;\nvar y = a && b;\nvar z = a <= b;\n");
    assert_eq!(
        only_block_of_type(&ws, "math_arithmetic").field_value("OP"),
        Some("ADD")
    );
    assert_eq!(
        only_block_of_type(&ws, "logic_operation").field_value("OP"),
        Some("AND")
    );
    assert_eq!(
        only_block_of_type(&ws, "logic_compare").field_value("OP"),
        Some("LTE")
    );
}

#[test]
fn test_strict_equality_maps_like_loose() {
    let ws = decompile_ok("var x = a === b;\nvar y = a !== b;\n");
    let compares = blocks_of_type(&ws, "logic_compare");
    assert_eq!(compares[0].field_value("OP"), Some("EQ"));
    assert_eq!(compares[1].field_value("OP"), Some("NEQ"));
}

#[test]
fn test_variable_created_on_first_reference() {
    let ws = decompile_ok("var x = count + 1;\n");
    let names: Vec<&str> = ws.variables().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["x", "count"]);
    let getter = only_block_of_type(&ws, "variables_get");
    assert_eq!(getter.field_value("VAR"), Some("count"));
}

#[test]
fn test_math_log_maps_to_log10() {
    let ws = decompile_ok("var x = Math.log(10);\n");
    let single = only_block_of_type(&ws, "math_single");
    assert_eq!(single.field_value("OP"), Some("LOG10"));
}

#[test]
fn test_math_call_mapping() {
    let ws = decompile_ok("var a = Math.sqrt(9);\nvar b = Math.floor(1.5);\nvar c = Math.sin(0);\n");
    assert_eq!(
        only_block_of_type(&ws, "math_single").field_value("OP"),
        Some("ROOT")
    );
    assert_eq!(
        only_block_of_type(&ws, "math_round").field_value("OP"),
        Some("ROUNDDOWN")
    );
    assert_eq!(
        only_block_of_type(&ws, "math_trig").field_value("OP"),
        Some("SIN")
    );
}

#[test]
fn test_unknown_math_method_leaves_gap() {
    let ws = decompile_ok("var x = Math.random();\n");
    let setter = only_block_of_type(&ws, "variables_set");
    assert_eq!(setter.input_child("VALUE"), None);
    assert!(blocks_of_type(&ws, "math_single").is_empty());
}

#[test]
fn test_subtract_assign_delta_is_not_negated() {
    let ws = decompile_ok("count -= 2;\n");
    let change = only_block_of_type(&ws, "math_change");
    let delta = ws.block(change.input_child("DELTA").unwrap());
    // The delta keeps its literal value; no negation wrapper appears.
    assert_eq!(delta.block_type.name(), "math_number");
    assert_eq!(delta.field_value("NUM"), Some("2"));
    assert!(blocks_of_type(&ws, "math_single").is_empty());
}

#[test]
fn test_else_if_cascade_flattens_into_one_block() {
    let ws = decompile_ok(
        "if (a == 1) {\n  b = 1;\n} else if (a == 2) {\n  b = 2;\n} else {\n  b = 3;\n}\n",
    );
    let if_block = only_block_of_type(&ws, "controls_if");
    let mutation = if_block.mutation.unwrap();
    assert_eq!(mutation.else_if_count, 1);
    assert!(mutation.has_else);
    assert!(if_block.input_child("IF0").is_some());
    assert!(if_block.input_child("DO0").is_some());
    assert!(if_block.input_child("IF1").is_some());
    assert!(if_block.input_child("DO1").is_some());
    assert!(if_block.input_child("ELSE").is_some());
}

#[test]
fn test_plain_if_has_no_mutation_attributes() {
    let ws = decompile_ok("if (a == 1) {\n  b = 1;\n}\n");
    let if_block = only_block_of_type(&ws, "controls_if");
    let mutation = if_block.mutation.unwrap();
    assert_eq!(mutation.else_if_count, 0);
    assert!(!mutation.has_else);
}

#[test]
fn test_else_with_nested_if_in_block_stops_flattening() {
    let ws = decompile_ok("if (a == 1) {\n  b = 1;\n} else {\n  if (a == 2) {\n    b = 2;\n  }\n}\n");
    let if_blocks = blocks_of_type(&ws, "controls_if");
    assert_eq!(if_blocks.len(), 2);
    let outer = if_blocks[0];
    assert_eq!(outer.mutation.unwrap().else_if_count, 0);
    assert!(outer.mutation.unwrap().has_else);
    // The inner if sits inside the ELSE slot as its own block.
    assert_eq!(outer.input_child("ELSE"), Some(if_blocks[1].id));
}

#[test]
fn test_multi_statement_body_attaches_by_chain_head() {
    let ws = decompile_ok("while (a == 1) {\n  b = 1;\n  b += 1;\n}\n");
    let while_block = only_block_of_type(&ws, "controls_whileUntil");
    let head = ws.block(while_block.input_child("DO").unwrap());
    assert_eq!(head.block_type.name(), "variables_set");
    let tail = ws.block(head.next.unwrap());
    assert_eq!(tail.block_type.name(), "math_change");
}

#[test]
fn test_for_increment_becomes_constant_step() {
    let ws = decompile_ok("for (i = 0; i < 10; i++) {\n}\n");
    let for_block = only_block_of_type(&ws, "controls_for");
    let by = ws.block(for_block.input_child("BY").unwrap());
    assert!(by.shadow);
    assert_eq!(by.field_value("NUM"), Some("1"));
    let from = ws.block(for_block.input_child("FROM").unwrap());
    assert_eq!(from.field_value("NUM"), Some("0"));
}

#[test]
fn test_for_bound_ignores_comparison_operator() {
    // `<` and `<=` produce the same TO bound.
    let strict = decompile_ok("for (i = 0; i < 10; i++) {\n}\n");
    let inclusive = decompile_ok("for (i = 0; i <= 10; i++) {\n}\n");
    for ws in [&strict, &inclusive] {
        let for_block = only_block_of_type(ws, "controls_for");
        let to = ws.block(for_block.input_child("TO").unwrap());
        assert_eq!(to.field_value("NUM"), Some("10"));
    }
}

#[test]
fn test_for_subtract_step_wraps_in_negation() {
    let ws = decompile_ok("for (i = 10; i > 0; i -= 2) {\n}\n");
    let for_block = only_block_of_type(&ws, "controls_for");
    let by = ws.block(for_block.input_child("BY").unwrap());
    assert_eq!(by.block_type.name(), "math_single");
    assert_eq!(by.field_value("OP"), Some("NEG"));
    let inner = ws.block(by.input_child("NUM").unwrap());
    assert_eq!(inner.field_value("NUM"), Some("2"));
}

#[test]
fn test_for_nonliteral_from_defaults_to_zero() {
    let ws = decompile_ok("for (i = start; i < 10; i++) {\n}\n");
    let for_block = only_block_of_type(&ws, "controls_for");
    let from = ws.block(for_block.input_child("FROM").unwrap());
    assert!(from.shadow);
    assert_eq!(from.field_value("NUM"), Some("0"));
}

#[test]
fn test_statements_on_same_line_chain() {
    let ws = decompile_ok("var a = 1; var b = 2;\nvar c = 3;\n");
    assert_eq!(ws.top_blocks().len(), 2);
    let setters = blocks_of_type(&ws, "variables_set");
    assert_eq!(setters[0].next, Some(setters[1].id));
    assert_eq!(setters[1].next, None);
    assert!(setters[2].is_top());
}

#[test]
fn test_newline_separates_top_level_chains() {
    let ws = decompile_ok("var a = 1;\nvar b = 2;\n");
    assert_eq!(ws.top_blocks().len(), 2);
}

#[test]
fn test_trailing_comment_keeps_statements_adjacent() {
    // The second statement's leading comment starts on line one, so the two
    // statements count as same-line and chain.
    let ws = decompile_ok("var a = 1; // first\nvar b = 2;\n");
    assert_eq!(ws.top_blocks().len(), 1);
}

#[test]
fn test_comment_on_own_line_separates() {
    let ws = decompile_ok("var a = 1;\n// note\nvar b = 2;\n");
    assert_eq!(ws.top_blocks().len(), 2);
}

#[test]
fn test_unsupported_statement_leaves_gap() {
    let ws = decompile_ok("var a = 1;\nswitch (a) { }\nvar b = 2;\n");
    assert_eq!(blocks_of_type(&ws, "variables_set").len(), 2);
    assert_eq!(ws.top_blocks().len(), 2);
}

#[test]
fn test_gap_statement_breaks_top_level_chain() {
    // `var b` shares a line with the unsupported switch, not with `var a`,
    // so it must not connect across the gap.
    let ws = decompile_ok("var a = 1;\nswitch (x) { } var b = 2;\n");
    assert_eq!(ws.top_blocks().len(), 2);
    let setters = blocks_of_type(&ws, "variables_set");
    assert_eq!(setters.len(), 2);
    assert_eq!(setters[0].next, None);
    assert!(setters[1].is_top());
}

#[test]
fn test_known_call_statement_uses_registry() {
    let ws = decompile_ok("console.log();\n");
    let block = only_block_of_type(&ws, "text_print");
    assert!(block.is_top());
}

#[test]
fn test_unknown_call_produces_nothing() {
    let ws = decompile_ok("someFunction();\n");
    assert!(ws.is_empty());
}

#[test]
fn test_parse_error_aborts() {
    let mut ws = Workspace::new();
    let err = decompile(&mut ws, "var a = ;").unwrap_err();
    assert!(matches!(err, DecompileError::Parse(_)));
}

#[test]
fn test_events_stay_suppressed_during_decompile() {
    let ws = decompile_ok("var a = 1;\n");
    assert!(ws.events().is_empty());
    assert!(ws.events().enabled());
}

#[test]
fn test_decompile_is_deterministic() {
    let code = "var a = 1;\nif (a == 1) {\n  a += 2;\n}\n";
    let first = decompile_ok(code);
    let second = decompile_ok(code);
    assert_eq!(workspace_to_xml(&first), workspace_to_xml(&second));
}

#[test]
fn test_generated_code_is_canonical() {
    let ws = decompile_ok("var count = 0;\ncount += 1;\n");
    assert_eq!(workspace_to_code(&ws), "var count = 0;\ncount += 1;\n");
}

#[test]
fn test_generated_for_header_is_inclusive() {
    let ws = decompile_ok("for (i = 0; i < 10; i++) {\n}\n");
    assert_eq!(
        workspace_to_code(&ws),
        "for (i = 0; i <= 10; i += 1) {\n}\n"
    );
}
