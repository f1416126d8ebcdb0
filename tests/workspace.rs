//! Unit tests for workspace connection discipline, disposal, and events.
use bunkai::error::ConnectionError;
use bunkai::workspace::{BlockType, ChangeEvent, Workspace};

#[test]
fn test_value_connection_accepts_matching_type() {
    let mut ws = Workspace::new();
    let parent = ws.make_block(BlockType::MathArithmetic);
    let child = ws.make_block(BlockType::MathNumber);
    ws.connect_value(parent, "A", child).unwrap();
    assert_eq!(ws.block(parent).input_child("A"), Some(child));
    assert_eq!(ws.block(child).parent, Some(parent));
}

#[test]
fn test_value_connection_rejects_type_mismatch() {
    let mut ws = Workspace::new();
    let parent = ws.make_block(BlockType::ControlsWhileUntil);
    let child = ws.make_block(BlockType::Text);
    let err = ws.connect_value(parent, "BOOL", child).unwrap_err();
    assert!(matches!(err, ConnectionError::Rejected { .. }));
    assert_eq!(ws.block(parent).input_child("BOOL"), None);
}

#[test]
fn test_any_type_bridges_both_directions() {
    let mut ws = Workspace::new();
    // variables_get produces Any, so a Boolean input takes it.
    let parent = ws.make_block(BlockType::ControlsWhileUntil);
    let child = ws.make_block(BlockType::VariablesGet);
    ws.connect_value(parent, "BOOL", child).unwrap();
    // variables_set accepts Any, so a Boolean output fits.
    let setter = ws.make_block(BlockType::VariablesSet);
    let boolean = ws.make_block(BlockType::LogicBoolean);
    ws.connect_value(setter, "VALUE", boolean).unwrap();
}

#[test]
fn test_missing_input_is_its_own_error() {
    let mut ws = Workspace::new();
    let parent = ws.make_block(BlockType::MathNumber);
    let child = ws.make_block(BlockType::MathNumber);
    let err = ws.connect_value(parent, "NUM", child).unwrap_err();
    assert_eq!(
        err,
        ConnectionError::MissingInput {
            block_type: "math_number".to_string(),
            input: "NUM".to_string(),
        }
    );
}

#[test]
fn test_occupied_input_rejects_second_child() {
    let mut ws = Workspace::new();
    let parent = ws.make_block(BlockType::MathArithmetic);
    let first = ws.make_block(BlockType::MathNumber);
    let second = ws.make_block(BlockType::MathNumber);
    ws.connect_value(parent, "A", first).unwrap();
    assert!(ws.connect_value(parent, "A", second).is_err());
    assert_eq!(ws.block(parent).input_child("A"), Some(first));
}

#[test]
fn test_statement_input_rejects_value_block() {
    let mut ws = Workspace::new();
    let parent = ws.make_block(BlockType::ControlsWhileUntil);
    let child = ws.make_block(BlockType::MathNumber);
    assert!(ws.connect_statement(parent, "DO", child).is_err());
}

#[test]
fn test_chaining_statement_blocks() {
    let mut ws = Workspace::new();
    let first = ws.make_block(BlockType::VariablesSet);
    let second = ws.make_block(BlockType::MathChange);
    assert!(ws.can_chain(first, second));
    ws.connect_next(first, second).unwrap();
    assert_eq!(ws.block(first).next, Some(second));
    assert_eq!(ws.block(second).previous, Some(first));
    // Only the head is a top block now.
    assert_eq!(ws.top_blocks(), vec![first]);
}

#[test]
fn test_value_blocks_cannot_chain() {
    let mut ws = Workspace::new();
    let first = ws.make_block(BlockType::MathNumber);
    let second = ws.make_block(BlockType::VariablesSet);
    assert!(!ws.can_chain(first, second));
    assert!(ws.connect_next(first, second).is_err());
}

#[test]
fn test_dispose_removes_subtree_and_detaches() {
    let mut ws = Workspace::new();
    let setter = ws.make_block(BlockType::VariablesSet);
    let sum = ws.make_block(BlockType::MathArithmetic);
    let lhs = ws.make_block(BlockType::MathNumber);
    ws.connect_value(sum, "A", lhs).unwrap();
    ws.connect_value(setter, "VALUE", sum).unwrap();

    ws.dispose(sum);
    assert_eq!(ws.len(), 1);
    assert!(!ws.contains(sum));
    assert!(!ws.contains(lhs));
    assert_eq!(ws.block(setter).input_child("VALUE"), None);
}

#[test]
fn test_dispose_takes_next_chain_along() {
    let mut ws = Workspace::new();
    let a = ws.make_block(BlockType::VariablesSet);
    let b = ws.make_block(BlockType::MathChange);
    let c = ws.make_block(BlockType::MathChange);
    ws.connect_next(a, b).unwrap();
    ws.connect_next(b, c).unwrap();

    ws.dispose(b);
    assert!(ws.contains(a));
    assert!(!ws.contains(b));
    assert!(!ws.contains(c));
    assert_eq!(ws.block(a).next, None);
}

#[test]
fn test_variables_deduplicate_by_name() {
    let mut ws = Workspace::new();
    let first = ws.create_variable("count");
    let again = ws.create_variable("count");
    let other = ws.create_variable("total");
    assert_eq!(first, again);
    assert_ne!(first, other);
    assert_eq!(ws.variables().len(), 2);
    assert_eq!(ws.variable(first).name, "count");
}

#[test]
fn test_reshape_if_builds_branch_inputs() {
    let mut ws = Workspace::new();
    let block = ws.make_block(BlockType::ControlsIf);
    ws.reshape_if(block, 3, true);

    let names: Vec<&str> = ws
        .block(block)
        .inputs
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, vec!["IF0", "DO0", "IF1", "DO1", "IF2", "DO2", "ELSE"]);
    let mutation = ws.block(block).mutation.unwrap();
    assert_eq!(mutation.else_if_count, 2);
    assert!(mutation.has_else);
}

#[test]
fn test_events_record_when_enabled() {
    let mut ws = Workspace::new();
    let id = ws.make_block(BlockType::MathNumber);
    let events = ws.events().take();
    assert_eq!(events, vec![ChangeEvent::BlockCreated(id)]);
}

#[test]
fn test_events_guard_suppresses_and_restores() {
    let mut ws = Workspace::new();
    let stream = ws.events().clone();
    {
        let _guard = stream.disable();
        ws.make_block(BlockType::MathNumber);
        assert!(stream.is_empty());
    }
    ws.make_block(BlockType::MathNumber);
    assert_eq!(stream.len(), 1);
}

#[test]
fn test_events_guard_nests() {
    let ws = Workspace::new();
    let stream = ws.events().clone();
    let outer = stream.disable();
    {
        let _inner = stream.disable();
    }
    assert!(!stream.enabled());
    drop(outer);
    assert!(stream.enabled());
}

#[test]
fn test_clear_resets_ids() {
    let mut ws = Workspace::new();
    ws.make_block(BlockType::MathNumber);
    ws.create_variable("count");
    ws.clear();
    assert!(ws.is_empty());
    assert!(ws.variables().is_empty());
    let id = ws.make_block(BlockType::MathNumber);
    assert_eq!(id.to_string(), "b1");
}
