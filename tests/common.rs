//! Common test utilities for decompiling snippets and inspecting the result.
use bunkai::prelude::*;

/// Decompiles `code` into a fresh workspace, panicking on parse failure.
#[allow(dead_code)]
pub fn decompile_ok(code: &str) -> Workspace {
    let mut workspace = Workspace::new();
    decompile(&mut workspace, code).expect("snippet should parse");
    workspace
}

/// All blocks of the given serialized type name, in creation order.
#[allow(dead_code)]
pub fn blocks_of_type<'w>(workspace: &'w Workspace, name: &str) -> Vec<&'w Block> {
    workspace
        .blocks_in_order()
        .filter(|b| b.block_type.name() == name)
        .collect()
}

/// The single block of the given type; panics when there are zero or many.
#[allow(dead_code)]
pub fn only_block_of_type<'w>(workspace: &'w Workspace, name: &str) -> &'w Block {
    let blocks = blocks_of_type(workspace, name);
    assert_eq!(blocks.len(), 1, "expected exactly one '{name}' block");
    blocks[0]
}
