//! Static registry of qualified call names that decompile to bare statement
//! blocks. Consulted after the `Math.*` recognizer fails to claim a call.

/// Maps one qualified callee (`namespace.method`) to its statement block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeTypeDescriptor {
    pub qualified_name: &'static str,
    pub block_type: &'static str,
}

const CALL_STATEMENTS: &[NodeTypeDescriptor] = &[
    NodeTypeDescriptor {
        qualified_name: "console.log",
        block_type: "text_print",
    },
    NodeTypeDescriptor {
        qualified_name: "window.alert",
        block_type: "text_alert",
    },
];

/// Looks up the block type for a qualified call name.
pub fn lookup(qualified_name: &str) -> Option<&'static NodeTypeDescriptor> {
    CALL_STATEMENTS
        .iter()
        .find(|d| d.qualified_name == qualified_name)
}

/// Reverse lookup used by code generation.
pub fn lookup_block_type(block_type: &str) -> Option<&'static NodeTypeDescriptor> {
    CALL_STATEMENTS.iter().find(|d| d.block_type == block_type)
}
