//! Convenience re-exports for the common decompile-and-serialize flow.

pub use crate::ast::{Expr, SourceFile, Stmt, StmtKind};
pub use crate::codegen::workspace_to_code;
pub use crate::decompiler::{decompile, decompile_source};
pub use crate::error::{ConnectionError, DecompileError, ParseError};
pub use crate::parser::parse_source;
pub use crate::serializer::workspace_to_xml;
pub use crate::workspace::{
    Block, BlockId, BlockType, ChangeEvent, DisplayBlock, ValueType, Variable, VariableId,
    Workspace,
};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
