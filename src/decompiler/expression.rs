//! The Expression Builder: value-producing AST nodes into value blocks.

use tracing::{debug, warn};

use super::{Decompiler, registry};
use crate::ast::{BinaryOp, Expr};
use crate::workspace::{BlockId, BlockType};

impl<'a> Decompiler<'a> {
    /// Builds a value block for an expression, or reports the node as
    /// unsupported and produces nothing. Never aborts the traversal.
    pub(super) fn build_value(&mut self, expr: &Expr) -> Option<BlockId> {
        match expr {
            Expr::Binary { op, left, right } => Some(self.build_binary_expression(*op, left, right)),
            Expr::Str(text) => {
                let block = self.workspace.make_block(BlockType::Text);
                self.workspace.set_shadow(block, true);
                self.workspace.set_field(block, "TEXT", text);
                Some(block)
            }
            Expr::Number(text) => {
                let block = self.workspace.make_block(BlockType::MathNumber);
                self.workspace.set_shadow(block, true);
                self.workspace.set_field(block, "NUM", text);
                Some(block)
            }
            Expr::Bool(value) => {
                let block = self.workspace.make_block(BlockType::LogicBoolean);
                self.workspace.set_shadow(block, true);
                self.workspace
                    .set_field(block, "BOOL", if *value { "TRUE" } else { "FALSE" });
                Some(block)
            }
            Expr::Ident(name) => Some(self.build_variable_get(name)),
            Expr::Call { callee, args } => self.build_call(callee, args),
            other => {
                warn!("Unknown token {}", other.kind_name());
                None
            }
        }
    }

    /// The operator table: token kind to logic/compare/arithmetic block.
    fn build_binary_expression(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> BlockId {
        let (block_type, operator) = match op {
            BinaryOp::And => (BlockType::LogicOperation, "AND"),
            BinaryOp::Or => (BlockType::LogicOperation, "OR"),
            BinaryOp::EqEq | BinaryOp::EqEqEq => (BlockType::LogicCompare, "EQ"),
            BinaryOp::NotEq | BinaryOp::NotEqEq => (BlockType::LogicCompare, "NEQ"),
            BinaryOp::Lt => (BlockType::LogicCompare, "LT"),
            BinaryOp::LtEq => (BlockType::LogicCompare, "LTE"),
            BinaryOp::Gt => (BlockType::LogicCompare, "GT"),
            BinaryOp::GtEq => (BlockType::LogicCompare, "GTE"),
            BinaryOp::Plus => (BlockType::MathArithmetic, "ADD"),
            BinaryOp::Minus => (BlockType::MathArithmetic, "MINUS"),
            BinaryOp::Slash => (BlockType::MathArithmetic, "DIVIDE"),
            BinaryOp::Star => (BlockType::MathArithmetic, "MULTIPLY"),
            BinaryOp::Caret => (BlockType::MathArithmetic, "POWER"),
        };

        let block = self.workspace.make_block(block_type);
        self.workspace.set_field(block, "OP", operator);

        if let Some(child) = self.build_value(left) {
            self.attach_value(block, "A", child);
        }
        if let Some(child) = self.build_value(right) {
            self.attach_value(block, "B", child);
        }
        block
    }

    /// A bare identifier reads a variable; first reference creates it.
    fn build_variable_get(&mut self, name: &str) -> BlockId {
        let block = self.workspace.make_block(BlockType::VariablesGet);
        let variable = self.workspace.create_variable(name);
        self.workspace.set_variable_field(block, "VAR", variable);
        block
    }

    /// Dispatches a call expression: `Math.*` recognizer first, then the
    /// registry of known qualified calls. Unmatched calls produce nothing.
    pub(super) fn build_call(&mut self, callee: &Expr, args: &[Expr]) -> Option<BlockId> {
        if let Some((namespace, method)) = callee.qualified_callee() {
            if namespace == "Math"
                && let Some(block) = self.build_math_call(method, args)
            {
                return Some(block);
            }

            let qualified = format!("{namespace}.{method}");
            if let Some(descriptor) = registry::lookup(&qualified) {
                let block = self
                    .workspace
                    .make_block(BlockType::Custom(descriptor.block_type.to_string()));
                return Some(block);
            }
            debug!("no registered block for call '{qualified}'");
        }
        None
    }
}
