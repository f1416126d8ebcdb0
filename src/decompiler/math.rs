//! Recognizer for `Math.<method>` call expressions.

use tracing::debug;

use super::Decompiler;
use crate::ast::Expr;
use crate::workspace::{BlockId, BlockType};

/// Maps a `Math` method name to its block type and operator code. Returns
/// `None` for methods outside the table, letting the call fall through to the
/// registry.
fn math_operator(method: &str) -> Option<(BlockType, &'static str)> {
    let mapping = match method {
        "floor" => (BlockType::MathRound, "ROUNDDOWN"),
        "ceil" => (BlockType::MathRound, "ROUNDUP"),
        "round" => (BlockType::MathRound, "ROUND"),

        "sqrt" => (BlockType::MathSingle, "ROOT"),
        "exp" => (BlockType::MathSingle, "EXP"),
        "abs" => (BlockType::MathSingle, "ABS"),
        "pow" => (BlockType::MathSingle, "POW10"),
        // Maps to LOG10, not LN. Pinned by a regression test; editors built
        // against this output depend on it.
        "log" => (BlockType::MathSingle, "LOG10"),

        "asin" => (BlockType::MathTrig, "ASIN"),
        "acos" => (BlockType::MathTrig, "ACOS"),
        "atan" => (BlockType::MathTrig, "ATAN"),
        "sin" => (BlockType::MathTrig, "SIN"),
        "cos" => (BlockType::MathTrig, "COS"),
        "tan" => (BlockType::MathTrig, "TAN"),
        _ => return None,
    };
    Some(mapping)
}

impl<'a> Decompiler<'a> {
    /// Builds a rounding/unary/trig block for `Math.<method>(arg)`, attaching
    /// the decompiled first argument to the NUM input.
    pub(super) fn build_math_call(&mut self, method: &str, args: &[Expr]) -> Option<BlockId> {
        let (block_type, operator) = math_operator(method)?;
        let block = self.workspace.make_block(block_type);
        self.workspace.set_field(block, "OP", operator);

        if let Some(argument) = args.first() {
            if let Some(child) = self.build_value(argument) {
                self.attach_value(block, "NUM", child);
            }
        } else {
            debug!("Math.{method} called without arguments");
        }

        Some(block)
    }
}
