//! Code generation: a workspace back into source text.
//!
//! The output is canonical, not a reproduction of the input: one statement per
//! line, two-space indentation, `var` bindings for `variables_set`. Feeding the
//! result back through the decompiler yields an equivalent workspace, which is
//! how the fixture tests check both directions at once.

use crate::decompiler::registry;
use crate::workspace::{Block, BlockId, BlockType, Workspace};

/// Generates canonical source for every top-level chain in creation order.
pub fn workspace_to_code(workspace: &Workspace) -> String {
    let mut generator = CodeGenerator {
        workspace,
        lines: Vec::new(),
    };
    for id in workspace.top_blocks() {
        generator.emit_chain(id, 0);
    }
    let mut code = generator.lines.join("\n");
    if !code.is_empty() {
        code.push('\n');
    }
    code
}

struct CodeGenerator<'a> {
    workspace: &'a Workspace,
    lines: Vec<String>,
}

impl<'a> CodeGenerator<'a> {
    fn emit_chain(&mut self, head: BlockId, depth: usize) {
        let mut current = Some(head);
        while let Some(id) = current {
            self.emit_statement(id, depth);
            current = self.workspace.block(id).next;
        }
    }

    fn emit_statement(&mut self, id: BlockId, depth: usize) {
        let block = self.workspace.block(id);
        let pad = "  ".repeat(depth);
        match &block.block_type {
            BlockType::VariablesSet => {
                let name = block.field_value("VAR").unwrap_or("item");
                let value = self.value_or(block, "VALUE", "0");
                self.lines.push(format!("{pad}var {name} = {value};"));
            }
            BlockType::MathChange => {
                let name = block.field_value("VAR").unwrap_or("item");
                let delta = self.value_or(block, "DELTA", "1");
                self.lines.push(format!("{pad}{name} += {delta};"));
            }
            BlockType::ControlsWhileUntil => {
                let condition = self.value_or(block, "BOOL", "false");
                self.lines.push(format!("{pad}while ({condition}) {{"));
                self.emit_body(block, "DO", depth);
                self.lines.push(format!("{pad}}}"));
            }
            BlockType::ControlsFor => {
                let name = block.field_value("VAR").unwrap_or("i");
                let from = self.value_or(block, "FROM", "0");
                let to = self.value_or(block, "TO", "0");
                let by = self.value_or(block, "BY", "1");
                self.lines.push(format!(
                    "{pad}for ({name} = {from}; {name} <= {to}; {name} += {by}) {{"
                ));
                self.emit_body(block, "DO", depth);
                self.lines.push(format!("{pad}}}"));
            }
            BlockType::ControlsIf => self.emit_if(block, depth),
            BlockType::Custom(block_type) => {
                if let Some(descriptor) = registry::lookup_block_type(block_type) {
                    self.lines
                        .push(format!("{pad}{}();", descriptor.qualified_name));
                }
            }
            // A value block sitting at statement position becomes a bare
            // expression statement.
            _ => {
                let expr = self.emit_value(id);
                self.lines.push(format!("{pad}{expr};"));
            }
        }
    }

    fn emit_if(&mut self, block: &Block, depth: usize) {
        let pad = "  ".repeat(depth);
        let branch_count = block
            .mutation
            .map(|m| m.else_if_count + 1)
            .unwrap_or(1);
        for i in 0..branch_count {
            let condition = self.value_or(block, &format!("IF{i}"), "false");
            let opener = if i == 0 { "if" } else { "} else if" };
            self.lines.push(format!("{pad}{opener} ({condition}) {{"));
            self.emit_body(block, &format!("DO{i}"), depth);
        }
        if block.mutation.is_some_and(|m| m.has_else) {
            self.lines.push(format!("{pad}}} else {{"));
            self.emit_body(block, "ELSE", depth);
        }
        self.lines.push(format!("{pad}}}"));
    }

    fn emit_body(&mut self, block: &Block, input: &str, depth: usize) {
        if let Some(child) = block.input_child(input) {
            self.emit_chain(child, depth + 1);
        }
    }

    fn value_or(&self, block: &Block, input: &str, default: &str) -> String {
        match block.input_child(input) {
            Some(child) => self.emit_value(child),
            None => default.to_string(),
        }
    }

    fn emit_value(&self, id: BlockId) -> String {
        let block = self.workspace.block(id);
        match &block.block_type {
            BlockType::MathNumber => block.field_value("NUM").unwrap_or("0").to_string(),
            BlockType::Text => format!("'{}'", block.field_value("TEXT").unwrap_or("")),
            BlockType::LogicBoolean => {
                if block.field_value("BOOL") == Some("TRUE") {
                    "true".to_string()
                } else {
                    "false".to_string()
                }
            }
            BlockType::VariablesGet => block.field_value("VAR").unwrap_or("item").to_string(),
            BlockType::LogicOperation => {
                let op = if block.field_value("OP") == Some("OR") {
                    "||"
                } else {
                    "&&"
                };
                self.emit_binary(block, op, "false")
            }
            BlockType::LogicCompare => {
                let op = match block.field_value("OP") {
                    Some("NEQ") => "!=",
                    Some("LT") => "<",
                    Some("LTE") => "<=",
                    Some("GT") => ">",
                    Some("GTE") => ">=",
                    _ => "==",
                };
                self.emit_binary(block, op, "0")
            }
            BlockType::MathArithmetic => {
                let op = match block.field_value("OP") {
                    Some("MINUS") => "-",
                    Some("MULTIPLY") => "*",
                    Some("DIVIDE") => "/",
                    Some("POWER") => "^",
                    _ => "+",
                };
                self.emit_binary(block, op, "0")
            }
            BlockType::MathSingle => {
                let argument = self.value_or(block, "NUM", "0");
                match block.field_value("OP") {
                    Some("NEG") => format!("-{argument}"),
                    Some("EXP") => format!("Math.exp({argument})"),
                    Some("ABS") => format!("Math.abs({argument})"),
                    Some("POW10") => format!("Math.pow({argument})"),
                    Some("LN") | Some("LOG10") => format!("Math.log({argument})"),
                    _ => format!("Math.sqrt({argument})"),
                }
            }
            BlockType::MathRound => {
                let argument = self.value_or(block, "NUM", "0");
                match block.field_value("OP") {
                    Some("ROUNDDOWN") => format!("Math.floor({argument})"),
                    Some("ROUNDUP") => format!("Math.ceil({argument})"),
                    _ => format!("Math.round({argument})"),
                }
            }
            BlockType::MathTrig => {
                let argument = self.value_or(block, "NUM", "0");
                let method = block.field_value("OP").unwrap_or("SIN").to_lowercase();
                format!("Math.{method}({argument})")
            }
            _ => "0".to_string(),
        }
    }

    fn emit_binary(&self, block: &Block, op: &str, default: &str) -> String {
        let left = self.value_or(block, "A", default);
        let right = self.value_or(block, "B", default);
        format!("{left} {op} {right}")
    }
}
