//! The Control-Flow Shaper: `if`/`while`/`for` statements into their
//! control blocks.

use tracing::warn;

use super::Decompiler;
use crate::ast::{AssignOp, Expr, ForInit, ForStmt, IfStmt, PostfixOp, Stmt, StmtKind};
use crate::workspace::{BlockId, BlockType};

/// An `if`/`else if`/.../`else` cascade with the nesting flattened away:
/// condition/body pairs in source order, plus the trailing `else` body.
struct FlatIf<'s> {
    branches: Vec<(&'s Expr, &'s Stmt)>,
    else_branch: Option<&'s Stmt>,
}

/// Walks an else-if chain iteratively. An `else` whose body is another `if`
/// becomes a further branch; anything else terminates the cascade.
fn flatten_if(if_stmt: &IfStmt) -> FlatIf<'_> {
    let mut branches = vec![(&if_stmt.condition, if_stmt.then_branch.as_ref())];
    let mut else_branch = if_stmt.else_branch.as_deref();

    while let Some(stmt) = else_branch {
        let StmtKind::If(nested) = &stmt.kind else {
            break;
        };
        branches.push((&nested.condition, nested.then_branch.as_ref()));
        else_branch = nested.else_branch.as_deref();
    }

    FlatIf {
        branches,
        else_branch,
    }
}

impl<'a> Decompiler<'a> {
    /// Builds a `controls_if` block, reshaped to exactly the cascade's
    /// condition/body pair count.
    pub(super) fn build_if(&mut self, if_stmt: &IfStmt) -> Option<BlockId> {
        let flat = flatten_if(if_stmt);

        let block = self.workspace.make_block(BlockType::ControlsIf);
        self.workspace
            .reshape_if(block, flat.branches.len(), flat.else_branch.is_some());

        for (i, (condition, body)) in flat.branches.iter().enumerate() {
            if let Some(child) = self.build_value(condition) {
                self.attach_value(block, &format!("IF{i}"), child);
            }
            if let Some(chain) = self.build_statement(body) {
                self.attach_statement(block, &format!("DO{i}"), chain.first);
            }
        }
        if let Some(body) = flat.else_branch
            && let Some(chain) = self.build_statement(body)
        {
            self.attach_statement(block, "ELSE", chain.first);
        }
        Some(block)
    }

    pub(super) fn build_while(&mut self, condition: &Expr, body: &Stmt) -> Option<BlockId> {
        let block = self.workspace.make_block(BlockType::ControlsWhileUntil);
        if let Some(child) = self.build_value(condition) {
            self.attach_value(block, "BOOL", child);
        }
        if let Some(chain) = self.build_statement(body) {
            self.attach_statement(block, "DO", chain.first);
        }
        Some(block)
    }

    /// Builds a counted `controls_for` from a C-style for loop. Only the
    /// canonical header shape is recognized: an initializer binding one
    /// variable, a binary condition on it, and an update stepping it.
    pub(super) fn build_for(&mut self, for_stmt: &ForStmt) -> Option<BlockId> {
        let Some((name, from)) = for_header_binding(for_stmt.init.as_ref()) else {
            warn!("for loop initializer is not a single variable binding");
            return None;
        };

        let block = self.workspace.make_block(BlockType::ControlsFor);
        let variable = self.workspace.create_variable(name);
        self.workspace.set_variable_field(block, "VAR", variable);

        self.build_for_step(block, for_stmt.update.as_ref());
        self.build_for_bound(block, "FROM", from);
        // The comparison operator of the condition is not inspected; the
        // right-hand side alone becomes the TO bound.
        if let Some(Expr::Binary { right, .. }) = for_stmt.condition.as_ref()
            && let Some(child) = self.build_value(right)
        {
            self.attach_value(block, "TO", child);
        }
        if let Some(chain) = self.build_statement(&for_stmt.body) {
            self.attach_statement(block, "DO", chain.first);
        }
        Some(block)
    }

    /// The BY input: `v++` and `v--` become constant shadow steps, `v += e`
    /// passes the delta through, `v -= e` wraps it in a negation block.
    fn build_for_step(&mut self, block: BlockId, update: Option<&Expr>) {
        match update {
            Some(Expr::Postfix { op, .. }) => {
                let step = self.workspace.make_block(BlockType::MathNumber);
                self.workspace.set_shadow(step, true);
                let delta = match op {
                    PostfixOp::Increment => "1",
                    PostfixOp::Decrement => "-1",
                };
                self.workspace.set_field(step, "NUM", delta);
                self.attach_value(block, "BY", step);
            }
            Some(Expr::Assign { op, value, .. }) => {
                let Some(child) = self.build_value(value) else {
                    return;
                };
                let step = match op {
                    AssignOp::SubAssign => {
                        let negate = self.workspace.make_block(BlockType::MathSingle);
                        self.workspace.set_field(negate, "OP", "NEG");
                        self.attach_value(negate, "NUM", child);
                        negate
                    }
                    _ => child,
                };
                self.attach_value(block, "BY", step);
            }
            other => {
                if let Some(expr) = other {
                    warn!("Unknown for loop update: {}", expr.kind_name());
                }
            }
        }
    }

    /// FROM is always a shadow number so the slot renders filled; only a
    /// literal initializer contributes its value.
    fn build_for_bound(&mut self, block: BlockId, input: &str, from: Option<&Expr>) {
        let shadow = self.workspace.make_block(BlockType::MathNumber);
        self.workspace.set_shadow(shadow, true);
        if let Some(Expr::Number(text)) = from {
            self.workspace.set_field(shadow, "NUM", text);
        }
        self.attach_value(block, input, shadow);
    }
}

/// Extracts the loop variable and its initial value from the for header:
/// either `var v = e` (first declarator) or a plain `v = e` assignment.
fn for_header_binding(init: Option<&ForInit>) -> Option<(&str, Option<&Expr>)> {
    match init? {
        ForInit::VarDecl(declarators) => {
            let first = declarators.first()?;
            Some((&first.name, first.init.as_ref()))
        }
        ForInit::Expr(Expr::Assign {
            op: AssignOp::Assign,
            target,
            value,
        }) => {
            let Expr::Ident(name) = target.as_ref() else {
                return None;
            };
            Some((name, Some(value)))
        }
        ForInit::Expr(_) => None,
    }
}
