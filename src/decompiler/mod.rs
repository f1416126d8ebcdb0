//! Single-pass decompilation of parsed source into a block workspace.
//!
//! The pass walks the top-level statement list once. Each statement becomes a
//! chain of blocks; chains on the same source line are stacked together, a
//! line break leaves them as separate top-level chains. Nothing here aborts on
//! an unsupported node: the offender is logged and skipped, and its would-be
//! children are disposed, so one bad construct costs at most one gap in the
//! output.

mod control_flow;
mod expression;
mod math;
pub mod registry;
mod statement;

use tracing::warn;

use crate::ast::{SourceFile, Stmt};
use crate::error::DecompileError;
use crate::parser::parse_source;
use crate::workspace::{BlockId, Workspace};

/// Both endpoints of a freshly built statement chain. Stacking continues from
/// `last`; attachment into a statement input goes through `first`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockChain {
    pub first: BlockId,
    pub last: BlockId,
}

impl BlockChain {
    fn single(id: BlockId) -> Self {
        Self { first: id, last: id }
    }
}

/// Parses `code` and decompiles it into `workspace`.
///
/// Only a parse failure is an error. Unsupported constructs inside an
/// otherwise parsable file degrade to warnings.
pub fn decompile(workspace: &mut Workspace, code: &str) -> Result<(), DecompileError> {
    let source = parse_source(code)?;
    decompile_source(workspace, &source);
    Ok(())
}

/// Decompiles an already parsed file. Change events are suppressed for the
/// duration of the pass.
pub fn decompile_source(workspace: &mut Workspace, source: &SourceFile) {
    let events = workspace.events().clone();
    let _guard = events.disable();
    Decompiler { workspace, source }.run();
}

struct Decompiler<'a> {
    workspace: &'a mut Workspace,
    source: &'a SourceFile,
}

impl<'a> Decompiler<'a> {
    /// The Top-Level Sequencer: builds every top-level statement and stacks
    /// consecutive ones that share a source line.
    fn run(&mut self) {
        let source = self.source;
        let mut previous_chain: Option<BlockChain> = None;
        for stmt in &source.statements {
            let connect = previous_chain.is_some() && self.on_same_line(stmt);
            let chain = self.build_statement(stmt);
            if connect
                && let (Some(previous), Some(current)) = (previous_chain, chain)
                && self.workspace.can_chain(previous.last, current.first)
                && let Err(err) = self.workspace.connect_next(previous.last, current.first)
            {
                warn!("{err}");
            }
            // Always reassign, so a statement that produced nothing breaks
            // the chain instead of bridging its neighbors.
            previous_chain = chain;
        }
    }

    /// True when nothing but horizontal text separates this statement from
    /// what came before it. Leading comments count as part of the statement.
    fn on_same_line(&self, stmt: &Stmt) -> bool {
        match self.source.preceding_char(stmt.effective_start) {
            Some(c) => c != '\n',
            None => false,
        }
    }

    /// Connects a value child, or logs the rejection and disposes the orphan.
    fn attach_value(&mut self, parent: BlockId, input: &str, child: BlockId) -> bool {
        match self.workspace.connect_value(parent, input, child) {
            Ok(()) => true,
            Err(err) => {
                warn!("{err}");
                self.workspace.dispose(child);
                false
            }
        }
    }

    /// Connects a statement child, or logs the rejection and disposes it.
    fn attach_statement(&mut self, parent: BlockId, input: &str, child: BlockId) -> bool {
        match self.workspace.connect_statement(parent, input, child) {
            Ok(()) => true,
            Err(err) => {
                warn!("{err}");
                self.workspace.dispose(child);
                false
            }
        }
    }
}
