//! The block-graph container the decompiler builds into.
//!
//! A [`Workspace`] owns every block and variable created during a decompile
//! pass. Blocks reference each other by id; connectivity is mediated by the
//! typed connect operations here, which enforce the connection discipline: a
//! value input accepts one child of a compatible [`ValueType`], and
//! previous/next links form a singly linked chain. Callers may clear and
//! reuse a workspace across passes.

pub mod block;
pub mod display;
pub mod events;
pub mod shape;

pub use block::{Block, Field, IfMutation, Input};
pub use display::DisplayBlock;
pub use events::{ChangeEvent, EventStream, EventsGuard};
pub use shape::{BlockType, InputKind, ValueType};

use ahash::AHashMap;
use std::fmt;

use crate::error::ConnectionError;

/// Identifier of a block within one workspace. Sequential, so serialized
/// output is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// Identifier of a workspace variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(u32);

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A named variable, deduplicated per workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct Workspace {
    blocks: AHashMap<BlockId, Block>,
    /// Creation order; drives top-block iteration and serialization.
    order: Vec<BlockId>,
    variables: Vec<Variable>,
    variable_ids: AHashMap<String, VariableId>,
    events: EventStream,
    next_block: u32,
    next_variable: u32,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &EventStream {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[&id]
    }

    fn block_mut(&mut self, id: BlockId) -> &mut Block {
        self.blocks.get_mut(&id).expect("stale block id")
    }

    /// All blocks in creation order.
    pub fn blocks_in_order(&self) -> impl Iterator<Item = &Block> {
        self.order.iter().map(|id| &self.blocks[id])
    }

    /// Chain heads in creation order: blocks with no parent and no predecessor.
    pub fn top_blocks(&self) -> Vec<BlockId> {
        self.order
            .iter()
            .filter(|id| self.blocks[*id].is_top())
            .copied()
            .collect()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0 as usize - 1]
    }

    /// Removes all blocks and variables. The event stream (and any active
    /// disable guard) is untouched.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.order.clear();
        self.variables.clear();
        self.variable_ids.clear();
        self.next_block = 0;
        self.next_variable = 0;
    }

    pub fn make_block(&mut self, block_type: BlockType) -> BlockId {
        self.next_block += 1;
        let id = BlockId(self.next_block);
        self.blocks.insert(id, Block::new(id, block_type));
        self.order.push(id);
        self.events.record(ChangeEvent::BlockCreated(id));
        id
    }

    /// Returns the variable named `name`, creating it on first reference.
    pub fn create_variable(&mut self, name: &str) -> VariableId {
        if let Some(id) = self.variable_ids.get(name) {
            return *id;
        }
        self.next_variable += 1;
        let id = VariableId(self.next_variable);
        self.variables.push(Variable {
            id,
            name: name.to_string(),
        });
        self.variable_ids.insert(name.to_string(), id);
        self.events.record(ChangeEvent::VariableCreated(id));
        id
    }

    pub fn set_field(&mut self, id: BlockId, name: &str, value: &str) {
        self.block_mut(id).set_field(name, value, None);
    }

    /// Sets a variable field: the field value is the variable's name, the
    /// field keeps the variable's identity for serialization.
    pub fn set_variable_field(&mut self, id: BlockId, name: &str, variable: VariableId) {
        let var_name = self.variable(variable).name.clone();
        self.block_mut(id).set_field(name, &var_name, Some(variable));
    }

    pub fn set_shadow(&mut self, id: BlockId, shadow: bool) {
        self.block_mut(id).shadow = shadow;
    }

    /// Resizes a `controls_if` block to `branch_count` condition/body pairs
    /// (`IF0`/`DO0` ..) plus an optional `ELSE` slot, and records the mutation.
    pub fn reshape_if(&mut self, id: BlockId, branch_count: usize, has_else: bool) {
        let block = self.block_mut(id);
        debug_assert_eq!(block.block_type, BlockType::ControlsIf);
        debug_assert!(block.inputs.iter().all(|i| i.child.is_none()));

        let mut inputs = Vec::with_capacity(branch_count * 2 + usize::from(has_else));
        for i in 0..branch_count {
            inputs.push(Input {
                name: format!("IF{i}"),
                kind: InputKind::Value(ValueType::Boolean),
                child: None,
            });
            inputs.push(Input {
                name: format!("DO{i}"),
                kind: InputKind::Statement,
                child: None,
            });
        }
        if has_else {
            inputs.push(Input {
                name: "ELSE".to_string(),
                kind: InputKind::Statement,
                child: None,
            });
        }
        block.inputs = inputs;
        block.mutation = Some(IfMutation {
            else_if_count: branch_count.saturating_sub(1),
            has_else,
        });
    }

    /// Attaches `child`'s output to the named value input of `parent`.
    pub fn connect_value(
        &mut self,
        parent: BlockId,
        input_name: &str,
        child: BlockId,
    ) -> Result<(), ConnectionError> {
        let (parent_type, input_kind, occupied) = {
            let p = self.block(parent);
            let input = p.input(input_name).ok_or_else(|| {
                ConnectionError::MissingInput {
                    block_type: p.block_type.name().to_string(),
                    input: input_name.to_string(),
                }
            })?;
            (
                p.block_type.name().to_string(),
                input.kind,
                input.child.is_some(),
            )
        };

        let c = self.block(child);
        let child_type = c.block_type.name().to_string();
        let reject = |reason: &str| ConnectionError::Rejected {
            block_type: parent_type.clone(),
            input: input_name.to_string(),
            child_type: child_type.clone(),
            reason: reason.to_string(),
        };

        let InputKind::Value(accepted) = input_kind else {
            return Err(reject("value connection into a statement input"));
        };
        let Some(output) = c.output else {
            return Err(reject("child has no output connection"));
        };
        if !accepted.accepts(output) {
            return Err(reject(&format!(
                "input accepts {accepted}, child produces {output}"
            )));
        }
        if occupied {
            return Err(reject("input already holds a child"));
        }
        if c.parent.is_some() || c.previous.is_some() {
            return Err(reject("child is already attached"));
        }

        if let Some(input) = self.block_mut(parent).input_mut(input_name) {
            input.child = Some(child);
        }
        self.block_mut(child).parent = Some(parent);
        self.events.record(ChangeEvent::Connected { parent, child });
        Ok(())
    }

    /// Attaches `child`'s previous-connection to the named statement input of
    /// `parent`. `child` may already head a next-chain.
    pub fn connect_statement(
        &mut self,
        parent: BlockId,
        input_name: &str,
        child: BlockId,
    ) -> Result<(), ConnectionError> {
        let (parent_type, input_kind, occupied) = {
            let p = self.block(parent);
            let input = p.input(input_name).ok_or_else(|| {
                ConnectionError::MissingInput {
                    block_type: p.block_type.name().to_string(),
                    input: input_name.to_string(),
                }
            })?;
            (
                p.block_type.name().to_string(),
                input.kind,
                input.child.is_some(),
            )
        };

        let c = self.block(child);
        let child_type = c.block_type.name().to_string();
        let reject = |reason: &str| ConnectionError::Rejected {
            block_type: parent_type.clone(),
            input: input_name.to_string(),
            child_type: child_type.clone(),
            reason: reason.to_string(),
        };

        if input_kind != InputKind::Statement {
            return Err(reject("statement connection into a value input"));
        }
        if !c.has_previous {
            return Err(reject("child has no previous connection"));
        }
        if occupied {
            return Err(reject("input already holds a child"));
        }
        if c.parent.is_some() || c.previous.is_some() {
            return Err(reject("child is already attached"));
        }

        if let Some(input) = self.block_mut(parent).input_mut(input_name) {
            input.child = Some(child);
        }
        self.block_mut(child).parent = Some(parent);
        self.events.record(ChangeEvent::Connected { parent, child });
        Ok(())
    }

    /// True when `previous.next` may connect to `next.previous`.
    pub fn can_chain(&self, previous: BlockId, next: BlockId) -> bool {
        let p = self.block(previous);
        let n = self.block(next);
        p.has_next
            && p.next.is_none()
            && n.has_previous
            && n.previous.is_none()
            && n.parent.is_none()
    }

    /// Links two statement blocks into a chain.
    pub fn connect_next(
        &mut self,
        previous: BlockId,
        next: BlockId,
    ) -> Result<(), ConnectionError> {
        if !self.can_chain(previous, next) {
            return Err(ConnectionError::ChainRejected {
                first: self.block(previous).block_type.name().to_string(),
                second: self.block(next).block_type.name().to_string(),
                reason: "a connection end is missing or already occupied".to_string(),
            });
        }
        self.block_mut(previous).next = Some(next);
        self.block_mut(next).previous = Some(previous);
        self.events.record(ChangeEvent::Chained { previous, next });
        Ok(())
    }

    /// Removes a block together with its input children and its next-chain,
    /// detaching it from whatever held it. Disposing an unknown id is a no-op.
    pub fn dispose(&mut self, id: BlockId) {
        if !self.contains(id) {
            return;
        }

        // Detach from the outside first.
        let (parent, previous) = {
            let b = self.block(id);
            (b.parent, b.previous)
        };
        if let Some(pid) = parent
            && let Some(input) = self
                .block_mut(pid)
                .inputs
                .iter_mut()
                .find(|i| i.child == Some(id))
        {
            input.child = None;
        }
        if let Some(prev) = previous {
            self.block_mut(prev).next = None;
        }

        // Collect the whole subtree: input children plus the next-chain.
        let mut doomed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            doomed.push(current);
            let b = self.block(current);
            stack.extend(b.inputs.iter().filter_map(|i| i.child));
            if let Some(next) = b.next {
                stack.push(next);
            }
        }

        for id in doomed {
            self.blocks.remove(&id);
            self.order.retain(|o| *o != id);
            self.events.record(ChangeEvent::BlockDisposed(id));
        }
    }
}
