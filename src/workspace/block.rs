use super::shape::{BlockType, InputKind, ValueType};
use super::{BlockId, VariableId};

/// A named literal value on a block. `VAR` fields additionally reference the
/// workspace variable they name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub variable: Option<VariableId>,
}

/// An input slot holding at most one child block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: String,
    pub kind: InputKind,
    pub child: Option<BlockId>,
}

/// Extra shape data for `controls_if`: how many `else if` branches and whether
/// an `else` slot exists. Serialized as the block's mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfMutation {
    pub else_if_count: usize,
    pub has_else: bool,
}

/// A single visual program block.
///
/// Connectivity is stored as ids into the owning [`Workspace`](super::Workspace):
/// `previous`/`next` form the statement chain, `parent` points at the block
/// whose input slot holds this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub block_type: BlockType,
    pub shadow: bool,
    pub fields: Vec<Field>,
    pub inputs: Vec<Input>,
    pub output: Option<ValueType>,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous: Option<BlockId>,
    pub next: Option<BlockId>,
    pub parent: Option<BlockId>,
    pub mutation: Option<IfMutation>,
}

impl Block {
    pub(super) fn new(id: BlockId, block_type: BlockType) -> Self {
        let shape = block_type.shape();
        Self {
            id,
            block_type,
            shadow: false,
            fields: shape
                .default_fields
                .iter()
                .map(|(name, value)| Field {
                    name: (*name).to_string(),
                    value: (*value).to_string(),
                    variable: None,
                })
                .collect(),
            inputs: shape
                .inputs
                .iter()
                .map(|(name, kind)| Input {
                    name: (*name).to_string(),
                    kind: *kind,
                    child: None,
                })
                .collect(),
            output: shape.output,
            has_previous: shape.has_previous,
            has_next: shape.has_next,
            previous: None,
            next: None,
            parent: None,
            mutation: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.iter().find(|i| i.name == name)
    }

    pub(super) fn input_mut(&mut self, name: &str) -> Option<&mut Input> {
        self.inputs.iter_mut().find(|i| i.name == name)
    }

    /// The child connected to the named input, if any.
    pub fn input_child(&self, name: &str) -> Option<BlockId> {
        self.input(name).and_then(|i| i.child)
    }

    /// A top block starts a chain: nothing holds it and nothing precedes it.
    pub fn is_top(&self) -> bool {
        self.parent.is_none() && self.previous.is_none()
    }

    pub(super) fn set_field(&mut self, name: &str, value: &str, variable: Option<VariableId>) {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.to_string();
                field.variable = variable;
            }
            None => self.fields.push(Field {
                name: name.to_string(),
                value: value.to_string(),
                variable,
            }),
        }
    }
}
