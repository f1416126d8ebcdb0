use std::fmt;

/// The type discipline on the value axis. A value connection is accepted when
/// either side is `Any` or both sides agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Any,
}

impl ValueType {
    pub fn accepts(self, other: ValueType) -> bool {
        self == ValueType::Any || other == ValueType::Any || self == other
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Number => "Number",
            ValueType::String => "String",
            ValueType::Boolean => "Boolean",
            ValueType::Any => "Any",
        })
    }
}

/// What an input slot holds: a value child (output→input) or a nested
/// statement chain (previous↔statement input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Value(ValueType),
    Statement,
}

/// The fixed vocabulary of block types the decompiler emits. `Custom` covers
/// registry-defined bare-call statement blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    MathNumber,
    Text,
    LogicBoolean,
    VariablesGet,
    VariablesSet,
    MathChange,
    LogicOperation,
    LogicCompare,
    MathArithmetic,
    MathSingle,
    MathRound,
    MathTrig,
    ControlsIf,
    ControlsWhileUntil,
    ControlsFor,
    Custom(String),
}

impl BlockType {
    /// The serialized type name, kept compatible with the editor vocabulary.
    pub fn name(&self) -> &str {
        match self {
            BlockType::MathNumber => "math_number",
            BlockType::Text => "text",
            BlockType::LogicBoolean => "logic_boolean",
            BlockType::VariablesGet => "variables_get",
            BlockType::VariablesSet => "variables_set",
            BlockType::MathChange => "math_change",
            BlockType::LogicOperation => "logic_operation",
            BlockType::LogicCompare => "logic_compare",
            BlockType::MathArithmetic => "math_arithmetic",
            BlockType::MathSingle => "math_single",
            BlockType::MathRound => "math_round",
            BlockType::MathTrig => "math_trig",
            BlockType::ControlsIf => "controls_if",
            BlockType::ControlsWhileUntil => "controls_whileUntil",
            BlockType::ControlsFor => "controls_for",
            BlockType::Custom(name) => name,
        }
    }

    /// The node-shape table: output type for value blocks, previous/next
    /// capability for statement blocks, default fields, and input slots.
    pub fn shape(&self) -> BlockShape {
        match self {
            BlockType::MathNumber => BlockShape::value(ValueType::Number).field("NUM", "0"),
            BlockType::Text => BlockShape::value(ValueType::String).field("TEXT", ""),
            BlockType::LogicBoolean => BlockShape::value(ValueType::Boolean).field("BOOL", "TRUE"),
            BlockType::VariablesGet => BlockShape::value(ValueType::Any),
            BlockType::VariablesSet => {
                BlockShape::statement().value_input("VALUE", ValueType::Any)
            }
            BlockType::MathChange => {
                BlockShape::statement().value_input("DELTA", ValueType::Number)
            }
            BlockType::LogicOperation => BlockShape::value(ValueType::Boolean)
                .field("OP", "AND")
                .value_input("A", ValueType::Boolean)
                .value_input("B", ValueType::Boolean),
            BlockType::LogicCompare => BlockShape::value(ValueType::Boolean)
                .field("OP", "EQ")
                .value_input("A", ValueType::Any)
                .value_input("B", ValueType::Any),
            BlockType::MathArithmetic => BlockShape::value(ValueType::Number)
                .field("OP", "ADD")
                .value_input("A", ValueType::Number)
                .value_input("B", ValueType::Number),
            BlockType::MathSingle => BlockShape::value(ValueType::Number)
                .field("OP", "ROOT")
                .value_input("NUM", ValueType::Number),
            BlockType::MathRound => BlockShape::value(ValueType::Number)
                .field("OP", "ROUND")
                .value_input("NUM", ValueType::Number),
            BlockType::MathTrig => BlockShape::value(ValueType::Number)
                .field("OP", "SIN")
                .value_input("NUM", ValueType::Number),
            BlockType::ControlsIf => BlockShape::statement()
                .value_input("IF0", ValueType::Boolean)
                .statement_input("DO0"),
            BlockType::ControlsWhileUntil => BlockShape::statement()
                .field("MODE", "WHILE")
                .value_input("BOOL", ValueType::Boolean)
                .statement_input("DO"),
            BlockType::ControlsFor => BlockShape::statement()
                .value_input("FROM", ValueType::Number)
                .value_input("TO", ValueType::Number)
                .value_input("BY", ValueType::Number)
                .statement_input("DO"),
            BlockType::Custom(_) => BlockShape::statement(),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared shape of a block type, consumed when a block is instantiated.
#[derive(Debug, Clone)]
pub struct BlockShape {
    pub output: Option<ValueType>,
    pub has_previous: bool,
    pub has_next: bool,
    pub default_fields: Vec<(&'static str, &'static str)>,
    pub inputs: Vec<(&'static str, InputKind)>,
}

impl BlockShape {
    fn value(output: ValueType) -> Self {
        Self {
            output: Some(output),
            has_previous: false,
            has_next: false,
            default_fields: Vec::new(),
            inputs: Vec::new(),
        }
    }

    fn statement() -> Self {
        Self {
            output: None,
            has_previous: true,
            has_next: true,
            default_fields: Vec::new(),
            inputs: Vec::new(),
        }
    }

    fn field(mut self, name: &'static str, value: &'static str) -> Self {
        self.default_fields.push((name, value));
        self
    }

    fn value_input(mut self, name: &'static str, ty: ValueType) -> Self {
        self.inputs.push((name, InputKind::Value(ty)));
        self
    }

    fn statement_input(mut self, name: &'static str) -> Self {
        self.inputs.push((name, InputKind::Statement));
        self
    }
}
