use super::{AssignOp, BinaryOp, PostfixOp};

/// Byte range of a syntax node in the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A parsed source file: the original text plus the top-level statement list
/// and the line-start offset table used by the adjacency heuristic.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub text: String,
    pub line_starts: Vec<usize>,
    pub statements: Vec<Stmt>,
}

impl SourceFile {
    pub(crate) fn compute_line_starts(text: &str) -> Vec<usize> {
        let mut starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        starts
    }

    /// One-based line and column for a byte offset.
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&s| s <= pos);
        let start = self.line_starts[line - 1];
        (line, pos - start + 1)
    }

    /// The character immediately preceding `pos`, if any.
    pub fn preceding_char(&self, pos: usize) -> Option<char> {
        self.text[..pos].chars().next_back()
    }
}

/// A statement node with position metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
    /// Start of the leading comment directly preceding this statement, when
    /// one exists. Falls back to `span.start` otherwise.
    pub effective_start: usize,
}

impl Stmt {
    /// Name used in "unknown node" diagnostics.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            StmtKind::VarDecl(_) => "VariableStatement",
            StmtKind::Expr(_) => "ExpressionStatement",
            StmtKind::Block(_) => "Block",
            StmtKind::If(_) => "IfStatement",
            StmtKind::While { .. } => "WhileStatement",
            StmtKind::For(_) => "ForStatement",
            StmtKind::Empty => "EmptyStatement",
            StmtKind::Unsupported { construct } => construct,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `var a = 1, b;` with one entry per declarator.
    VarDecl(Vec<VarDeclarator>),
    Expr(Expr),
    Block(Vec<Stmt>),
    If(IfStmt),
    While { condition: Expr, body: Box<Stmt> },
    For(ForStmt),
    Empty,
    /// A construct outside the supported subset, consumed wholesale so the
    /// surrounding statements still decompile.
    Unsupported { construct: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    pub name: String,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub condition: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    VarDecl(Vec<VarDeclarator>),
    Expr(Expr),
}

/// An expression node. Literal variants keep the verbatim source text so the
/// round trip does not reformat numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(String),
    Str(String),
    Bool(bool),
    Ident(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Postfix {
        op: PostfixOp,
        operand: Box<Expr>,
    },
    /// `callee(args...)`; the callee is usually an identifier or member chain.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `object.property`
    Member {
        object: Box<Expr>,
        property: String,
    },
    Paren(Box<Expr>),
    Unsupported {
        construct: String,
    },
}

impl Expr {
    /// Name used in "unknown token" diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Expr::Number(_) => "NumericLiteral",
            Expr::Str(_) => "StringLiteral",
            Expr::Bool(_) => "BooleanLiteral",
            Expr::Ident(_) => "Identifier",
            Expr::Binary { .. } => "BinaryExpression",
            Expr::Assign { .. } => "AssignmentExpression",
            Expr::Postfix { .. } => "PostfixUnaryExpression",
            Expr::Call { .. } => "CallExpression",
            Expr::Member { .. } => "PropertyAccessExpression",
            Expr::Paren(_) => "ParenthesizedExpression",
            Expr::Unsupported { construct } => construct,
        }
    }

    /// For a call like `Math.sqrt(x)`, the `(namespace, method)` pair of the
    /// callee when it is a plain one-level member access on an identifier.
    pub fn qualified_callee(&self) -> Option<(&str, &str)> {
        if let Expr::Member { object, property } = self
            && let Expr::Ident(namespace) = object.as_ref()
        {
            return Some((namespace, property));
        }
        None
    }
}
