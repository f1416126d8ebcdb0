use super::lexer::{Token, TokenKind, line_col_at, tokenize};
use crate::ast::{
    AssignOp, BinaryOp, Expr, ForInit, ForStmt, IfStmt, PostfixOp, SourceFile, Span, Stmt,
    StmtKind, VarDeclarator,
};
use crate::error::ParseError;

/// Statement-opening keywords outside the supported subset, with the construct
/// name reported in diagnostics. These parse into `StmtKind::Unsupported` so a
/// single `switch` leaves a gap instead of aborting the whole file.
const UNSUPPORTED_CONSTRUCTS: &[(&str, &str)] = &[
    ("switch", "SwitchStatement"),
    ("function", "FunctionDeclaration"),
    ("do", "DoStatement"),
    ("try", "TryStatement"),
    ("return", "ReturnStatement"),
    ("throw", "ThrowStatement"),
    ("break", "BreakStatement"),
    ("continue", "ContinueStatement"),
    ("class", "ClassDeclaration"),
];

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

/// Parses source text into a [`SourceFile`].
pub fn parse_source(code: &str) -> Result<SourceFile, ParseError> {
    let tokens = tokenize(code)?;
    let mut parser = Parser {
        text: code,
        tokens,
        pos: 0,
    };
    let mut statements = Vec::new();
    while !parser.at(TokenKind::Eof) {
        statements.push(parser.parse_statement()?);
    }
    Ok(SourceFile {
        text: code.to_string(),
        line_starts: SourceFile::compute_line_starts(code),
        statements,
    })
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        let found = if token.kind == TokenKind::Eof {
            "<eof>".to_string()
        } else {
            token.text.clone()
        };
        let (line, column) = line_col_at(self.text, token.start);
        ParseError::UnexpectedToken {
            found,
            expected: expected.to_string(),
            line,
            column,
        }
    }

    fn prev_end(&self) -> usize {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].end
        }
    }

    // --- Statements ---

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let first = self.peek().clone();
        let start = first.start;
        let effective_start = first.comment_start.unwrap_or(start);

        let kind = match first.kind {
            TokenKind::Semi => {
                self.bump();
                StmtKind::Empty
            }
            TokenKind::LBrace => self.parse_block()?,
            TokenKind::Var => {
                let declarators = self.parse_var_declarators()?;
                self.expect(TokenKind::Semi, "';'")?;
                StmtKind::VarDecl(declarators)
            }
            TokenKind::If => self.parse_if()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::Ident => {
                if let Some((_, construct)) = UNSUPPORTED_CONSTRUCTS
                    .iter()
                    .find(|(kw, _)| *kw == first.text)
                {
                    self.skip_unsupported();
                    StmtKind::Unsupported {
                        construct: construct.to_string(),
                    }
                } else {
                    self.parse_expression_statement()?
                }
            }
            _ => self.parse_expression_statement()?,
        };

        Ok(Stmt {
            kind,
            span: Span {
                start,
                end: self.prev_end(),
            },
            effective_start,
        })
    }

    fn parse_expression_statement(&mut self) -> Result<StmtKind, ParseError> {
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semi, "';'")?;
        Ok(StmtKind::Expr(expr))
    }

    fn parse_block(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut statements = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(StmtKind::Block(statements))
    }

    fn parse_var_declarators(&mut self) -> Result<Vec<VarDeclarator>, ParseError> {
        self.expect(TokenKind::Var, "'var'")?;
        let mut declarators = Vec::new();
        loop {
            let name = self.expect(TokenKind::Ident, "identifier")?.text;
            let init = if self.eat(TokenKind::Eq) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            declarators.push(VarDeclarator { name, init });
            if !self.eat(TokenKind::Comma) {
                return Ok(declarators);
            }
        }
    }

    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(TokenKind::If, "'if'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.eat(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(StmtKind::If(IfStmt {
            condition,
            then_branch,
            else_branch,
        }))
    }

    fn parse_while(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(TokenKind::While, "'while'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = Box::new(self.parse_statement()?);
        Ok(StmtKind::While { condition, body })
    }

    fn parse_for(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(TokenKind::For, "'for'")?;
        self.expect(TokenKind::LParen, "'('")?;

        let init = if self.at(TokenKind::Semi) {
            None
        } else if self.at(TokenKind::Var) {
            Some(ForInit::VarDecl(self.parse_var_declarators()?))
        } else {
            Some(ForInit::Expr(self.parse_expr()?))
        };
        self.expect(TokenKind::Semi, "';'")?;

        let condition = if self.at(TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semi, "';'")?;

        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::RParen, "')'")?;

        let body = Box::new(self.parse_statement()?);
        Ok(StmtKind::For(ForStmt {
            init,
            condition,
            update,
            body,
        }))
    }

    /// Consumes an unsupported construct wholesale: through its balanced brace
    /// body, or through the terminating semicolon when no body opens first.
    fn skip_unsupported(&mut self) {
        self.bump();
        let mut depth = 0usize;
        loop {
            match self.peek().kind {
                TokenKind::Eof => return,
                TokenKind::LBrace => {
                    depth += 1;
                    self.bump();
                }
                TokenKind::RBrace => {
                    self.bump();
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                TokenKind::Semi if depth == 0 => {
                    self.bump();
                    return;
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    // --- Expressions, lowest precedence first ---

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_or()?;
        let op = match self.peek().kind {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::AddAssign,
            TokenKind::MinusEq => AssignOp::SubAssign,
            _ => return Ok(left),
        };
        self.bump();
        let value = self.parse_assignment()?;
        Ok(Expr::Assign {
            op,
            target: Box::new(left),
            value: Box::new(value),
        })
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.eat(TokenKind::PipePipe) {
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;
        while self.eat(TokenKind::AmpAmp) {
            let right = self.parse_equality()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinaryOp::EqEq,
                TokenKind::EqEqEq => BinaryOp::EqEqEq,
                TokenKind::BangEq => BinaryOp::NotEq,
                TokenKind::BangEqEq => BinaryOp::NotEqEq,
                _ => return Ok(left),
            };
            self.bump();
            let right = self.parse_relational()?;
            left = binary(op, left, right);
        }
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                _ => return Ok(left),
            };
            self.bump();
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Plus,
                TokenKind::Minus => BinaryOp::Minus,
                _ => return Ok(left),
            };
            self.bump();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_power()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Star,
                TokenKind::Slash => BinaryOp::Slash,
                _ => return Ok(left),
            };
            self.bump();
            let right = self.parse_power()?;
            left = binary(op, left, right);
        }
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while self.eat(TokenKind::Caret) {
            let right = self.parse_unary()?;
            left = binary(BinaryOp::Caret, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind {
            // Prefix operators parse but land outside the supported block
            // vocabulary; the decompiler warns and leaves a gap.
            TokenKind::Bang | TokenKind::Minus | TokenKind::Plus => {
                self.bump();
                let _operand = self.parse_unary()?;
                Ok(Expr::Unsupported {
                    construct: "PrefixUnaryExpression".to_string(),
                })
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_call_member()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::PlusPlus => PostfixOp::Increment,
                TokenKind::MinusMinus => PostfixOp::Decrement,
                _ => return Ok(expr),
            };
            self.bump();
            expr = Expr::Postfix {
                op,
                operand: Box::new(expr),
            };
        }
    }

    fn parse_call_member(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(TokenKind::Dot) {
                let property = self.expect(TokenKind::Ident, "property name")?.text;
                expr = Expr::Member {
                    object: Box::new(expr),
                    property,
                };
            } else if self.eat(TokenKind::LParen) {
                let mut args = Vec::new();
                if !self.at(TokenKind::RParen) {
                    loop {
                        args.push(self.parse_expr()?);
                        if !self.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RParen, "')'")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind {
            TokenKind::Number => Ok(Expr::Number(self.bump().text)),
            TokenKind::Str => Ok(Expr::Str(self.bump().text)),
            TokenKind::True => {
                self.bump();
                Ok(Expr::Bool(true))
            }
            TokenKind::False => {
                self.bump();
                Ok(Expr::Bool(false))
            }
            TokenKind::Ident => Ok(Expr::Ident(self.bump().text)),
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            _ => Err(self.unexpected("an expression")),
        }
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
