//! Unit tests for the lexer and the statement/expression grammar.
use bunkai::ast::{AssignOp, BinaryOp, Expr, ForInit, PostfixOp, StmtKind};
use bunkai::error::ParseError;
use bunkai::parser::{TokenKind, parse_source, tokenize};

#[test]
fn test_tokenize_operator_lengths() {
    let tokens = tokenize("a === b !== c <= d ++ -- += -=").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::EqEqEq,
            TokenKind::Ident,
            TokenKind::BangEqEq,
            TokenKind::Ident,
            TokenKind::LtEq,
            TokenKind::Ident,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_let_and_const_lex_as_var() {
    let tokens = tokenize("let a; const b;").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[3].kind, TokenKind::Var);
}

#[test]
fn test_string_literal_keeps_content_only() {
    let tokens = tokenize("'hello world'").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].text, "hello world");
}

#[test]
fn test_unterminated_string_reports_position() {
    let err = tokenize("var a = 'oops").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnterminatedString { line: 1, column: 9 }
    );
}

#[test]
fn test_unexpected_character() {
    let err = parse_source("var a = @;").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedChar { found: '@', .. }));
}

#[test]
fn test_var_declaration_with_multiple_declarators() {
    let source = parse_source("var a = 1, b, c = 2;").unwrap();
    assert_eq!(source.statements.len(), 1);
    let StmtKind::VarDecl(declarators) = &source.statements[0].kind else {
        panic!("expected a variable statement");
    };
    assert_eq!(declarators.len(), 3);
    assert_eq!(declarators[0].name, "a");
    assert!(declarators[0].init.is_some());
    assert_eq!(declarators[1].name, "b");
    assert!(declarators[1].init.is_none());
}

#[test]
fn test_precedence_multiplication_binds_tighter() {
    let source = parse_source("var x = 1 + 2 * 3;").unwrap();
    let StmtKind::VarDecl(declarators) = &source.statements[0].kind else {
        panic!("expected a variable statement");
    };
    let Some(Expr::Binary { op, left, right }) = &declarators[0].init else {
        panic!("expected a binary initializer");
    };
    assert_eq!(*op, BinaryOp::Plus);
    assert_eq!(**left, Expr::Number("1".to_string()));
    assert!(matches!(
        **right,
        Expr::Binary {
            op: BinaryOp::Star,
            ..
        }
    ));
}

#[test]
fn test_number_text_is_verbatim() {
    let source = parse_source("var x = 1.50;").unwrap();
    let StmtKind::VarDecl(declarators) = &source.statements[0].kind else {
        panic!("expected a variable statement");
    };
    assert_eq!(declarators[0].init, Some(Expr::Number("1.50".to_string())));
}

#[test]
fn test_else_if_parses_as_nested_if() {
    let source = parse_source("if (a) {} else if (b) {} else {}").unwrap();
    let StmtKind::If(if_stmt) = &source.statements[0].kind else {
        panic!("expected an if statement");
    };
    let else_branch = if_stmt.else_branch.as_ref().unwrap();
    assert!(matches!(else_branch.kind, StmtKind::If(_)));
}

#[test]
fn test_for_header_parts() {
    let source = parse_source("for (var i = 0; i < 10; i++) {}").unwrap();
    let StmtKind::For(for_stmt) = &source.statements[0].kind else {
        panic!("expected a for statement");
    };
    assert!(matches!(for_stmt.init, Some(ForInit::VarDecl(_))));
    assert!(matches!(
        for_stmt.condition,
        Some(Expr::Binary {
            op: BinaryOp::Lt,
            ..
        })
    ));
    assert!(matches!(
        for_stmt.update,
        Some(Expr::Postfix {
            op: PostfixOp::Increment,
            ..
        })
    ));
}

#[test]
fn test_compound_assignment() {
    let source = parse_source("count -= 2;").unwrap();
    let StmtKind::Expr(Expr::Assign { op, target, .. }) = &source.statements[0].kind else {
        panic!("expected an assignment statement");
    };
    assert_eq!(*op, AssignOp::SubAssign);
    assert_eq!(**target, Expr::Ident("count".to_string()));
}

#[test]
fn test_member_call_chain() {
    let source = parse_source("var x = Math.sqrt(9);").unwrap();
    let StmtKind::VarDecl(declarators) = &source.statements[0].kind else {
        panic!("expected a variable statement");
    };
    let Some(Expr::Call { callee, args }) = &declarators[0].init else {
        panic!("expected a call initializer");
    };
    assert_eq!(callee.qualified_callee(), Some(("Math", "sqrt")));
    assert_eq!(args.len(), 1);
}

#[test]
fn test_switch_consumed_as_unsupported() {
    let source = parse_source("var a = 1;\nswitch (a) { }\nvar b = 2;").unwrap();
    assert_eq!(source.statements.len(), 3);
    assert_eq!(
        source.statements[1].kind,
        StmtKind::Unsupported {
            construct: "SwitchStatement".to_string(),
        }
    );
    assert!(matches!(source.statements[2].kind, StmtKind::VarDecl(_)));
}

#[test]
fn test_function_declaration_consumed_through_body() {
    let source = parse_source("function f() { var inner = 1; }\nvar after = 2;").unwrap();
    assert_eq!(source.statements.len(), 2);
    assert_eq!(
        source.statements[0].kind,
        StmtKind::Unsupported {
            construct: "FunctionDeclaration".to_string(),
        }
    );
}

#[test]
fn test_prefix_operator_is_unsupported_expression() {
    let source = parse_source("var x = -5;").unwrap();
    let StmtKind::VarDecl(declarators) = &source.statements[0].kind else {
        panic!("expected a variable statement");
    };
    assert_eq!(
        declarators[0].init,
        Some(Expr::Unsupported {
            construct: "PrefixUnaryExpression".to_string(),
        })
    );
}

#[test]
fn test_effective_start_covers_leading_comment() {
    let code = "var a = 1; // note\nvar b = 2;";
    let source = parse_source(code).unwrap();
    let second = &source.statements[1];
    // The statement's own text starts on line two, its leading comment on
    // line one.
    assert_eq!(second.effective_start, code.find("//").unwrap());
}

#[test]
fn test_missing_semicolon_is_a_hard_error() {
    let err = parse_source("var a = 1").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}
