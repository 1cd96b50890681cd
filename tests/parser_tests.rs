/// Parser integration tests: tree shape, node lines, syntax errors, dumps
use tiny_lang::{
    BinaryOp, Error, Expected, ExprType, Expression, NodeKind, Parser, Program, Statement,
    TokenKind,
};

fn parse(source: &str) -> Program {
    Parser::from_text(source).unwrap().parse_program().unwrap()
}

fn parse_err(source: &str) -> Error {
    match Parser::from_text(source) {
        Ok(mut parser) => parser.parse_program().unwrap_err(),
        Err(err) => err,
    }
}

#[test]
fn test_if_else_structure() {
    let program = parse("if x < 1 then y := 1 else y := 2; z := 3 end");
    assert_eq!(program.body.len(), 1);

    match &program.body[0] {
        Statement::If {
            condition,
            then_branch,
            else_branch: Some(else_branch),
            line,
        } => {
            assert_eq!(*line, 1);
            assert_eq!(condition.expr_type(), ExprType::Boolean);
            assert_eq!(then_branch.len(), 1);
            assert_eq!(else_branch.len(), 2);
        }
        other => panic!("Expected If with else, got {:?}", other),
    }
}

#[test]
fn test_nested_repeat_inside_if() {
    let program = parse("if 0 < n then repeat n := n - 1 until n = 0 end");
    if let Statement::If { then_branch, .. } = &program.body[0] {
        assert_eq!(then_branch[0].kind(), NodeKind::Repeat);
    } else {
        panic!("Expected If statement");
    }
    assert_eq!(program.statement_count(), 3);
}

#[test]
fn test_precedence() {
    // 1 + 2 * 3 ^ 2  ==>  1 + (2 * (3 ^ 2))
    let program = parse("write 1 + 2 * 3 ^ 2");
    let Statement::Write { value, .. } = &program.body[0] else {
        panic!("Expected Write statement");
    };
    let Expression::Binary { op, right, .. } = value else {
        panic!("Expected binary expression");
    };
    assert_eq!(*op, BinaryOp::Plus);
    let Expression::Binary { op, right, .. } = right.as_ref() else {
        panic!("Expected product");
    };
    assert_eq!(*op, BinaryOp::Times);
    assert!(matches!(
        right.as_ref(),
        Expression::Binary {
            op: BinaryOp::Power,
            ..
        }
    ));
}

#[test]
fn test_left_associative_subtraction() {
    // 8 - 4 - 2  ==>  (8 - 4) - 2
    let program = parse("write 8 - 4 - 2");
    let Statement::Write {
        value: Expression::Binary { left, right, .. },
        ..
    } = &program.body[0]
    else {
        panic!("Expected Write of a binary expression");
    };
    assert!(matches!(
        left.as_ref(),
        Expression::Binary {
            op: BinaryOp::Minus,
            ..
        }
    ));
    assert!(matches!(right.as_ref(), Expression::Number { value: 2, .. }));
}

#[test]
fn test_parentheses_add_no_node() {
    assert_eq!(parse("write (((7)))"), parse("write 7"));
}

#[test]
fn test_operator_node_takes_operator_line() {
    let program = parse("x := 1\n+\n2");
    let Statement::Assign { value, line, .. } = &program.body[0] else {
        panic!("Expected Assign statement");
    };
    assert_eq!(*line, 1);
    assert_eq!(value.line(), 2);
}

#[test]
fn test_statement_lines() {
    let program = parse("read x;\nwrite x;\n\nrepeat\n x := x - 1\nuntil x < 1");
    let lines: Vec<usize> = program.body.iter().map(Statement::line).collect();
    assert_eq!(lines, vec![1, 2, 4]);
}

#[test]
fn test_trailing_semicolon_rejected() {
    let err = parse_err("x := 1;");
    assert_eq!(
        err,
        Error::SyntaxError {
            expected: Expected::Statement,
            found: "end of input".to_string(),
            line: 1,
        }
    );
}

#[test]
fn test_relational_inside_parentheses_rejected() {
    let err = parse_err("write (1 < 2)");
    assert!(matches!(
        err,
        Error::SyntaxError {
            expected: Expected::Token(TokenKind::RightParen),
            ..
        }
    ));
}

#[test]
fn test_missing_factor() {
    let err = parse_err("x := * 2");
    assert_eq!(
        err,
        Error::SyntaxError {
            expected: Expected::Factor,
            found: "*".to_string(),
            line: 1,
        }
    );
}

#[test]
fn test_read_needs_identifier() {
    let err = parse_err("read 5");
    assert!(matches!(
        err,
        Error::SyntaxError {
            expected: Expected::Token(TokenKind::Id),
            ..
        }
    ));
}

#[test]
fn test_stray_tokens_after_program() {
    let err = parse_err("x := 1 end");
    assert_eq!(
        err,
        Error::SyntaxError {
            expected: Expected::Token(TokenKind::EndFile),
            found: "end".to_string(),
            line: 1,
        }
    );
}

#[test]
fn test_unterminated_comment_reported() {
    let err = parse_err("x := 1;\n{ runs off\nthe end");
    assert_eq!(err, Error::UnterminatedComment { line: 3 });
}

#[test]
fn test_error_message() {
    let err = parse_err("repeat x := 1");
    assert_eq!(
        err.to_string(),
        "Syntax error at line 1: expected \"Until\", found end of input"
    );
}

#[test]
fn test_tree_dump() {
    let program = parse("read x;\nif 0 < x then\n  write x * 2\nend");
    let expected = "\
[Read][x]
[If]
   [Oper][LessThan][Boolean]
      [Num][0][Integer]
      [ID][x][Integer]
   [Write]
      [Oper][Times][Integer]
         [ID][x][Integer]
         [Num][2][Integer]
";
    assert_eq!(program.to_string(), expected);
}

#[test]
fn test_json_dump() {
    let program = parse("x := 1");
    let json = program.to_json().unwrap();
    let back: Program = serde_json::from_str(&json).unwrap();
    assert_eq!(back, program);
}
