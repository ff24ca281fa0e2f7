#[cfg(test)]
mod tests {
    use crate::ast::{ArithOp, CompareOp, Node};
    use crate::error::ErrorKind;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn parse_ok(input: &str) -> Node {
        let tokens = tokenize(input).unwrap_or_else(|e| panic!("lexer error: {:?}", e));
        parse(tokens).unwrap_or_else(|e| panic!("parser error: {:?}", e))
    }

    fn parse_err(input: &str) -> ErrorKind {
        let tokens = tokenize(input).unwrap_or_else(|e| panic!("lexer error: {:?}", e));
        parse(tokens).expect_err("expected a parse error").kind
    }

    fn stmts(program: &Node) -> &[Node] {
        match program {
            Node::Program(stmts) => stmts,
            other => panic!("expected Program, got {:?}", other),
        }
    }

    #[test]
    fn empty_program() {
        let program = parse_ok("");
        assert!(stmts(&program).is_empty());
    }

    #[test]
    fn lone_semicolons_produce_no_statements() {
        let program = parse_ok(";;;");
        assert!(stmts(&program).is_empty());
    }

    #[test]
    fn var_decl_without_initializer() {
        let program = parse_ok("int32 x;");
        match &stmts(&program)[0] {
            Node::VarDefine { ty, name, init, .. } => {
                assert_eq!(ty.base, "int32");
                assert_eq!(name, "x");
                assert!(init.is_none());
            }
            other => panic!("expected VarDefine, got {:?}", other),
        }
    }

    #[test]
    fn var_decl_with_initializer() {
        let program = parse_ok("int32 x = 1 + 2;");
        match &stmts(&program)[0] {
            Node::VarDefine { init: Some(init), .. } => match init.as_ref() {
                Node::BinOp { op, .. } => assert_eq!(*op, ArithOp::Add),
                other => panic!("expected BinOp, got {:?}", other),
            },
            other => panic!("expected VarDefine with initializer, got {:?}", other),
        }
    }

    #[test]
    fn void_var_decl_is_forbidden() {
        assert_eq!(parse_err("void x;"), ErrorKind::ForbiddenConstruct);
    }

    #[test]
    fn pointer_type() {
        let program = parse_ok("int32* x;");
        match &stmts(&program)[0] {
            Node::VarDefine { ty, .. } => assert!(ty.is_pointer),
            other => panic!("expected VarDefine, got {:?}", other),
        }
    }

    #[test]
    fn func_def_no_params() {
        let program = parse_ok("int8 main() { return 0; }");
        match &stmts(&program)[0] {
            Node::Function { ret, name, params, .. } => {
                assert_eq!(ret.base, "int8");
                assert_eq!(name, "main");
                assert!(params.is_empty());
            }
            other => panic!("expected Function, got {:?}", other),
        }
    }

    #[test]
    fn func_def_with_params() {
        let program = parse_ok("int32 add(int32 a, int32 b) { return a + b; }");
        match &stmts(&program)[0] {
            Node::Function { params, .. } => {
                assert_eq!(params.len(), 2);
                assert_eq!(params[0].name, "a");
                assert_eq!(params[1].name, "b");
            }
            other => panic!("expected Function, got {:?}", other),
        }
    }

    #[test]
    fn var_assign() {
        let program = parse_ok("x = 5;");
        match &stmts(&program)[0] {
            Node::VarAssign { name, .. } => assert_eq!(name, "x"),
            other => panic!("expected VarAssign, got {:?}", other),
        }
    }

    #[test]
    fn func_call_statement() {
        let program = parse_ok("foo(1, 2);");
        match &stmts(&program)[0] {
            Node::FuncCall { callee, args, .. } => {
                assert_eq!(callee, "foo");
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected FuncCall, got {:?}", other),
        }
    }

    #[test]
    fn if_statement_with_comparison() {
        let program = parse_ok("if (x > 0) { y = 1; }");
        match &stmts(&program)[0] {
            Node::If { condition, .. } => match condition.as_ref() {
                Node::Compare { op, .. } => assert_eq!(*op, CompareOp::Gt),
                other => panic!("expected Compare, got {:?}", other),
            },
            other => panic!("expected If, got {:?}", other),
        }
    }

    #[test]
    fn if_statement_with_bare_expression_condition() {
        let program = parse_ok("if (x) { y = 1; }");
        match &stmts(&program)[0] {
            Node::If { condition, .. } => match condition.as_ref() {
                Node::Identifier(name, _) => assert_eq!(name, "x"),
                other => panic!("expected Identifier, got {:?}", other),
            },
            other => panic!("expected If, got {:?}", other),
        }
    }

    #[test]
    fn while_statement() {
        let program = parse_ok("while (i > 0) { i = i - 1; }");
        match &stmts(&program)[0] {
            Node::While { condition, body } => {
                matches!(condition.as_ref(), Node::Compare { op, .. } if *op == CompareOp::Gt);
                assert_eq!(stmts(body).len(), 1);
            }
            other => panic!("expected While, got {:?}", other),
        }
    }

    #[test]
    fn import_simple() {
        let program = parse_ok("import std.io;");
        match &stmts(&program)[0] {
            Node::Import { path, .. } => assert_eq!(path, "std.io"),
            other => panic!("expected Import, got {:?}", other),
        }
    }

    #[test]
    fn import_with_file_suffix() {
        let program = parse_ok("import std.io:file;");
        match &stmts(&program)[0] {
            Node::Import { path, .. } => assert_eq!(path, "std.io:file"),
            other => panic!("expected Import, got {:?}", other),
        }
    }

    #[test]
    fn urcl_block() {
        let program = parse_ok("urcl \"IMM R1 1\";");
        match &stmts(&program)[0] {
            Node::UrclBlock(text, _) => assert_eq!(text, "IMM R1 1"),
            other => panic!("expected UrclBlock, got {:?}", other),
        }
    }

    #[test]
    fn precedence_mult_binds_tighter_than_add() {
        let program = parse_ok("int32 x = 1 + 2 * 3;");
        match &stmts(&program)[0] {
            Node::VarDefine { init: Some(init), .. } => match init.as_ref() {
                Node::BinOp { op: ArithOp::Add, rhs, .. } => match rhs.as_ref() {
                    Node::BinOp { op: ArithOp::Mult, .. } => {}
                    other => panic!("expected nested Mult, got {:?}", other),
                },
                other => panic!("expected top-level Add, got {:?}", other),
            },
            other => panic!("expected VarDefine, got {:?}", other),
        }
    }

    #[test]
    fn parenthesized_expression_overrides_precedence() {
        let program = parse_ok("int32 x = (1 + 2) * 3;");
        match &stmts(&program)[0] {
            Node::VarDefine { init: Some(init), .. } => match init.as_ref() {
                Node::BinOp { op: ArithOp::Mult, lhs, .. } => match lhs.as_ref() {
                    Node::BinOp { op: ArithOp::Add, .. } => {}
                    other => panic!("expected nested Add, got {:?}", other),
                },
                other => panic!("expected top-level Mult, got {:?}", other),
            },
            other => panic!("expected VarDefine, got {:?}", other),
        }
    }

    #[test]
    fn nested_function_call_in_expression() {
        let program = parse_ok("int32 x = foo(bar(1), 2);");
        match &stmts(&program)[0] {
            Node::VarDefine { init: Some(init), .. } => match init.as_ref() {
                Node::FuncCall { callee, args, .. } => {
                    assert_eq!(callee, "foo");
                    assert_eq!(args.len(), 2);
                    assert!(matches!(&args[0], Node::FuncCall { callee, .. } if callee == "bar"));
                }
                other => panic!("expected FuncCall, got {:?}", other),
            },
            other => panic!("expected VarDefine, got {:?}", other),
        }
    }

    #[test]
    fn comparison_outside_condition_is_a_parse_error() {
        assert_eq!(parse_err("x = 1 == 2;"), ErrorKind::UnexpectedToken);
    }

    #[test]
    fn missing_semicolon_is_fatal() {
        assert_eq!(parse_err("int32 x = 1"), ErrorKind::UnexpectedToken);
    }

    #[test]
    fn missing_closing_paren_is_fatal() {
        assert_eq!(parse_err("if (x > 0 { y = 1; }"), ErrorKind::UnexpectedToken);
    }

    #[test]
    fn return_with_value() {
        let program = parse_ok("int8 main() { return 1 + 2; }");
        match &stmts(&program)[0] {
            Node::Function { body, .. } => match &stmts(body)[0] {
                Node::Return { value: Some(_), .. } => {}
                other => panic!("expected Return with a value, got {:?}", other),
            },
            other => panic!("expected Function, got {:?}", other),
        }
    }

    #[test]
    fn bare_return_in_void_function() {
        let program = parse_ok("void noop() { return; }");
        match &stmts(&program)[0] {
            Node::Function { body, .. } => match &stmts(body)[0] {
                Node::Return { value: None, .. } => {}
                other => panic!("expected bare Return, got {:?}", other),
            },
            other => panic!("expected Function, got {:?}", other),
        }
    }

    #[test]
    fn func_body_nests_correctly() {
        let program = parse_ok("int8 main() { if (1) { return 1; } return 0; }");
        match &stmts(&program)[0] {
            Node::Function { body, .. } => assert_eq!(stmts(body).len(), 2),
            other => panic!("expected Function, got {:?}", other),
        }
    }
}
