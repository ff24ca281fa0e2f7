//! # Hexagn Parser
//!
//! Recursive-descent parser turning a token stream into a [`Node::Program`]
//! (spec §4.2). The parser owns the AST outright — every production returns
//! a freshly built `Node` with its children already moved in; there is no
//! back-patching or second pass.
//!
//! Unlike the teacher's line-oriented parser (one macro-generated function
//! per LC-3 instruction shape), Hexagn's grammar is brace-delimited and
//! recursive, so this module reads as ordinary top-down recursive descent —
//! one method per grammar production — rather than a macro table.

#[cfg(test)]
mod tests;

use crate::ast::{ArithOp, CompareOp, Node, Param, TypeRef};
use crate::error::{ErrorKind, HResult, HexagnError};
use crate::lexer::token::{Token, TokenKind};
use crate::token_buffer::TokenBuffer;

pub struct Parser {
    buf: TokenBuffer,
}

/// Parse a complete token stream into a `Program` node.
pub fn parse(tokens: Vec<Token>) -> HResult<Node> {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program()?;
    if !parser.buf.at_eof() {
        let tok = parser.buf.current();
        return Err(HexagnError::new(
            ErrorKind::UnexpectedToken,
            format!("Unexpected token '{}' after end of program", tok.text),
            tok.span,
        ));
    }
    Ok(program)
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            buf: TokenBuffer::new(tokens),
        }
    }

    /// `program := statement*`, stopping at `}` or end of input. Used both
    /// for the whole file and for every brace-delimited body.
    fn parse_program(&mut self) -> HResult<Node> {
        let mut stmts = Vec::new();
        while !self.buf.at_eof() && self.buf.current().kind != TokenKind::CloseBrace {
            if let Some(stmt) = self.parse_statement()? {
                stmts.push(stmt);
            }
        }
        Ok(Node::Program(stmts))
    }

    fn parse_statement(&mut self) -> HResult<Option<Node>> {
        match &self.buf.current().kind {
            TokenKind::Semicolon => {
                self.buf.advance();
                Ok(None)
            }
            TokenKind::If => self.parse_if().map(Some),
            TokenKind::While => self.parse_while().map(Some),
            TokenKind::Return => self.parse_return().map(Some),
            TokenKind::Import => self.parse_import().map(Some),
            TokenKind::UrclBlock => self.parse_urcl().map(Some),
            k if k.is_type_keyword() => self.parse_type_led_statement().map(Some),
            TokenKind::Identifier => self.parse_ident_led_statement().map(Some),
            _ => {
                let tok = self.buf.current();
                Err(HexagnError::new(
                    ErrorKind::UnexpectedToken,
                    format!("Expected a statement, found '{}'", tok.text),
                    tok.span,
                ))
            }
        }
    }

    /// `varDecl | funcDef`, disambiguated by whether `(` follows the name.
    fn parse_type_led_statement(&mut self) -> HResult<Node> {
        let start = self.buf.current().span;
        let ty = self.parse_type()?;
        let name = self.buf.consume(TokenKind::Identifier, "Expected an identifier")?;

        if self.buf.current().kind == TokenKind::OpenParen {
            self.buf.advance();
            let params = self.parse_params()?;
            self.buf.consume(TokenKind::CloseParen, "Expected ')'")?;
            self.buf.consume(TokenKind::OpenBrace, "Expected '{'")?;
            let body = self.parse_program()?;
            self.buf.consume(TokenKind::CloseBrace, "Expected '}'")?;
            return Ok(Node::Function {
                ret: ty,
                name: name.text,
                params,
                body: Box::new(body),
                span: start,
            });
        }

        if ty.is_void() {
            return Err(HexagnError::new(
                ErrorKind::ForbiddenConstruct,
                "A variable cannot have type 'void'",
                start,
            ));
        }

        let init = if self.buf.current().kind == TokenKind::Assign {
            self.buf.advance();
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        self.buf.consume(TokenKind::Semicolon, "Expected ';'")?;
        Ok(Node::VarDefine {
            ty,
            name: name.text,
            init,
            span: start,
        })
    }

    fn parse_params(&mut self) -> HResult<Vec<Param>> {
        let mut params = Vec::new();
        if self.buf.current().kind == TokenKind::CloseParen {
            return Ok(params);
        }
        loop {
            let ty = self.parse_type()?;
            let name = self.buf.consume(TokenKind::Identifier, "Expected a parameter name")?;
            params.push(Param { ty, name: name.text });
            if self.buf.current().kind == TokenKind::Comma {
                self.buf.advance();
            } else {
                break;
            }
        }
        Ok(params)
    }

    /// `varAssign | funcCallStmt`, disambiguated by `=` vs `(`.
    fn parse_ident_led_statement(&mut self) -> HResult<Node> {
        let start = self.buf.current().span;
        let name = self.buf.advance();

        match self.buf.current().kind {
            TokenKind::Assign => {
                self.buf.advance();
                let value = self.parse_expression()?;
                self.buf.consume(TokenKind::Semicolon, "Expected ';'")?;
                Ok(Node::VarAssign {
                    name: name.text,
                    value: Box::new(value),
                    span: start,
                })
            }
            TokenKind::OpenParen => {
                self.buf.advance();
                let args = self.parse_args()?;
                self.buf.consume(TokenKind::CloseParen, "Expected ')'")?;
                self.buf.consume(TokenKind::Semicolon, "Expected ';'")?;
                Ok(Node::FuncCall {
                    callee: name.text,
                    args,
                    span: start,
                })
            }
            _ => Err(HexagnError::new(
                ErrorKind::UnexpectedToken,
                format!("Expected '=' or '(' after '{}'", name.text),
                self.buf.current().span,
            )),
        }
    }

    fn parse_if(&mut self) -> HResult<Node> {
        self.buf.advance(); // 'if'
        self.buf.consume(TokenKind::OpenParen, "Expected '(' after 'if'")?;
        let condition = self.parse_condition()?;
        self.buf.consume(TokenKind::CloseParen, "Expected ')'")?;
        self.buf.consume(TokenKind::OpenBrace, "Expected '{'")?;
        let body = self.parse_program()?;
        self.buf.consume(TokenKind::CloseBrace, "Expected '}'")?;
        Ok(Node::If {
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    fn parse_while(&mut self) -> HResult<Node> {
        self.buf.advance(); // 'while'
        self.buf.consume(TokenKind::OpenParen, "Expected '(' after 'while'")?;
        let condition = self.parse_condition()?;
        self.buf.consume(TokenKind::CloseParen, "Expected ')'")?;
        self.buf.consume(TokenKind::OpenBrace, "Expected '{'")?;
        let body = self.parse_program()?;
        self.buf.consume(TokenKind::CloseBrace, "Expected '}'")?;
        Ok(Node::While {
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    /// A condition is an expression optionally followed by a comparison and
    /// a second expression. Comparisons are recognized nowhere else —
    /// `expression`/`term`/`factor` never consume a comparison token, so a
    /// comparison written outside `if`/`while` simply fails to parse as part
    /// of whatever production it's embedded in.
    fn parse_condition(&mut self) -> HResult<Node> {
        let span = self.buf.current().span;
        let lhs = self.parse_expression()?;
        let op = match self.buf.current().kind {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::Neq => CompareOp::Neq,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Gte => CompareOp::Gte,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Lte => CompareOp::Lte,
            _ => return Ok(lhs),
        };
        self.buf.advance();
        let rhs = self.parse_expression()?;
        Ok(Node::Compare {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span,
        })
    }

    /// `returnStmt := 'return' expression? ';'`. Spec §4.2's statement
    /// sketch omits `return` entirely, but §4.5's lowering rules and every
    /// worked example assume it; `value` is `None` for a bare `return;` in
    /// a `void` function.
    fn parse_return(&mut self) -> HResult<Node> {
        let span = self.buf.current().span;
        self.buf.advance(); // 'return'
        let value = if self.buf.current().kind == TokenKind::Semicolon {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.buf.consume(TokenKind::Semicolon, "Expected ';'")?;
        Ok(Node::Return { value, span })
    }

    fn parse_import(&mut self) -> HResult<Node> {
        let span = self.buf.current().span;
        self.buf.advance(); // 'import'
        let first = self.buf.consume(TokenKind::Identifier, "Expected a library path")?;
        let mut path = first.text;
        while self.buf.current().kind == TokenKind::Dot {
            self.buf.advance();
            let part = self.buf.consume(TokenKind::Identifier, "Expected a path segment")?;
            path.push('.');
            path.push_str(&part.text);
        }
        if self.buf.current().kind == TokenKind::Colon {
            self.buf.advance();
            let file = self.buf.consume(TokenKind::Identifier, "Expected a file name")?;
            path.push(':');
            path.push_str(&file.text);
        }
        self.buf.consume(TokenKind::Semicolon, "Expected ';'")?;
        Ok(Node::Import { path, span })
    }

    fn parse_urcl(&mut self) -> HResult<Node> {
        let span = self.buf.current().span;
        self.buf.advance(); // 'urcl'
        let body = self.buf.consume(TokenKind::Str, "Expected a string literal after 'urcl'")?;
        self.buf.consume(TokenKind::Semicolon, "Expected ';'")?;
        Ok(Node::UrclBlock(body.text, span))
    }

    fn parse_type(&mut self) -> HResult<TypeRef> {
        let tok = self.buf.current().clone();
        if !tok.kind.is_type_keyword() {
            return Err(HexagnError::new(
                ErrorKind::UnexpectedToken,
                format!("Expected a type, found '{}'", tok.text),
                tok.span,
            ));
        }
        self.buf.advance();
        let is_pointer = if self.buf.current().kind == TokenKind::Mult {
            self.buf.advance();
            true
        } else {
            false
        };
        Ok(TypeRef::new(tok.text, is_pointer))
    }

    fn parse_args(&mut self) -> HResult<Vec<Node>> {
        let mut args = Vec::new();
        if self.buf.current().kind == TokenKind::CloseParen {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if self.buf.current().kind == TokenKind::Comma {
                self.buf.advance();
            } else {
                break;
            }
        }
        Ok(args)
    }

    /// `expression := term (('+'|'-') term)*`
    fn parse_expression(&mut self) -> HResult<Node> {
        let span = self.buf.current().span;
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.buf.current().kind {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                _ => break,
            };
            self.buf.advance();
            let rhs = self.parse_term()?;
            lhs = Node::BinOp {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            };
        }
        Ok(lhs)
    }

    /// `term := factor (('*'|'/'|'%') factor)*`. The grammar sketch in spec
    /// §4.2 omits `%` from `term`, but §4.5's operator table maps `%` to
    /// `MOD` at the same precedence tier as `*`/`/`, so it is folded in here.
    fn parse_term(&mut self) -> HResult<Node> {
        let span = self.buf.current().span;
        let mut lhs = self.parse_factor()?;
        loop {
            let op = match self.buf.current().kind {
                TokenKind::Mult => ArithOp::Mult,
                TokenKind::Div => ArithOp::Div,
                TokenKind::Mod => ArithOp::Mod,
                _ => break,
            };
            self.buf.advance();
            let rhs = self.parse_factor()?;
            lhs = Node::BinOp {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            };
        }
        Ok(lhs)
    }

    /// `factor := NUM | STRING | CHAR | IDENT ('(' args? ')')? | '(' expression ')'`.
    /// `CHAR` is not in spec §4.2's factor sketch, but `CharLit` is a named
    /// AST node (spec §3) with no other production that could build one.
    fn parse_factor(&mut self) -> HResult<Node> {
        let tok = self.buf.current().clone();
        match tok.kind {
            TokenKind::Num => {
                self.buf.advance();
                let value = tok.text.parse::<u64>().map_err(|_| {
                    HexagnError::new(
                        ErrorKind::UnexpectedToken,
                        format!("Numeric literal '{}' is out of range", tok.text),
                        tok.span,
                    )
                })?;
                Ok(Node::Number(value, tok.span))
            }
            TokenKind::Str => {
                self.buf.advance();
                Ok(Node::StringLit(tok.text, tok.span))
            }
            TokenKind::Char => {
                self.buf.advance();
                Ok(Node::CharLit(tok.text.as_bytes()[0], tok.span))
            }
            TokenKind::Identifier => {
                self.buf.advance();
                if self.buf.current().kind == TokenKind::OpenParen {
                    self.buf.advance();
                    let args = self.parse_args()?;
                    self.buf.consume(TokenKind::CloseParen, "Expected ')'")?;
                    Ok(Node::FuncCall {
                        callee: tok.text,
                        args,
                        span: tok.span,
                    })
                } else {
                    Ok(Node::Identifier(tok.text, tok.span))
                }
            }
            TokenKind::OpenParen => {
                self.buf.advance();
                let expr = self.parse_expression()?;
                self.buf.consume(TokenKind::CloseParen, "Expected ')'")?;
                Ok(expr)
            }
            _ => Err(HexagnError::new(
                ErrorKind::UnexpectedToken,
                format!("Expected an expression, found '{}'", tok.text),
                tok.span,
            )),
        }
    }
}
