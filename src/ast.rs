//! # Abstract Syntax Tree
//!
//! A single tagged-variant enum replaces the hand-dispatched node-type-plus-
//! downcast pattern the original implementation used — the parser builds
//! nodes bottom-up and the code generator walks them with one `match` (spec
//! §3, design note "Polymorphic AST"). Ownership is strictly parent-owns-child:
//! every node is a tree, never a DAG, with no back references.

use crate::error::Span;

/// A type reference: `int32`, `string*`, a user identifier, etc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub base: String,
    pub is_pointer: bool,
}

impl TypeRef {
    pub fn new(base: impl Into<String>, is_pointer: bool) -> Self {
        Self {
            base: base.into(),
            is_pointer,
        }
    }

    pub fn is_void(&self) -> bool {
        self.base == "void" && !self.is_pointer
    }

    /// Integer, unsigned, or float family — used by the linker's overload
    /// compatibility rule (spec §4.3) and the code generator's width mask.
    pub fn numeric_family(&self) -> Option<NumericFamily> {
        match self.base.as_str() {
            "int8" | "int16" | "int32" | "int64" => Some(NumericFamily::Int),
            "uint8" | "uint16" | "uint32" | "uint64" => Some(NumericFamily::Uint),
            "float32" | "float64" => Some(NumericFamily::Float),
            _ => None,
        }
    }

    /// Bit width for integer/unsigned/float base types; `None` for `string`,
    /// `char`, `void`, or a user identifier.
    pub fn width(&self) -> Option<u32> {
        match self.base.as_str() {
            "int8" | "uint8" => Some(8),
            "int16" | "uint16" => Some(16),
            "int32" | "uint32" | "float32" => Some(32),
            "int64" | "uint64" | "float64" => Some(64),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericFamily {
    Int,
    Uint,
    Float,
}

/// Arithmetic operators produced by the parser's `expression`/`term` rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mult,
    Div,
    Mod,
}

/// Comparison operators, valid only as the condition of `if`/`while` (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A function parameter: `(type, name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: TypeRef,
    pub name: String,
}

/// One Hexagn AST node, owning its children directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Program(Vec<Node>),
    BinOp {
        op: ArithOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
        span: Span,
    },
    Compare {
        op: CompareOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
        span: Span,
    },
    Number(u64, Span),
    Identifier(String, Span),
    StringLit(String, Span),
    CharLit(u8, Span),
    If {
        condition: Box<Node>,
        body: Box<Node>,
    },
    While {
        condition: Box<Node>,
        body: Box<Node>,
    },
    VarDefine {
        ty: TypeRef,
        name: String,
        init: Option<Box<Node>>,
        span: Span,
    },
    VarAssign {
        name: String,
        value: Box<Node>,
        span: Span,
    },
    Function {
        ret: TypeRef,
        name: String,
        params: Vec<Param>,
        body: Box<Node>,
        span: Span,
    },
    FuncCall {
        callee: String,
        args: Vec<Node>,
        span: Span,
    },
    Import {
        path: String,
        span: Span,
    },
    UrclBlock(String, Span),
    Return {
        value: Option<Box<Node>>,
        span: Span,
    },
}

impl Node {
    /// The span most useful for an error anchored at this node.
    pub fn span(&self) -> Span {
        match self {
            Node::Program(stmts) => stmts.first().map_or(Span::whole_line(1), Node::span),
            Node::BinOp { span, .. }
            | Node::Compare { span, .. }
            | Node::Number(_, span)
            | Node::Identifier(_, span)
            | Node::StringLit(_, span)
            | Node::CharLit(_, span)
            | Node::VarDefine { span, .. }
            | Node::VarAssign { span, .. }
            | Node::Function { span, .. }
            | Node::FuncCall { span, .. }
            | Node::Import { span, .. }
            | Node::Return { span, .. }
            | Node::UrclBlock(_, span) => *span,
            Node::If { condition, .. } | Node::While { condition, .. } => condition.span(),
        }
    }
}
