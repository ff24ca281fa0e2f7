//! # Code Generator
//!
//! A recursive walker over a `Program` node that emits URCL into an
//! append-only `String`, mirroring the teacher's `Encoder` (a struct holding
//! mutable emission state, one dispatch method per node shape, small helper
//! functions with their own colocated tests) rather than a separate codegen
//! IR (spec §4.5).
//!
//! Label counters (`if_count`/`while_count`) are process-wide: URCL labels
//! share one flat namespace, so two different functions both emitting
//! `.if0` would collide once their bodies are concatenated into the final
//! output (spec §5, "process-wide singletons"). [`LabelCounters`] is
//! threaded by mutable reference through every recursive function-body
//! compile instead of living on `CodeGenerator` itself.


use crate::ast::{ArithOp, CompareOp, Node, Param, TypeRef};
use crate::error::{ErrorKind, HResult, HexagnError, Span};
use crate::interner::StringInterner;
use crate::linker::mangle::mangle;
use crate::linker::{Function, Linker};
use crate::source::SourceBuffer;
use crate::varstack::VarStack;

/// Resolves an `import` statement encountered mid-compile, registering
/// whatever functions it defines into `linker`/`interner`. Kept as a trait
/// rather than a direct dependency on the importer module so codegen and
/// importer can depend on each other through one seam instead of a cycle:
/// the importer implements this trait and, in turn, calls back into
/// [`generate_unit`] to compile the library sources it resolves.
pub trait ImportResolver {
    fn resolve(
        &mut self,
        reference: &str,
        span: Span,
        linker: &mut Linker,
        interner: &mut StringInterner,
        labels: &mut LabelCounters,
    ) -> HResult<()>;
}

/// Process-wide `if`/`while` label counters (spec §5), shared by reference
/// across the main compile and any library compiled mid-stream by an
/// `ImportResolver` so two functions never independently emit the same
/// `.if<k>`/`.while<k>` label into the flat URCL namespace.
#[derive(Default)]
pub struct LabelCounters {
    if_count: u32,
    while_count: u32,
}

impl LabelCounters {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_if(&mut self) -> u32 {
        let k = self.if_count;
        self.if_count += 1;
        k
    }

    fn next_while(&mut self) -> u32 {
        let k = self.while_count;
        self.while_count += 1;
        k
    }
}

pub struct CodeGenerator<'a> {
    linker: &'a mut Linker,
    interner: &'a mut StringInterner,
    locals: VarStack,
    func_args: VarStack,
    labels: &'a mut LabelCounters,
    resolver: Option<&'a mut dyn ImportResolver>,
    debug_source: Option<&'a SourceBuffer>,
}

/// Compile a whole compilation unit (the top-level `Program`), producing
/// the program header (if `emit_entry_point`) and, when `emit_end`, every
/// registered function body plus the interned string table (spec §4.5).
#[allow(clippy::too_many_arguments)]
pub fn generate(
    program: &Node,
    linker: &mut Linker,
    interner: &mut StringInterner,
    emit_entry_point: bool,
    emit_end: bool,
    resolver: Option<&mut dyn ImportResolver>,
    debug_source: Option<&SourceBuffer>,
) -> HResult<String> {
    let mut labels = LabelCounters::default();
    let mut gen = CodeGenerator {
        linker,
        interner,
        locals: VarStack::new(),
        func_args: VarStack::new(),
        labels: &mut labels,
        resolver,
        debug_source,
    };

    generate_unit(program, &mut gen)?;

    let main_sig = mangle("main", &TypeRef::new("int8", false), &[]);
    if emit_entry_point && gen.linker.get_by_signature(&main_sig).is_none() {
        return Err(HexagnError::new(
            ErrorKind::MissingMain,
            "No parameterless function 'main' returning 'int8' was found",
            Span::whole_line(1),
        ));
    }

    let mut out = String::new();
    if emit_entry_point {
        out.push_str("BITS == 32\nMINHEAP 4096\nMINSTACK 1024\n");
        out.push_str(&format!("CAL .{main_sig}\n"));
        out.push_str("HLT\n");
    }
    if emit_end {
        for f in gen.linker.iter() {
            let sig = mangle(&f.name, &f.return_type, &f.param_types);
            out.push_str(&format!(".{sig}\n"));
            out.push_str(&f.code);
            out.push_str(&gen_function_trailer(&f.code));
        }
        out.push_str(&gen.interner.emit_all());
    }
    Ok(out)
}

fn gen_function_trailer(code: &str) -> String {
    if code.ends_with('\n') {
        String::new()
    } else {
        "\n".to_string()
    }
}

/// Compile every top-level statement into `gen`'s linker/interner. Used
/// both as the top half of [`generate`] and by an `ImportResolver` compiling
/// a library's own top-level statements into the same registry.
pub fn generate_unit(program: &Node, gen: &mut CodeGenerator<'_>) -> HResult<()> {
    let mut discard = String::new();
    match program {
        Node::Program(stmts) => {
            for stmt in stmts {
                gen.compile_statement(stmt, &mut discard)?;
            }
        }
        other => gen.compile_statement(other, &mut discard)?,
    }
    Ok(())
}

impl<'a> CodeGenerator<'a> {
    /// Build a fresh top-level generator sharing the caller's linker,
    /// interner, and label counters. Used by an `ImportResolver` to compile
    /// a resolved library's own top-level statements into the same registry
    /// (spec §4.6) — library sources never get their own entry point or
    /// end-of-compilation tail, so only [`generate_unit`] is called on them.
    pub fn for_library(
        linker: &'a mut Linker,
        interner: &'a mut StringInterner,
        labels: &'a mut LabelCounters,
        resolver: Option<&'a mut dyn ImportResolver>,
    ) -> Self {
        Self {
            linker,
            interner,
            locals: VarStack::new(),
            func_args: VarStack::new(),
            labels,
            resolver,
            debug_source: None,
        }
    }

    fn child(&mut self) -> CodeGenerator<'_> {
        CodeGenerator {
            linker: &mut *self.linker,
            interner: &mut *self.interner,
            locals: VarStack::new(),
            func_args: VarStack::new(),
            labels: &mut *self.labels,
            resolver: self.resolver.as_mut().map(|r| &mut **r),
            debug_source: self.debug_source,
        }
    }

    fn emit_debug(&self, span: Span, out: &mut String) {
        if let Some(src) = self.debug_source {
            out.push_str(&format!("// {}\n", src.source_line(span.line)));
        }
    }

    fn compile_block(&mut self, body: &Node, out: &mut String) -> HResult<()> {
        match body {
            Node::Program(stmts) => {
                self.locals.start_frame();
                for stmt in stmts {
                    self.compile_statement(stmt, out)?;
                }
                self.locals.pop_frame();
                Ok(())
            }
            other => self.compile_statement(other, out),
        }
    }

    fn compile_statement(&mut self, node: &Node, out: &mut String) -> HResult<()> {
        match node {
            Node::VarDefine { ty, name, init, span } => self.compile_var_define(ty, name, init.as_deref(), *span, out),
            Node::VarAssign { name, value, span } => self.compile_var_assign(name, value, *span, out),
            Node::FuncCall { callee, args, span } => {
                self.emit_debug(*span, out);
                self.compile_call(callee, args, *span, out)
            }
            Node::If { condition, body } => self.compile_if(condition, body, out),
            Node::While { condition, body } => self.compile_while(condition, body, out),
            Node::Return { value, span } => self.compile_return(value.as_deref(), *span, out),
            Node::UrclBlock(text, span) => {
                self.emit_debug(*span, out);
                out.push_str(text);
                out.push('\n');
                Ok(())
            }
            Node::Import { path, span } => self.compile_import(path, *span),
            Node::Function { ret, name, params, body, span } => self.compile_function(ret, name, params, body, *span),
            other => Err(HexagnError::new(
                ErrorKind::UnexpectedToken,
                "this node cannot appear as a statement",
                other.span(),
            )),
        }
    }

    fn compile_var_define(&mut self, ty: &TypeRef, name: &str, init: Option<&Node>, span: Span, out: &mut String) -> HResult<()> {
        self.emit_debug(span, out);
        self.locals.push(name, ty.clone());
        match init {
            Some(expr) => {
                self.compile_expr_masked(expr, 2, ty, out)?;
                out.push_str("PSH R2\n");
            }
            None => out.push_str("DEC SP SP\n"),
        }
        Ok(())
    }

    fn compile_var_assign(&mut self, name: &str, value: &Node, span: Span, out: &mut String) -> HResult<()> {
        self.emit_debug(span, out);
        if let Some((offset, ty)) = self.locals.get(name) {
            let ty = ty.clone();
            self.compile_expr_masked(value, 2, &ty, out)?;
            out.push_str(&format!("LSTR R1 -{offset} R2\n"));
            Ok(())
        } else if let Some((offset, ty)) = self.func_args.get(name) {
            let ty = ty.clone();
            self.compile_expr_masked(value, 2, &ty, out)?;
            out.push_str(&format!("LSTR R1 +{offset} R2\n"));
            Ok(())
        } else {
            Err(HexagnError::new(
                ErrorKind::UndeclaredIdentifier,
                format!("Undeclared identifier '{name}'"),
                span,
            ))
        }
    }

    fn compile_return(&mut self, value: Option<&Node>, span: Span, out: &mut String) -> HResult<()> {
        self.emit_debug(span, out);
        if let Some(expr) = value {
            self.compile_expr(expr, 2, out)?;
        }
        out.push_str("MOV SP R1\nPOP R1\nRET\n");
        Ok(())
    }

    fn compile_import(&mut self, path: &str, span: Span) -> HResult<()> {
        match self.resolver.as_mut() {
            Some(resolver) => resolver.resolve(path, span, self.linker, self.interner, self.labels),
            None => Err(HexagnError::new(
                ErrorKind::LibraryNotFound,
                format!("Cannot resolve import '{path}': no importer is configured"),
                span,
            )),
        }
    }

    fn compile_if(&mut self, condition: &Node, body: &Node, out: &mut String) -> HResult<()> {
        let k = self.labels.next_if();
        out.push_str(&format!(".if{k}\n"));
        self.compile_expr(condition, 2, out)?;
        out.push_str(&format!("BRZ .endif{k} R2\n"));
        self.compile_block(body, out)?;
        out.push_str(&format!(".endif{k}\n"));
        Ok(())
    }

    /// A `Compare` condition branches directly on the inverted comparison
    /// (spec's `EQ→BNE` table) without materializing a boolean value; a bare
    /// expression condition falls back to the same zero-test `If` uses,
    /// since the spec's table only covers the comparison case.
    fn compile_while(&mut self, condition: &Node, body: &Node, out: &mut String) -> HResult<()> {
        let k = self.labels.next_while();
        out.push_str(&format!(".while{k}\n"));
        match condition {
            Node::Compare { op, lhs, rhs, .. } => {
                self.compile_expr(lhs, 2, out)?;
                let guard = contains_call(rhs);
                if guard {
                    out.push_str("PSH R2\n");
                }
                self.compile_expr(rhs, 3, out)?;
                if guard {
                    out.push_str("POP R2\n");
                }
                out.push_str(&format!("{} .endwhile{k} R2 R3\n", inverted_branch(*op)));
            }
            other => {
                self.compile_expr(other, 2, out)?;
                out.push_str(&format!("BRZ .endwhile{k} R2\n"));
            }
        }
        self.compile_block(body, out)?;
        out.push_str(&format!("JMP .while{k}\n"));
        out.push_str(&format!(".endwhile{k}\n"));
        Ok(())
    }

    fn compile_function(&mut self, ret: &TypeRef, name: &str, params: &[Param], body: &Node, span: Span) -> HResult<()> {
        let mut child = self.child();
        child.func_args.start_frame();
        for p in params {
            child.func_args.push(p.name.clone(), p.ty.clone());
        }

        let mut code = String::from("PSH R1\nMOV R1 SP\n");
        child.compile_block(body, &mut code)?;
        // `Return` already emits its own epilogue; only add the fallthrough
        // one when the body doesn't end with one (e.g. a `void` function
        // with no explicit `return`), so the common case isn't doubled up.
        if !body_ends_in_return(body) {
            code.push_str("MOV SP R1\nPOP R1\nRET\n");
        }

        let param_types = params.iter().map(|p| p.ty.clone()).collect();
        self.linker.add_function(
            Function {
                return_type: ret.clone(),
                name: name.to_string(),
                param_types,
                code,
            },
            span,
        )
    }

    /// Evaluate each argument and push in reverse source order, resolve the
    /// overload via the linker, then `CAL` and clean up the caller's stack
    /// (spec §4.5).
    fn compile_call(&mut self, callee: &str, args: &[Node], span: Span, out: &mut String) -> HResult<()> {
        let mut arg_types = Vec::with_capacity(args.len());
        let mut literal_flags = Vec::with_capacity(args.len());
        for arg in args {
            arg_types.push(self.infer_type(arg)?);
            literal_flags.push(matches!(arg, Node::Number(_, _)));
        }

        for arg in args.iter().rev() {
            self.compile_expr(arg, 2, out)?;
            out.push_str("PSH R2\n");
        }

        let func = self.linker.get_function(callee, &arg_types, &literal_flags, span)?;
        let sig = mangle(&func.name, &func.return_type, &func.param_types);
        out.push_str(&format!("CAL .{sig}\n"));
        if !args.is_empty() {
            out.push_str(&format!("ADD SP SP {}\n", args.len()));
        }
        Ok(())
    }

    /// Overload resolution needs each call argument's static type, which
    /// nothing upstream of codegen computes; this is the one place it is
    /// derived, from the same local/parameter/linker information codegen
    /// already has on hand (see DESIGN.md).
    fn infer_type(&self, node: &Node) -> HResult<TypeRef> {
        match node {
            Node::Number(_, _) => Ok(TypeRef::new("int32", false)),
            Node::StringLit(_, _) => Ok(TypeRef::new("string", false)),
            Node::CharLit(_, _) => Ok(TypeRef::new("char", false)),
            Node::Identifier(name, span) => self
                .locals
                .get_type(name)
                .or_else(|| self.func_args.get_type(name))
                .cloned()
                .ok_or_else(|| HexagnError::new(ErrorKind::UndeclaredIdentifier, format!("Undeclared identifier '{name}'"), *span)),
            Node::FuncCall { callee, args, span } => {
                let mut arg_types = Vec::with_capacity(args.len());
                let mut literal_flags = Vec::with_capacity(args.len());
                for a in args {
                    arg_types.push(self.infer_type(a)?);
                    literal_flags.push(matches!(a, Node::Number(_, _)));
                }
                Ok(self.linker.get_function(callee, &arg_types, &literal_flags, *span)?.return_type.clone())
            }
            Node::BinOp { lhs, .. } => self.infer_type(lhs),
            Node::Compare { .. } => Ok(TypeRef::new("int8", false)),
            other => Err(HexagnError::new(ErrorKind::UnexpectedToken, "expression has no inferable type", other.span())),
        }
    }

    fn compile_expr(&mut self, node: &Node, dest: u32, out: &mut String) -> HResult<()> {
        match node {
            Node::Number(value, _) => {
                out.push_str(&format!("IMM R{dest} {value}\n"));
                Ok(())
            }
            Node::CharLit(byte, _) => {
                out.push_str(&format!("IMM R{dest} {byte}\n"));
                Ok(())
            }
            Node::Identifier(name, span) => {
                if let Some(offset) = self.locals.get_offset(name) {
                    out.push_str(&format!("LLOD R{dest} R1 -{offset}\n"));
                    Ok(())
                } else if let Some(offset) = self.func_args.get_offset(name) {
                    out.push_str(&format!("LLOD R{dest} R1 +{offset}\n"));
                    Ok(())
                } else {
                    Err(HexagnError::new(
                        ErrorKind::UndeclaredIdentifier,
                        format!("Undeclared identifier '{name}'"),
                        *span,
                    ))
                }
            }
            Node::StringLit(s, _) => {
                let label = self.interner.register(s);
                out.push_str(&format!("MOV R{dest} {label}\n"));
                Ok(())
            }
            Node::FuncCall { callee, args, span } => {
                self.compile_call(callee, args, *span, out)?;
                if dest != 2 {
                    out.push_str(&format!("MOV R{dest} R2\n"));
                }
                Ok(())
            }
            Node::BinOp { op, lhs, rhs, .. } => self.compile_binop(arith_mnemonic(*op), lhs, rhs, dest, out),
            Node::Compare { op, lhs, rhs, .. } => self.compile_binop(set_mnemonic(*op), lhs, rhs, dest, out),
            other => Err(HexagnError::new(ErrorKind::UnexpectedToken, "not a valid expression", other.span())),
        }
    }

    /// Lower `lhs` into `R<dest>`, `rhs` into `R<dest+1>`, guarding `R2`
    /// across a nested call in `rhs` when `dest` itself is `R2` — otherwise
    /// the call's own result convention (always `R2`) would clobber `lhs`.
    fn compile_binop(&mut self, mnemonic: &str, lhs: &Node, rhs: &Node, dest: u32, out: &mut String) -> HResult<()> {
        self.compile_expr(lhs, dest, out)?;
        let guard = dest == 2 && contains_call(rhs);
        if guard {
            out.push_str("PSH R2\n");
        }
        self.compile_expr(rhs, dest + 1, out)?;
        if guard {
            out.push_str("POP R2\n");
        }
        out.push_str(&format!("{mnemonic} R{dest} R{dest} R{}\n", dest + 1));
        Ok(())
    }

    fn compile_expr_masked(&mut self, node: &Node, dest: u32, ty: &TypeRef, out: &mut String) -> HResult<()> {
        self.compile_expr(node, dest, out)?;
        if let Some(width) = ty.width() {
            out.push_str(&format!("AND R{dest} R{dest} {:#x}\n", width_mask(width)));
        }
        Ok(())
    }
}

/// `(1<<width)-1`, regardless of signedness (spec §4.5, resolved literally
/// per DESIGN.md rather than reinterpreted for signed types).
const fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

fn body_ends_in_return(body: &Node) -> bool {
    match body {
        Node::Program(stmts) => matches!(stmts.last(), Some(Node::Return { .. })),
        Node::Return { .. } => true,
        _ => false,
    }
}

fn contains_call(node: &Node) -> bool {
    match node {
        Node::FuncCall { .. } => true,
        Node::BinOp { lhs, rhs, .. } | Node::Compare { lhs, rhs, .. } => contains_call(lhs) || contains_call(rhs),
        _ => false,
    }
}

fn arith_mnemonic(op: ArithOp) -> &'static str {
    match op {
        ArithOp::Add => "ADD",
        ArithOp::Sub => "SUB",
        ArithOp::Mult => "MLT",
        ArithOp::Div => "DIV",
        ArithOp::Mod => "MOD",
    }
}

fn set_mnemonic(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "SETE",
        CompareOp::Neq => "SETNE",
        CompareOp::Gt => "SETG",
        CompareOp::Gte => "SETGE",
        CompareOp::Lt => "SETL",
        CompareOp::Lte => "SETLE",
    }
}

fn inverted_branch(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "BNE",
        CompareOp::Neq => "BRE",
        CompareOp::Gt => "BLE",
        CompareOp::Gte => "BRL",
        CompareOp::Lt => "BGE",
        CompareOp::Lte => "BRG",
    }
}
