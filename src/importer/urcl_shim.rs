//! # URCL Directive Shim
//!
//! Parses the `.urcl` library format (spec §4.6): a line-oriented,
//! whitespace-separated directive language for wrapping hand-written URCL
//! in a signature the `Linker` can resolve calls against.


use crate::ast::TypeRef;
use crate::error::{ErrorKind, HResult, HexagnError, Span};
use crate::linker::mangle::mangle;
use crate::linker::{Function, Linker};

struct InProgress {
    name: String,
    ret: TypeRef,
    params: Vec<TypeRef>,
    code: String,
}

/// Consume `source` directive-by-directive, registering every `@FUNC ...
/// @END` block into `linker`. `span` anchors any malformed-directive error,
/// since the shim has no token-level position tracking of its own.
pub fn import_shim(source: &str, linker: &mut Linker, span: Span) -> HResult<()> {
    let mut current: Option<InProgress> = None;

    for raw_line in source.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let mut words = line.split_whitespace();
        match words.next() {
            Some("@FUNC") => {
                let name = words.next().ok_or_else(|| malformed(span, "@FUNC requires a function name"))?;
                current = Some(InProgress {
                    name: name.to_string(),
                    ret: TypeRef::new("void", false),
                    params: Vec::new(),
                    code: String::new(),
                });
            }
            Some("@SIGNATURE") => {
                let block = current.as_mut().ok_or_else(|| malformed(span, "@SIGNATURE outside a @FUNC block"))?;
                let ret_name = words.next().ok_or_else(|| malformed(span, "@SIGNATURE requires a return type"))?;
                block.ret = TypeRef::new(ret_name, false);
                block.params = words.map(|p| TypeRef::new(p, false)).collect();
            }
            Some("@CALL") => {
                let name = words.next().ok_or_else(|| malformed(span, "@CALL requires a function name"))?.to_string();
                let arg_types: Vec<TypeRef> = words.map(|p| TypeRef::new(p, false)).collect();
                let literal_flags = vec![false; arg_types.len()];
                let target = linker.get_function(&name, &arg_types, &literal_flags, span)?;
                let sig = mangle(&target.name, &target.return_type, &target.param_types);
                let block = current.as_mut().ok_or_else(|| malformed(span, "@CALL outside a @FUNC block"))?;
                block.code.push_str(&format!("CAL .{sig}\n"));
                if !arg_types.is_empty() {
                    block.code.push_str(&format!("ADD SP SP {}\n", arg_types.len()));
                }
            }
            Some("@RETURN") => {
                let block = current.as_mut().ok_or_else(|| malformed(span, "@RETURN outside a @FUNC block"))?;
                block.code.push_str("MOV SP R1\nPOP R1\nRET\n");
            }
            Some("@END") => {
                let block = current.take().ok_or_else(|| malformed(span, "@END without a matching @FUNC"))?;
                linker.add_function(
                    Function {
                        return_type: block.ret,
                        name: block.name,
                        param_types: block.params,
                        code: block.code,
                    },
                    span,
                )?;
            }
            _ => {
                let block = current.as_mut().ok_or_else(|| malformed(span, "URCL line outside a @FUNC block"))?;
                block.code.push_str(line);
                block.code.push('\n');
            }
        }
    }

    Ok(())
}

fn malformed(span: Span, message: &str) -> HexagnError {
    HexagnError::new(ErrorKind::MalformedImport, message, span)
}
