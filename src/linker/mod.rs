//! # Linker Registry
//!
//! Mangles function signatures, stores their generated bodies keyed by
//! signature, and resolves call sites to a registered function using the
//! numeric-family compatibility rule (spec §4.3).
//!
//! Mirrors the teacher's `first_pass::symbol_table::SymbolTable`: an
//! insertion-ordered `Vec` rather than a `HashMap`, since a Hexagn program's
//! function count is small enough that a linear scan is simpler and the
//! iteration order (first-registered wins on ties, spec §8) matters.

pub mod mangle;

#[cfg(test)]
mod tests;

use crate::ast::{NumericFamily, TypeRef};
use crate::error::{ErrorKind, HResult, HexagnError, Span};
use mangle::mangle;

#[derive(Debug, Clone)]
pub struct Function {
    pub return_type: TypeRef,
    pub name: String,
    pub param_types: Vec<TypeRef>,
    pub code: String,
}

pub struct Linker {
    entries: Vec<(String, Function)>,
}

impl Linker {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert `f`, keyed by its mangled signature.
    ///
    /// Fatal if an identical signature is already registered, or if a
    /// function with the same name and parameter types but a different
    /// return type already exists.
    pub fn add_function(&mut self, f: Function, span: Span) -> HResult<()> {
        let sig = mangle(&f.name, &f.return_type, &f.param_types);

        if self.entries.iter().any(|(s, _)| *s == sig) {
            return Err(HexagnError::new(
                ErrorKind::DuplicateFunction,
                format!("Duplicate function '{}'", f.name),
                span,
            ));
        }

        if let Some((_, existing)) = self.entries.iter().find(|(_, e)| {
            e.name == f.name && e.param_types == f.param_types && e.return_type != f.return_type
        }) {
            return Err(HexagnError::new(
                ErrorKind::ReturnTypeConflict,
                format!(
                    "Function '{}' declared with return type '{}' conflicts with an earlier declaration returning '{}'",
                    f.name, f.return_type.base, existing.return_type.base
                ),
                span,
            ));
        }

        self.entries.push((sig, f));
        Ok(())
    }

    pub fn get_by_signature(&self, sig: &str) -> Option<&Function> {
        self.entries.iter().find(|(s, _)| s == sig).map(|(_, f)| f)
    }

    /// Resolve a call to `name` with argument types `call_arg_types` using
    /// the compatibility rule from spec §4.3. `literal_args[i]` marks
    /// whether argument `i` is a bare numeric literal (integer parameters
    /// accept those regardless of the literal's own inferred type).
    pub fn get_function(
        &self,
        name: &str,
        call_arg_types: &[TypeRef],
        literal_args: &[bool],
        span: Span,
    ) -> HResult<&Function> {
        let candidate = self.entries.iter().find(|(_, f)| {
            f.name == name
                && f.param_types.len() == call_arg_types.len()
                && f.param_types
                    .iter()
                    .zip(call_arg_types.iter())
                    .zip(literal_args.iter())
                    .all(|((param, arg), is_literal)| compatible(param, arg, *is_literal))
        });

        candidate.map(|(_, f)| f).ok_or_else(|| {
            let arg_list = call_arg_types
                .iter()
                .map(|t| t.base.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            HexagnError::new(
                ErrorKind::UnknownFunction,
                format!("Function '{name}' with arguments ({arg_list}) does not exist"),
                span,
            )
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Function> {
        self.entries.iter().map(|(_, f)| f)
    }
}

impl Default for Linker {
    fn default() -> Self {
        Self::new()
    }
}

/// Compatibility rule from spec §4.3: integer-family parameters accept an
/// integer-family argument or a bare literal; float-family parameters
/// require a float-family argument; `string` requires `string`; anything
/// else (including user-identifier types) requires an exact name match.
fn compatible(param: &TypeRef, arg: &TypeRef, is_literal: bool) -> bool {
    match param.numeric_family() {
        Some(NumericFamily::Int) | Some(NumericFamily::Uint) => {
            matches!(arg.numeric_family(), Some(NumericFamily::Int) | Some(NumericFamily::Uint)) || is_literal
        }
        Some(NumericFamily::Float) => matches!(arg.numeric_family(), Some(NumericFamily::Float)),
        None if param.base == "string" => arg.base == "string",
        None => param.base == arg.base && param.is_pointer == arg.is_pointer,
    }
}
