//! # Name Mangling
//!
//! `_Hx<N><name><ret-enc><arg-encs>` (spec §4.3). `<N>` is the decimal
//! length of the unmangled name; each type is encoded independently so the
//! scheme stays injective over `(name, ret, params)` regardless of how
//! adjacent encodings might otherwise run together.

use crate::ast::TypeRef;

pub fn mangle(name: &str, ret: &TypeRef, params: &[TypeRef]) -> String {
    let mut out = format!("_Hx{}{}", name.len(), name);
    out.push_str(&encode_type(ret));
    for p in params {
        out.push_str(&encode_type(p));
    }
    out
}

fn encode_type(ty: &TypeRef) -> String {
    let base = match ty.base.as_str() {
        "void" => "v".to_string(),
        "int8" => "i8".to_string(),
        "int16" => "i16".to_string(),
        "int32" => "i32".to_string(),
        "int64" => "i64".to_string(),
        "uint8" => "u8".to_string(),
        "uint16" => "u16".to_string(),
        "uint32" => "u32".to_string(),
        "uint64" => "u64".to_string(),
        "float32" => "f32".to_string(),
        "float64" => "f64".to_string(),
        "string" => "s".to_string(),
        "char" => "c".to_string(),
        user => format!("_{}{}", user.len(), user),
    };
    if ty.is_pointer {
        format!("{base}P")
    } else {
        base
    }
}
