#[cfg(test)]
mod tests {
    use crate::ast::TypeRef;
    use crate::error::{ErrorKind, Span};
    use crate::linker::{Function, Linker};

    fn ty(base: &str) -> TypeRef {
        TypeRef::new(base, false)
    }

    fn func(name: &str, ret: &str, params: &[&str]) -> Function {
        Function {
            return_type: ty(ret),
            name: name.into(),
            param_types: params.iter().map(|p| ty(p)).collect(),
            code: String::new(),
        }
    }

    fn span() -> Span {
        Span::new(1, 0, 0)
    }

    #[test]
    fn registers_and_resolves_exact_match() {
        let mut linker = Linker::new();
        linker.add_function(func("main", "int8", &[]), span()).unwrap();
        let resolved = linker.get_function("main", &[], &[], span()).unwrap();
        assert_eq!(resolved.name, "main");
    }

    #[test]
    fn duplicate_signature_is_rejected() {
        let mut linker = Linker::new();
        linker.add_function(func("foo", "int8", &[]), span()).unwrap();
        let err = linker.add_function(func("foo", "int8", &[]), span()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateFunction);
    }

    #[test]
    fn return_type_conflict_is_rejected() {
        let mut linker = Linker::new();
        linker.add_function(func("foo", "int8", &["int32"]), span()).unwrap();
        let err = linker.add_function(func("foo", "int16", &["int32"]), span()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ReturnTypeConflict);
    }

    #[test]
    fn different_param_lists_do_not_conflict() {
        let mut linker = Linker::new();
        linker.add_function(func("foo", "int8", &["int32"]), span()).unwrap();
        linker.add_function(func("foo", "int16", &["string"]), span()).unwrap();
    }

    #[test]
    fn overload_by_width_picks_first_registered_compatible() {
        let mut linker = Linker::new();
        linker.add_function(func("foo", "void", &["int32"]), span()).unwrap();
        linker.add_function(func("foo", "void", &["uint8"]), span()).unwrap();
        let resolved = linker
            .get_function("foo", &[ty("int32")], &[true], span())
            .unwrap();
        assert_eq!(resolved.param_types[0].base, "int32");
    }

    #[test]
    fn bare_literal_matches_integer_family_param() {
        let mut linker = Linker::new();
        linker.add_function(func("foo", "void", &["int32"]), span()).unwrap();
        // a literal's inferred type is some default integer type, but the
        // `is_literal` flag makes it compatible even if that default differs.
        linker
            .get_function("foo", &[ty("uint8")], &[true], span())
            .unwrap();
    }

    #[test]
    fn float_param_rejects_integer_argument() {
        let mut linker = Linker::new();
        linker.add_function(func("foo", "void", &["float32"]), span()).unwrap();
        let err = linker
            .get_function("foo", &[ty("int32")], &[false], span())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownFunction);
    }

    #[test]
    fn unresolvable_call_is_fatal() {
        let linker = Linker::new();
        let err = linker.get_function("missing", &[], &[], span()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownFunction);
    }

    #[test]
    fn user_type_param_requires_exact_name_match() {
        let mut linker = Linker::new();
        linker.add_function(func("make", "void", &["Widget"]), span()).unwrap();
        linker
            .get_function("make", &[ty("Widget")], &[false], span())
            .unwrap();
        let err = linker
            .get_function("make", &[ty("Gadget")], &[false], span())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownFunction);
    }
}
