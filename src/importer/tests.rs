#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::codegen::LabelCounters;
    use crate::error::{ErrorKind, Span};
    use crate::importer::Importer;
    use crate::interner::StringInterner;
    use crate::linker::Linker;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hexagn-importer-test-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn span() -> Span {
        Span::new(1, 0, 0)
    }

    #[test]
    fn resolves_a_library_directory_and_registers_every_file() {
        let root = scratch_dir("dir");
        let lib = root.join("mathlib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("add.hxgn"), "int32 add(int32 a, int32 b) { return a + b; }").unwrap();

        let mut importer = Importer::new(vec![root]);
        let mut linker = Linker::new();
        let mut interner = StringInterner::new();
        let mut labels = LabelCounters::new();
        importer.import("mathlib", span(), &mut linker, &mut interner, &mut labels).unwrap();

        linker
            .get_function(
                "add",
                &[crate::ast::TypeRef::new("int32", false), crate::ast::TypeRef::new("int32", false)],
                &[false, false],
                span(),
            )
            .unwrap();
    }

    #[test]
    fn file_suffix_selects_a_single_file() {
        let root = scratch_dir("file-suffix");
        let lib = root.join("mathlib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("add.hxgn"), "int32 add(int32 a, int32 b) { return a + b; }").unwrap();
        fs::write(lib.join("sub.hxgn"), "int32 sub(int32 a, int32 b) { return a - b; }").unwrap();

        let mut importer = Importer::new(vec![root]);
        let mut linker = Linker::new();
        let mut interner = StringInterner::new();
        let mut labels = LabelCounters::new();
        importer
            .import("mathlib:add.hxgn", span(), &mut linker, &mut interner, &mut labels)
            .unwrap();

        linker
            .get_function(
                "add",
                &[crate::ast::TypeRef::new("int32", false), crate::ast::TypeRef::new("int32", false)],
                &[false, false],
                span(),
            )
            .unwrap();
        assert_eq!(
            linker.get_function("sub", &[crate::ast::TypeRef::new("int32", false), crate::ast::TypeRef::new("int32", false)], &[false, false], span())
                .unwrap_err()
                .kind,
            ErrorKind::UnknownFunction
        );
    }

    #[test]
    fn urcl_library_is_dispatched_to_the_directive_shim() {
        let root = scratch_dir("urcl");
        fs::write(root.join("halt.urcl"), "@FUNC halt\n@SIGNATURE void\nHLT\n@RETURN\n@END\n").unwrap();

        let mut importer = Importer::new(vec![root]);
        let mut linker = Linker::new();
        let mut interner = StringInterner::new();
        let mut labels = LabelCounters::new();
        importer.import("halt.urcl", span(), &mut linker, &mut interner, &mut labels).unwrap();
        linker.get_function("halt", &[], &[], span()).unwrap();
    }

    #[test]
    fn reimporting_the_same_library_is_a_no_op() {
        let root = scratch_dir("reimport");
        fs::write(root.join("halt.urcl"), "@FUNC halt\n@SIGNATURE void\nHLT\n@RETURN\n@END\n").unwrap();

        let mut importer = Importer::new(vec![root]);
        let mut linker = Linker::new();
        let mut interner = StringInterner::new();
        let mut labels = LabelCounters::new();
        importer.import("halt.urcl", span(), &mut linker, &mut interner, &mut labels).unwrap();
        importer.import("halt.urcl", span(), &mut linker, &mut interner, &mut labels).unwrap();
    }

    #[test]
    fn unresolvable_reference_is_a_library_not_found_error() {
        let root = scratch_dir("missing");
        let mut importer = Importer::new(vec![root]);
        let mut linker = Linker::new();
        let mut interner = StringInterner::new();
        let mut labels = LabelCounters::new();
        let err = importer
            .import("does.not.exist", span(), &mut linker, &mut interner, &mut labels)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::LibraryNotFound);
    }
}
