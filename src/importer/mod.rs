//! # Importer
//!
//! Resolves an `import a.b.c[:file]` reference against a search path and
//! folds the referenced library into the current compilation's `Linker`/
//! `StringInterner` (spec §4.6). Two library formats are supported: ordinary
//! Hexagn source (`.hxgn`, parsed through the normal front end) and a
//! lightweight directive shim (`.urcl`) for libraries that just want to wrap
//! hand-written URCL in a callable signature.

#[cfg(test)]
mod tests;
pub mod urcl_shim;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::{generate_unit, CodeGenerator, ImportResolver, LabelCounters};
use crate::error::{ErrorKind, HResult, HexagnError, Span};
use crate::interner::StringInterner;
use crate::lexer::tokenize;
use crate::linker::Linker;
use crate::parser::parse;

pub struct Importer {
    search_paths: Vec<PathBuf>,
    imported: HashSet<PathBuf>,
}

impl Importer {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            imported: HashSet::new(),
        }
    }

    /// The two built-in search paths (spec §6): a platform-specific
    /// standard location and `./hexagn-stdlib/` relative to the cwd.
    pub fn with_defaults(extra: Vec<PathBuf>) -> Self {
        let mut search_paths = vec![default_stdlib_path(), PathBuf::from("hexagn-stdlib")];
        search_paths.extend(extra);
        Self::new(search_paths)
    }

    /// Resolve `a.b.c[:file]` against the search path: `.` becomes the path
    /// separator, `:file` (if present) is appended as `/file`; the first
    /// search-path entry where the join exists wins.
    fn resolve_path(&self, reference: &str, span: Span) -> HResult<PathBuf> {
        let (dotted, file) = match reference.split_once(':') {
            Some((d, f)) => (d, Some(f)),
            None => (reference, None),
        };
        let mut rel = PathBuf::new();
        for part in dotted.split('.') {
            rel.push(part);
        }
        if let Some(f) = file {
            rel.push(f);
        }

        self.search_paths
            .iter()
            .map(|base| base.join(&rel))
            .find(|candidate| candidate.exists())
            .ok_or_else(|| {
                HexagnError::new(
                    ErrorKind::LibraryNotFound,
                    format!("Could not find library '{reference}' on any search path"),
                    span,
                )
            })
    }

    /// Import `reference`, folding every function it defines into `linker`/
    /// `interner`. A re-import of an already-resolved absolute path is a
    /// silent no-op.
    pub fn import(
        &mut self,
        reference: &str,
        span: Span,
        linker: &mut Linker,
        interner: &mut StringInterner,
        labels: &mut LabelCounters,
    ) -> HResult<()> {
        let resolved = self.resolve_path(reference, span)?;
        let absolute = fs::canonicalize(&resolved).unwrap_or(resolved.clone());
        if self.imported.contains(&absolute) {
            return Ok(());
        }
        self.imported.insert(absolute);

        if resolved.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(&resolved)
                .map_err(|e| io_error(&resolved, &e, span))?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_file())
                .collect();
            entries.sort();
            for file in entries {
                self.import_file(&file, span, linker, interner, labels)?;
            }
            Ok(())
        } else {
            self.import_file(&resolved, span, linker, interner, labels)
        }
    }

    fn import_file(
        &mut self,
        path: &Path,
        span: Span,
        linker: &mut Linker,
        interner: &mut StringInterner,
        labels: &mut LabelCounters,
    ) -> HResult<()> {
        let source = fs::read_to_string(path).map_err(|e| io_error(path, &e, span))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("hxgn") => {
                let tokens = tokenize(&source)?;
                let program = parse(tokens)?;
                let mut gen = CodeGenerator::for_library(linker, interner, labels, Some(self));
                generate_unit(&program, &mut gen)
            }
            Some("urcl") => urcl_shim::import_shim(&source, linker, span),
            other => Err(HexagnError::new(
                ErrorKind::UnknownExtension,
                format!("Unsupported library extension '{}' for '{}'", other.unwrap_or(""), path.display()),
                span,
            )),
        }
    }
}

impl ImportResolver for Importer {
    fn resolve(
        &mut self,
        reference: &str,
        span: Span,
        linker: &mut Linker,
        interner: &mut StringInterner,
        labels: &mut LabelCounters,
    ) -> HResult<()> {
        self.import(reference, span, linker, interner, labels)
    }
}

fn io_error(path: &Path, err: &std::io::Error, span: Span) -> HexagnError {
    HexagnError::new(
        ErrorKind::LibraryNotFound,
        format!("Could not read '{}': {err}", path.display()),
        span,
    )
}

#[cfg(target_os = "windows")]
fn default_stdlib_path() -> PathBuf {
    PathBuf::from(std::env::var("PROGRAMDATA").unwrap_or_else(|_| "C:\\ProgramData".to_string())).join("hexagn").join("stdlib")
}

#[cfg(not(target_os = "windows"))]
fn default_stdlib_path() -> PathBuf {
    PathBuf::from("/usr/local/share/hexagn/stdlib")
}
