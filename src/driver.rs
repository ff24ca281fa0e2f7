//! # Driver
//!
//! Orchestrates one full compile: read the source file, strip comments and
//! tabs, lex, parse, generate URCL (wiring in the Linker, String Interner,
//! and Importer), then write the result. `main.rs` stays a thin CLI shim —
//! the same split the teacher keeps between its library pipeline and its
//! `main.rs`'s argument handling + error printing — just with `clap` doing
//! the argument handling instead of hand-rolled `env::args()`.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::codegen::generate;
use crate::error::HResult;
use crate::importer::Importer;
use crate::interner::StringInterner;
use crate::lexer::tokenize;
use crate::linker::Linker;
use crate::parser::parse;
use crate::source::SourceBuffer;

/// `hexagn <input.hxgn> [-o <output.urcl>] [-g] [-L <path>]... [--no-main]` (spec §6).
#[derive(Debug, Parser)]
#[command(name = "hexagn", version, about = "Compiler for Hexagn, a small statically-typed language that emits URCL")]
pub struct Cli {
    /// Hexagn source file to compile
    pub input: PathBuf,

    /// Output file path
    #[arg(short = 'o', long = "output", default_value = "out.urcl")]
    pub output: PathBuf,

    /// Emit `// <source-line>` comments before each generated instruction
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,

    /// Append a library search path (repeatable)
    #[arg(short = 'L', long = "lib-path")]
    pub lib_paths: Vec<PathBuf>,

    /// Suppress the program header and entry call, for library compilation
    #[arg(long = "no-main")]
    pub no_main: bool,
}

/// Run a compile and return the process exit code: `0` on success, nonzero
/// on any fatal diagnostic (spec §6).
pub fn run(cli: &Cli) -> ExitCode {
    match run_inner(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run_inner(cli: &Cli) -> Result<(), String> {
    let raw = fs::read_to_string(&cli.input).map_err(|e| format!("Could not read '{}': {e}", cli.input.display()))?;
    let source = SourceBuffer::new(&raw);

    let urcl: HResult<String> = (|| {
        let tokens = tokenize(&source.text())?;
        let program = parse(tokens)?;

        let mut linker = Linker::new();
        let mut interner = StringInterner::new();
        let mut importer = Importer::with_defaults(cli.lib_paths.clone());
        let debug_source = if cli.debug { Some(&source) } else { None };

        generate(&program, &mut linker, &mut interner, !cli.no_main, true, Some(&mut importer), debug_source)
    })();

    let urcl = urcl.map_err(|e| source.render(&e))?;
    fs::write(&cli.output, urcl).map_err(|e| format!("Could not write '{}': {e}", cli.output.display()))?;
    Ok(())
}
