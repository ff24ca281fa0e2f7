//! # Hexagn
//!
//! A compiler for Hexagn, a small statically-typed imperative language that
//! targets URCL (a register-and-stack assembly designed as a common backend
//! for educational emulators).
//!
//! ## Pipeline
//!
//! A compile runs through these stages, each returning `Result` so the
//! driver can stop at the first fatal diagnostic:
//!
//! 1. **Lexer** (`lexer`) - source text to a flat token buffer
//! 2. **Parser** (`parser`) - tokens to an AST (`ast`), via a `TokenBuffer`
//!    cursor (`token_buffer`)
//! 3. **Code Generator** (`codegen`) - AST to URCL text, registering
//!    functions into a `Linker` and interning string literals
//! 4. **Importer** (`importer`) - resolves `import` statements against a
//!    library search path mid-compile
//!
//! `source` holds the comment/tab-stripped text and renders diagnostics;
//! `driver` wires all of the above behind a `clap` CLI.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hexagn::codegen::generate;
//! use hexagn::interner::StringInterner;
//! use hexagn::lexer::tokenize;
//! use hexagn::linker::Linker;
//! use hexagn::parser::parse;
//!
//! let source = std::fs::read_to_string("program.hxgn").unwrap();
//! let tokens = tokenize(&source).unwrap();
//! let program = parse(tokens).unwrap();
//!
//! let mut linker = Linker::new();
//! let mut interner = StringInterner::new();
//! let urcl = generate(&program, &mut linker, &mut interner, true, true, None, None).unwrap();
//! println!("{urcl}");
//! ```

pub mod ast;
pub mod codegen;
pub mod driver;
pub mod error;
pub mod importer;
pub mod interner;
pub mod lexer;
pub mod linker;
pub mod parser;
pub mod source;
pub mod token_buffer;
pub mod varstack;
