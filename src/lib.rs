//! Rocks is a programming language written in Rust. It is a dynamically typed language with
//! lexical scoping and first-class functions. Rocks is a tree-walk interpreter with a hand-written
//! recursive descent parser. Rocks is a hobby project and is not intended for production use.
//!
//! Rocks is a dynamically typed language. This means that the type of a variable is determined at
//! runtime. This is in contrast to statically typed languages, where the type of a variable is
//! determined at compile time. Dynamically typed languages are often easier to use, but are
//! generally slower than statically typed languages.
//!
//! Rocks is a tree-walk interpreter. This means that the interpreter walks the abstract syntax tree
//! (AST) and evaluates each node. This is in contrast to a compiler, which would convert the AST
//! into bytecode or machine code. Tree-walk interpreters are generally easier to implement than
//! compilers, but are generally slower than compilers.
//!
//! Rocks is a hobby project and is not intended for production use. The goal of this project is to
//! learn more about programming languages and interpreters. This project is inspired by the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. The scanner is implemented in the [`scanner`] module. It is
//! total: illegal characters and unterminated strings never abort the scan, they produce an
//! [`Invalid`](token::Type::Invalid) token and a recorded [`ScanError`](error::ScanError), and
//! scanning continues to the end of the source.
//!
//! ## Parsing
//! The second step is parsing: converting the token stream into an abstract syntax tree. The parser
//! is implemented in the [`parser`] module as a recursive descent parser. It filters `Invalid`
//! tokens into syntax errors before the grammar ever sees them, and uses synchronization to recover
//! from a syntax error and keep looking for more, reporting every [`ParseError`](error::ParseError)
//! it finds in one run rather than stopping at the first.
//!
//! ## Resolving
//! The third step is resolving: a static pass over the AST that binds every variable reference to a
//! lexical scope distance (written directly onto the AST node) and enforces the rules that require
//! full lexical information to check — illegal `return`/`this`/`super`, a duplicate local, a
//! self-inheriting class. The resolver is implemented in the [`resolver`] module and reports
//! [`ResolveError`](error::ResolveError)s.
//!
//! ## Interpreting
//! The final step is interpreting: walking the resolved AST and evaluating it. The interpreter is
//! implemented in the [`interpreter`] module. It owns the global environment, the environment
//! currently in scope, and the output sink that both `print` statements and runtime error
//! diagnostics are written to. Errors it cannot catch ahead of time (mostly type mismatches) are
//! reported as [`RuntimeError`](error::RuntimeError).

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::debug;

pub mod ast;
pub mod class;
pub mod config;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use error::Diagnostic;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The top-level driver: wires scanner, parser, resolver, and interpreter
/// together and tracks whether the last run hit a syntax/static error or a
/// runtime error, so the caller can map that to an exit code (spec 3).
pub struct Rocks {
    interpreter: Interpreter,
    had_error: bool,
    had_runtime_error: bool,
}

impl Rocks {
    pub fn new(output: Box<dyn Write>) -> Self {
        Rocks { interpreter: Interpreter::new(output), had_error: false, had_runtime_error: false }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn run_file(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let source = fs::read_to_string(path)?;
        self.run(&source);
        Ok(())
    }

    /// Runs one chunk of source through the full pipeline, stopping at the
    /// first stage that reports an error (a later stage can't meaningfully
    /// run over an AST with holes in it).
    pub fn run(&mut self, source: &str) {
        self.had_error = false;
        self.had_runtime_error = false;

        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        debug!("scanned {} token(s), {} scan error(s)", tokens.len(), scan_errors.len());
        if !scan_errors.is_empty() {
            self.report_all(&scan_errors);
            self.had_error = true;
            return;
        }

        let (statements, parse_errors) = Parser::new(tokens).parse();
        debug!("parsed {} statement(s), {} parse error(s)", statements.len(), parse_errors.len());
        if !parse_errors.is_empty() {
            self.report_all(&parse_errors);
            self.had_error = true;
            return;
        }

        let resolve_errors = Resolver::new().resolve(&statements);
        debug!("resolved with {} error(s)", resolve_errors.len());
        if !resolve_errors.is_empty() {
            self.report_all(&resolve_errors);
            self.had_error = true;
            return;
        }

        if let Err(runtime_error) = self.interpreter.interpret(&statements) {
            runtime_error.report(self.interpreter.output_mut());
            self.had_runtime_error = true;
        }
    }

    fn report_all<D: Diagnostic>(&mut self, diagnostics: &[D]) {
        for diagnostic in diagnostics {
            diagnostic.report(self.interpreter.output_mut());
        }
    }
}
