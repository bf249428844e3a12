use std::io::Write;

use thiserror::Error;

use crate::object::Object;
use crate::token::{Location, Token, Type};

/// Every diagnostic the pipeline can raise knows how to render itself to an
/// output sink in the stable, test-asserted format from the language spec.
/// Kept separate from `Display` (which `thiserror` still derives, for
/// interop with `std::error::Error` and ad-hoc `{}` formatting) because the
/// wire format needs a caller-supplied `Write`, not just a `Formatter`.
pub trait Diagnostic: std::fmt::Display {
    fn report(&self, out: &mut dyn Write) {
        let _ = writeln!(out, "{self}");
    }
}

/// A lexical error: an illegal character or an unterminated string/number.
/// Fatal to scanning at the point it occurs (no recovery point exists within
/// a single illegal span), but the scanner as a whole still produces a full
/// token stream by emitting an `Invalid` token and continuing past it.
#[derive(Debug, Error)]
#[error("[line {location}] Error: {message}")]
pub struct ScanError {
    pub location: Location,
    pub message: String,
}

impl Diagnostic for ScanError {}

/// A syntax error raised by the parser. Multiple may be collected in a
/// single run thanks to synchronization (see `Parser::synchronize`).
#[derive(Debug, Error)]
#[error("{}", render_at(&self.token, &self.message))]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Diagnostic for ParseError {}

/// A static error raised by the resolver: illegal `return`/`this`/`super`,
/// a duplicate local, self-inheriting class, reading a variable from its own
/// initializer, and so on.
#[derive(Debug, Error)]
#[error("{}", render_at(&self.token, &self.message))]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Diagnostic for ResolveError {}

/// A runtime error raised by the evaluator: type mismatches, arity
/// mismatches, undefined properties, stack overflow.
#[derive(Debug, Error, Clone)]
#[error("[line {line}] Runtime error at '{lexeme}': {message}", line = self.token.location.line, lexeme = self.token.lexeme, message = self.message)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Diagnostic for RuntimeError {}

fn render_at(token: &Token, message: &str) -> String {
    if token.r#type == Type::EOF {
        format!("[line {}] Error at end: {}", token.location.line, message)
    } else {
        format!("[line {}] Error at '{}': {}", token.location.line, token.lexeme, message)
    }
}

/// The non-local control-flow signals that can interrupt statement
/// execution. `Return` and `Break` are never user-visible errors; they are
/// folded into the same channel as genuine runtime errors purely so that
/// `?` can propagate all three uniformly through `exec`.
#[derive(Debug, Clone)]
pub enum ExecSignal {
    Runtime(RuntimeError),
    Return(Object),
    Break,
}

impl From<RuntimeError> for ExecSignal {
    fn from(value: RuntimeError) -> Self {
        ExecSignal::Runtime(value)
    }
}

pub type ExecResult<T> = Result<T, ExecSignal>;
