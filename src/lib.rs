//! # xlang
//!
//! xlang is an interpreter for a minimal line-oriented arithmetic language
//! written in Rust. Source text is tokenized, split into statements, built
//! into expression trees by precedence-aware splitting, and evaluated against
//! a run-scoped variable store.
//!
//! Every phase is fail-soft: problems are collected as diagnostics instead of
//! aborting, and the caller decides after each phase whether to go on.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{self, Write};

use thiserror::Error;

use crate::{
    error::Diagnostics,
    interpreter::{
        evaluator::{self, store::VariableStore},
        lexer::tokenize,
        parser::core::build,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` types that represent the
/// syntactic structure of a program as a tree, and the `BinaryOperator` enum
/// with its precedence tiers. The tree is built by the parser and traversed
/// by the evaluator.
pub mod ast;
/// Provides the diagnostic and error types of every phase.
///
/// Lexical and syntax problems are collected as positioned `Diagnostic`s;
/// evaluation failures are `RuntimeError`s that cancel a single statement.
///
/// # Responsibilities
/// - Defines the diagnostic message templates.
/// - Attaches row and column positions for user feedback.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, statement building, evaluation and value
/// representations. Each phase is exposed on its own so callers can inspect
/// the diagnostics in between.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// Conversions between `i64` and `f64` that fail instead of silently losing
/// data.
pub mod util;

/// Decides whether a run continues past a phase that reported diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gate {
    /// Stop after the first phase that reports anything.
    #[default]
    Strict,
    /// Always continue with whatever the previous phase produced.
    KeepGoing,
}

/// Why a run did not complete.
#[derive(Error, Debug)]
pub enum InterpretError {
    #[error("{0}")]
    Lex(Diagnostics),
    #[error("{0}")]
    Syntax(Diagnostics),
    #[error("failed to write program output: {0}")]
    Io(#[from] io::Error),
}

impl InterpretError {
    /// The diagnostics that stopped the run, if a phase gate stopped it.
    #[must_use]
    pub const fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Lex(diagnostics) | Self::Syntax(diagnostics) => Some(diagnostics),
            Self::Io(_) => None,
        }
    }
}

/// The state left behind by a completed run.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Variables as they stood after the last statement.
    pub store:       VariableStore,
    /// Lexical and syntax diagnostics the run went past. Always empty under
    /// [`Gate::Strict`].
    pub diagnostics: Diagnostics,
}

/// Runs a program with the default gate.
///
/// Values, print traces and runtime error messages are written to `out`.
///
/// # Errors
/// Returns the lexical or syntax diagnostics if either phase reported any,
/// or the I/O error if writing to `out` failed.
///
/// # Examples
/// ```
/// use xlang::{get_result, interpreter::value::core::Value};
///
/// let mut out = Vec::new();
/// let outcome = get_result("x = 20 + 4\nprint x / 5", &mut out).unwrap();
///
/// assert_eq!(outcome.store.get("x"), Some(Value::Integer(24)));
/// assert_eq!(String::from_utf8(out).unwrap(), "(24 / 5) = 4\n4\n");
///
/// // Unclosed parentheses stop the run before anything is evaluated.
/// let err = get_result("print (1 + 2", &mut Vec::new()).unwrap_err();
/// assert_eq!(err.to_string(), "waiting parentheses to close");
/// ```
pub fn get_result(source: &str, out: &mut dyn Write) -> Result<Outcome, InterpretError> {
    get_result_with(source, out, Gate::Strict)
}

/// Runs a program, consulting `gate` after tokenizing and after building.
///
/// # Errors
/// See [`get_result`]. Under [`Gate::KeepGoing`] only output failures are
/// errors.
#[tracing::instrument(level = "debug", skip_all, fields(gate = ?gate))]
pub fn get_result_with(source: &str,
                       out: &mut dyn Write,
                       gate: Gate)
                       -> Result<Outcome, InterpretError> {
    let mut outcome = Outcome::default();

    let (tokens, lex_diagnostics) = tokenize(source);
    if !lex_diagnostics.is_empty() {
        if gate == Gate::Strict {
            return Err(InterpretError::Lex(lex_diagnostics));
        }
        outcome.diagnostics.extend(lex_diagnostics);
    }

    let (statements, syntax_diagnostics) = build(&tokens);
    if !syntax_diagnostics.is_empty() {
        if gate == Gate::Strict {
            return Err(InterpretError::Syntax(syntax_diagnostics));
        }
        outcome.diagnostics.extend(syntax_diagnostics);
    }

    evaluator::core::run(&statements, &mut outcome.store, out)?;
    out.flush()?;

    Ok(outcome)
}
