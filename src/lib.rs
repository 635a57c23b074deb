//! # minipy
//!
//! minipy is an interpreter for MiniPy, a small dynamically-typed,
//! indentation-structured scripting language. It supports integers,
//! strings, booleans and `None`, user-defined classes with single
//! inheritance, method dispatch by name, arithmetic and comparison
//! operators, `if`/`else`, and a `print` statement.

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

use std::io::Write;

use crate::interpreter::{
    evaluator::core::Context,
    lexer::Lexer,
    parser::{core::ClassTable, statement::parse_program},
    value::core::Closure,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source locations to AST nodes for error reporting.
/// - Carries the classes built by the parser into evaluation.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and
/// source lines for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code evaluation. It exposes the
/// public API for interpreting programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Interprets a complete program against an output sink.
///
/// The source is tokenized, parsed into a statement list, and executed in
/// order against a fresh program-level scope. Everything the program
/// `print`s is written to `output`.
///
/// # Errors
/// Returns an error if lexing, parsing, or evaluation fails. The first
/// failure aborts execution; statements already executed keep their effects
/// on the output.
///
/// # Examples
/// ```
/// use minipy::run_program;
///
/// let mut output = Vec::new();
/// run_program("print 1 + 2", &mut output).unwrap();
/// assert_eq!(output, b"3\n");
///
/// // Unknown variables are runtime errors.
/// let mut output = Vec::new();
/// let result = run_program("print x", &mut output);
/// assert!(result.is_err());
/// ```
pub fn run_program(source: &str,
                   output: &mut dyn Write)
                   -> Result<(), Box<dyn std::error::Error>> {
    let lexer = Lexer::new(source)?;
    let tokens: Vec<_> = lexer.collect();

    let mut iter = tokens.iter().peekable();
    let mut classes = ClassTable::new();
    let program = parse_program(&mut iter, &mut classes)?;

    let mut context = Context::new(output);
    let mut scope = Closure::new();
    for statement in &program {
        context.exec(statement, &mut scope)?;
    }

    Ok(())
}
