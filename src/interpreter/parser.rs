/// Core expression parsing and shared parser types.
///
/// Declares `ParseResult`, the program-level class table, and the
/// precedence-climbing expression grammar from `or` chains down to primary
/// expressions, field accesses, and method calls.
pub mod core;

/// Statement parsing.
///
/// Parses programs, assignments, `print`, `return`, conditionals, indented
/// suites, and class definitions with their methods.
pub mod statement;

/// Utility functions for parsing.
///
/// Provides token-expectation helpers and the shared comma-separated-list
/// parser.
pub mod utils;
