/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions:
/// arithmetic with operator-method dispatch for instances, comparisons, and
/// the short-circuit logical connectives.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context with its output
/// sink, the statement outcome type, and error propagation.
pub mod core;

/// Object expression evaluation.
///
/// Handles field accesses, method calls, class instantiation with
/// constructor dispatch, and `str(...)` rendering.
pub mod object;

/// Statement execution.
///
/// Executes assignments, `print`, `return`, conditionals, and suites, and
/// propagates the return signal through nested suites.
pub mod statement;
