/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include malformed tokens, bad indentation, unexpected
/// tokens, unresolved class names, and any other issues detected before
/// evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include unresolved names, missing methods, type mismatches,
/// division by zero, and failed comparisons.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
