/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, executes statements and expressions,
/// performs arithmetic and logical operations, dispatches method calls, and
/// writes `print` output to the configured sink. It is the core execution
/// engine of the interpreter.
///
/// # Responsibilities
/// - Executes AST nodes against a scope and an output context.
/// - Handles variables, fields, method dispatch, and control flow.
/// - Reports runtime errors such as unknown names or division by zero.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// numbers, identifiers, operators, keywords, and the structural
/// indentation tokens. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Tracks indentation and emits `Indent`/`Dedent` tokens.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of statements
/// and expressions, resolving class names against the program's class
/// table as it goes.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
/// - Builds class objects from class definitions.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation:
/// numbers, strings, booleans, `None`, classes, and class instances. It
/// also provides the shared value handle, truthiness, rendering, method
/// resolution, and cross-type comparison.
///
/// # Responsibilities
/// - Defines the `Value` enum and the `ValueRef` handle.
/// - Implements classes, instances, and method invocation.
/// - Provides equality and ordering with operator-method dispatch.
pub mod value;
