#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer found a character sequence that is not a valid token.
    ///
    /// This covers stray characters, a `!` that is not followed by `=`,
    /// and unterminated string literals.
    UnrecognizedToken {
        /// The offending piece of source text.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A numeric literal was too large to be represented as a 32-bit integer.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A line's indentation does not fit the two-spaces-per-level scheme.
    ///
    /// Raised for odd leading-space counts and for indentation that jumps
    /// more than one level at once.
    BadIndent {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// A description of the token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An identifier was called like a class without a matching definition.
    UnknownClass {
        /// The name that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A class defines two methods with the same name.
    DuplicateMethod {
        /// The repeated method name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left-hand side of an assignment is not a variable or a field.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedToken { lexeme, line } => {
                write!(f, "Error on line {line}: Unrecognized token: {lexeme}.")
            },
            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
            Self::BadIndent { line } => write!(f,
                                               "Error on line {line}: Indentation must change by exactly two spaces per block."),
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },
            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },
            Self::UnknownClass { name, line } => {
                write!(f, "Error on line {line}: Unknown class '{name}'.")
            },
            Self::DuplicateMethod { name, line } => write!(f,
                                                           "Error on line {line}: Method '{name}' is defined twice in the same class."),
            Self::InvalidAssignmentTarget { line } => write!(f,
                                                             "Error on line {line}: Only variables and fields can be assigned to."),
        }
    }
}

impl std::error::Error for ParseError {}
