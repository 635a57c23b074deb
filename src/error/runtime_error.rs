#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to read a variable that is not bound in the current scope.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to read a field that was never assigned on the instance.
    UnknownField {
        /// The name of the field.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A field access or method call was applied to a non-instance value.
    NotAnInstance {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a method the receiver's class does not provide, or called it
    /// with the wrong number of arguments.
    UnknownMethod {
        /// The name of the method.
        method: String,
        /// The name of the receiver's class.
        class:  String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Two values cannot be compared with the requested relation.
    CannotCompare {
        /// The relation that failed: `"equality"` or `"less"`.
        what: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator was applied to operands of incompatible types.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed the 32-bit integer range.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing to the configured output sink failed.
    OutputFailed {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            },
            Self::UnknownField { name, line } => {
                write!(f, "Error on line {line}: Unknown field '{name}'.")
            },
            Self::NotAnInstance { line } => {
                write!(f, "Error on line {line}: Only class instances have fields and methods.")
            },
            Self::UnknownMethod { method, class, line } => write!(f,
                                                                  "Error on line {line}: There is no method {method} in the class {class}."),
            Self::CannotCompare { what, line } => {
                write!(f, "Error on line {line}: Cannot compare objects for {what}.")
            },
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result."),
            Self::OutputFailed { line } => {
                write!(f, "Error on line {line}: Failed to write to the output stream.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
