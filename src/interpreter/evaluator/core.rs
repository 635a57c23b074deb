use std::io::Write;

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::value::core::{Closure, Value, ValueRef},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of executing a statement.
///
/// A `return` statement produces [`Flow::Return`], which every enclosing
/// suite passes on unchanged; method invocation converts it back into a
/// plain value at the method boundary. Everything else produces
/// [`Flow::Normal`] carrying the statement's value.
#[derive(Debug)]
pub enum Flow {
    /// The statement finished normally.
    Normal(ValueRef),
    /// A `return` was executed; the enclosing method call yields this
    /// value.
    Return(ValueRef),
}

/// Stores the runtime evaluation context.
///
/// The context owns nothing but a borrowed output sink: all program state
/// lives in scopes and in the field maps of instances, which the executing
/// statements carry and mutate. One context is created per interpreted
/// program and threaded through every evaluation, so `print` statements and
/// the methods they invoke all write to the same place.
pub struct Context<'a> {
    output: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    /// Creates an evaluation context writing to the given sink.
    pub fn new(output: &'a mut dyn Write) -> Self {
        Self { output }
    }

    /// Writes rendered text to the output sink.
    pub(crate) fn write_text(&mut self, text: &str, line: usize) -> EvalResult<()> {
        self.output
            .write_all(text.as_bytes())
            .map_err(|_| RuntimeError::OutputFailed { line })
    }

    /// Evaluates an expression and returns the resulting value handle.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on expression variant: literals,
    /// variables, field accesses, method calls, instantiations, operators,
    /// and `str(...)`.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] describing the first failure encountered.
    pub fn eval(&mut self, expr: &Expr, scope: &mut Closure) -> EvalResult<ValueRef> {
        match expr {
            Expr::Literal { value, .. } => Ok(ValueRef::from(value)),
            Expr::Variable { name, line } => {
                scope.get(name)
                     .cloned()
                     .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                    line: *line, })
            },
            Expr::FieldAccess { object, field, line } => {
                self.eval_field_access(object, field, *line, scope)
            },
            Expr::MethodCall { object,
                               method,
                               arguments,
                               line, } => {
                self.eval_method_call(object, method, arguments, *line, scope)
            },
            Expr::NewInstance { class,
                                arguments,
                                line, } => {
                self.eval_new_instance(class, arguments, *line, scope)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line, scope),
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, *line, scope),
            Expr::Stringify { expr, line } => self.eval_stringify(expr, *line, scope),
        }
    }

    /// Executes a single statement.
    ///
    /// Handles assignments, field assignments, `print`, `return`,
    /// conditional execution, suites, class definitions, and plain
    /// expression statements. Statements may modify the scope, shared
    /// instances, or the output sink.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] describing the first failure encountered.
    pub fn exec(&mut self, statement: &Statement, scope: &mut Closure) -> EvalResult<Flow> {
        match statement {
            Statement::Assignment { name, value, .. } => self.exec_assignment(name, value, scope),
            Statement::FieldAssignment { object,
                                         field,
                                         value,
                                         line, } => {
                self.exec_field_assignment(object, field, value, *line, scope)
            },
            Statement::Expression { expr, .. } => Ok(Flow::Normal(self.eval(expr, scope)?)),
            Statement::Print { arguments, line } => self.exec_print(arguments, *line, scope),
            Statement::Return { value, .. } => self.exec_return(value.as_ref(), scope),
            Statement::IfElse { condition,
                                then_branch,
                                else_branch, .. } => {
                self.exec_if_else(condition, then_branch, else_branch.as_deref(), scope)
            },
            Statement::Compound { statements, .. } => self.exec_compound(statements, scope),
            Statement::ClassDefinition { class, .. } => {
                scope.insert(class.name().to_string(), ValueRef::new(Value::Class(class.clone())));
                Ok(Flow::Normal(ValueRef::none()))
            },
        }
    }
}
