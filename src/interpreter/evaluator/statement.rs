use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::core::{Closure, ValueRef},
    },
};

impl Context<'_> {
    /// Binds a name in the current scope, inserting or overwriting.
    ///
    /// The assigned handle is also the statement's value.
    pub(crate) fn exec_assignment(&mut self,
                                  name: &str,
                                  value: &Expr,
                                  scope: &mut Closure)
                                  -> EvalResult<Flow> {
        let value = self.eval(value, scope)?;
        scope.insert(name.to_string(), value.clone());
        Ok(Flow::Normal(value))
    }

    /// Sets a field on the instance produced by the object expression.
    ///
    /// The field is created on first assignment; there are no field
    /// declarations.
    pub(crate) fn exec_field_assignment(&mut self,
                                        object: &Expr,
                                        field: &str,
                                        value: &Expr,
                                        line: usize,
                                        scope: &mut Closure)
                                        -> EvalResult<Flow> {
        let object = self.eval(object, scope)?;
        let value = self.eval(value, scope)?;

        let Some(instance) = object.as_instance() else {
            return Err(RuntimeError::NotAnInstance { line });
        };
        instance.set_field(field, value.clone());

        Ok(Flow::Normal(value))
    }

    /// Renders each argument, joins them with single spaces, and writes the
    /// result followed by a newline to the output sink.
    pub(crate) fn exec_print(&mut self,
                             arguments: &[Expr],
                             line: usize,
                             scope: &mut Closure)
                             -> EvalResult<Flow> {
        let mut rendered = Vec::with_capacity(arguments.len());
        for argument in arguments {
            let value = self.eval(argument, scope)?;
            rendered.push(value.render(line, self)?);
        }

        let mut text = rendered.join(" ");
        text.push('\n');
        self.write_text(&text, line)?;

        Ok(Flow::Normal(ValueRef::none()))
    }

    /// Evaluates the returned expression and raises the `Return` flow
    /// signal that unwinds the enclosing suites.
    pub(crate) fn exec_return(&mut self,
                              value: Option<&Expr>,
                              scope: &mut Closure)
                              -> EvalResult<Flow> {
        let value = match value {
            Some(expr) => self.eval(expr, scope)?,
            None => ValueRef::none(),
        };
        Ok(Flow::Return(value))
    }

    /// Tests the condition for truthiness and executes one branch.
    pub(crate) fn exec_if_else(&mut self,
                               condition: &Expr,
                               then_branch: &Statement,
                               else_branch: Option<&Statement>,
                               scope: &mut Closure)
                               -> EvalResult<Flow> {
        if self.eval(condition, scope)?.is_true() {
            self.exec(then_branch, scope)
        } else if let Some(else_branch) = else_branch {
            self.exec(else_branch, scope)
        } else {
            Ok(Flow::Normal(ValueRef::none()))
        }
    }

    /// Executes the statements of a suite in order.
    ///
    /// A `Return` outcome stops the suite immediately and propagates;
    /// otherwise the suite's value is that of its last statement.
    pub(crate) fn exec_compound(&mut self,
                                statements: &[Statement],
                                scope: &mut Closure)
                                -> EvalResult<Flow> {
        let mut last = ValueRef::none();
        for statement in statements {
            match self.exec(statement, scope)? {
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Normal(value) => last = value,
            }
        }
        Ok(Flow::Normal(last))
    }
}
