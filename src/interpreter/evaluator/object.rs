use std::rc::Rc;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            class::{Class, INIT_METHOD, Instance},
            core::{Closure, Value, ValueRef},
        },
    },
};

impl Context<'_> {
    /// Reads a field of the instance the object expression produces.
    pub(crate) fn eval_field_access(&mut self,
                                    object: &Expr,
                                    field: &str,
                                    line: usize,
                                    scope: &mut Closure)
                                    -> EvalResult<ValueRef> {
        let object = self.eval(object, scope)?;
        let Some(instance) = object.as_instance() else {
            return Err(RuntimeError::NotAnInstance { line });
        };
        instance.field(field).ok_or_else(|| RuntimeError::UnknownField { name: field.to_string(),
                                                                         line })
    }

    /// Calls a method on the instance the object expression produces.
    ///
    /// The receiver is evaluated first, then the arguments left to right.
    pub(crate) fn eval_method_call(&mut self,
                                   object: &Expr,
                                   method: &str,
                                   arguments: &[Expr],
                                   line: usize,
                                   scope: &mut Closure)
                                   -> EvalResult<ValueRef> {
        let object = self.eval(object, scope)?;
        let arguments = self.eval_arguments(arguments, scope)?;
        object.call_method(method, arguments, line, self)
    }

    /// Creates an instance of a class.
    ///
    /// When the class provides `__init__` with matching arity it runs
    /// against the fresh instance; otherwise the instance starts out with
    /// no fields and the arguments are discarded.
    pub(crate) fn eval_new_instance(&mut self,
                                    class: &Rc<Class>,
                                    arguments: &[Expr],
                                    line: usize,
                                    scope: &mut Closure)
                                    -> EvalResult<ValueRef> {
        let arguments = self.eval_arguments(arguments, scope)?;
        let instance = ValueRef::new(Value::Instance(Instance::new(class.clone())));

        let has_init = instance.as_instance()
                               .is_some_and(|i| i.has_method(INIT_METHOD, arguments.len()));
        if has_init {
            instance.call_method(INIT_METHOD, arguments, line, self)?;
        }

        Ok(instance)
    }

    /// Renders a value into a fresh string value, as the `str(...)` builtin
    /// does.
    pub(crate) fn eval_stringify(&mut self,
                                 expr: &Expr,
                                 line: usize,
                                 scope: &mut Closure)
                                 -> EvalResult<ValueRef> {
        let value = self.eval(expr, scope)?;
        let text = value.render(line, self)?;
        Ok(ValueRef::from(text))
    }

    /// Evaluates an argument list left to right.
    fn eval_arguments(&mut self,
                      arguments: &[Expr],
                      scope: &mut Closure)
                      -> EvalResult<Vec<ValueRef>> {
        arguments.iter().map(|argument| self.eval(argument, scope)).collect()
    }
}
