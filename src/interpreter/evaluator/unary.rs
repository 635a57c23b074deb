use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Closure, Value, ValueRef},
    },
};

impl Context<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: arithmetic negation of a number (checked, so negating
    ///   the most negative 32-bit integer overflows).
    /// - `Not`: logical negation via truthiness, producing a boolean.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                line: usize,
                                scope: &mut Closure)
                                -> EvalResult<ValueRef> {
        let value = self.eval(expr, scope)?;

        match op {
            UnaryOperator::Negate => match value.get() {
                Some(Value::Number(number)) => {
                    let negated = number.checked_neg().ok_or(RuntimeError::Overflow { line })?;
                    Ok(ValueRef::from(negated))
                },
                _ => Err(RuntimeError::TypeError { details: "only numbers can be negated".to_string(),
                                                   line }),
            },
            UnaryOperator::Not => Ok(ValueRef::from(!value.is_true())),
        }
    }
}
