use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            class::{ADD_METHOD, DIV_METHOD, MULT_METHOD, SUB_METHOD},
            compare,
            core::{Closure, Value, ValueRef},
        },
    },
};

impl Context<'_> {
    /// Evaluates a binary operation.
    ///
    /// `and` and `or` are handled first because they must not evaluate
    /// their right operand unless the left one fails to decide the result.
    /// All other operators evaluate both operands left to right and
    /// dispatch on their values.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 line: usize,
                                 scope: &mut Closure)
                                 -> EvalResult<ValueRef> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(left, op, right, scope);
        }

        let left = self.eval(left, scope)?;
        let right = self.eval(right, scope)?;

        match op {
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div => self.eval_arithmetic(op, &left, &right, line),
            _ => {
                let result = self.eval_comparison(op, &left, &right, line)?;
                Ok(ValueRef::from(result))
            },
        }
    }

    /// Evaluates a short-circuit `and`/`or` and returns the handle of the
    /// operand that decided the result.
    fn eval_logic(&mut self,
                  left: &Expr,
                  op: BinaryOperator,
                  right: &Expr,
                  scope: &mut Closure)
                  -> EvalResult<ValueRef> {
        let left = self.eval(left, scope)?;
        let decided = match op {
            BinaryOperator::And => !left.is_true(),
            BinaryOperator::Or => left.is_true(),
            _ => unreachable!("eval_logic used with non logic operator"),
        };

        if decided {
            return Ok(left);
        }
        self.eval(right, scope)
    }

    /// Evaluates an arithmetic operation on two values.
    ///
    /// Two numbers use checked 32-bit integer arithmetic; `+` additionally
    /// concatenates two strings. When the left operand is a class instance,
    /// the operation dispatches to its `__add__`/`__sub__`/`__mult__`/
    /// `__div__` method with the right operand as the single argument.
    fn eval_arithmetic(&mut self,
                       op: BinaryOperator,
                       left: &ValueRef,
                       right: &ValueRef,
                       line: usize)
                       -> EvalResult<ValueRef> {
        match (left.get(), right.get()) {
            (Some(Value::Number(a)), Some(Value::Number(b))) => {
                let result = match op {
                    BinaryOperator::Add => a.checked_add(*b),
                    BinaryOperator::Sub => a.checked_sub(*b),
                    BinaryOperator::Mul => a.checked_mul(*b),
                    BinaryOperator::Div => {
                        if *b == 0 {
                            return Err(RuntimeError::DivisionByZero { line });
                        }
                        a.checked_div(*b)
                    },
                    _ => unreachable!("eval_arithmetic used with non arithmetic operator"),
                };
                Ok(ValueRef::from(result.ok_or(RuntimeError::Overflow { line })?))
            },
            (Some(Value::Str(a)), Some(Value::Str(b))) if op == BinaryOperator::Add => {
                Ok(ValueRef::from(format!("{a}{b}")))
            },
            _ => {
                let method = arithmetic_method(op);
                if let Some(instance) = left.as_instance()
                   && instance.has_method(method, 1)
                {
                    return left.call_method(method, vec![right.clone()], line, self);
                }
                Err(RuntimeError::TypeError { details: format!("unsupported operands for '{op}'"),
                                              line })
            },
        }
    }

    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Equality and ordering are delegated to the comparison functions of
    /// the value model; the remaining relations are derived from those two.
    pub(crate) fn eval_comparison(&mut self,
                                  op: BinaryOperator,
                                  left: &ValueRef,
                                  right: &ValueRef,
                                  line: usize)
                                  -> EvalResult<bool> {
        match op {
            BinaryOperator::Equal => compare::equal(left, right, line, self),
            BinaryOperator::NotEqual => compare::not_equal(left, right, line, self),
            BinaryOperator::Less => compare::less(left, right, line, self),
            BinaryOperator::Greater => compare::greater(left, right, line, self),
            BinaryOperator::LessEqual => compare::less_or_equal(left, right, line, self),
            BinaryOperator::GreaterEqual => compare::greater_or_equal(left, right, line, self),
            _ => unreachable!("eval_comparison used with non comparison operator"),
        }
    }
}

/// Maps an arithmetic operator to the method an instance operand dispatches
/// to.
const fn arithmetic_method(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Add => ADD_METHOD,
        BinaryOperator::Sub => SUB_METHOD,
        BinaryOperator::Mul => MULT_METHOD,
        BinaryOperator::Div => DIV_METHOD,
        _ => unreachable!(),
    }
}
