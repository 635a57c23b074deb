use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            class::{EQ_METHOD, LT_METHOD},
            core::{Value, ValueRef},
        },
    },
};

/// Tests two values for equality.
///
/// Two none values (empty handles or `None`) are equal. Booleans, numbers,
/// and strings compare by payload when both sides have the same type. When
/// the left operand is a class instance providing `__eq__` with one
/// parameter, the comparison is delegated to it and its result must be a
/// boolean.
///
/// # Errors
/// [`RuntimeError::CannotCompare`] for any other combination of operands;
/// [`RuntimeError::TypeError`] if a `__eq__` method returns a non-boolean.
pub fn equal(lhs: &ValueRef, rhs: &ValueRef, line: usize, ctx: &mut Context) -> EvalResult<bool> {
    if lhs.is_none() && rhs.is_none() {
        return Ok(true);
    }

    match (lhs.get(), rhs.get()) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => Ok(a == b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => Ok(a == b),
        (Some(Value::Str(a)), Some(Value::Str(b))) => Ok(a == b),
        _ => {
            if let Some(instance) = lhs.as_instance()
               && instance.has_method(EQ_METHOD, 1)
            {
                let result = lhs.call_method(EQ_METHOD, vec![rhs.clone()], line, ctx)?;
                return dunder_bool(&result, EQ_METHOD, line);
            }
            Err(RuntimeError::CannotCompare { what: "equality",
                                              line })
        },
    }
}

/// Tests whether `lhs` orders strictly before `rhs`.
///
/// Booleans, numbers, and strings compare by payload when both sides have
/// the same type. When the left operand is a class instance providing
/// `__lt__` with one parameter, the comparison is delegated to it.
///
/// # Errors
/// [`RuntimeError::CannotCompare`] if either operand is none or the
/// combination of operand types is not ordered.
pub fn less(lhs: &ValueRef, rhs: &ValueRef, line: usize, ctx: &mut Context) -> EvalResult<bool> {
    if lhs.is_none() || rhs.is_none() {
        return Err(RuntimeError::CannotCompare { what: "less", line });
    }

    match (lhs.get(), rhs.get()) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => Ok(a < b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => Ok(a < b),
        (Some(Value::Str(a)), Some(Value::Str(b))) => Ok(a < b),
        _ => {
            if let Some(instance) = lhs.as_instance()
               && instance.has_method(LT_METHOD, 1)
            {
                let result = lhs.call_method(LT_METHOD, vec![rhs.clone()], line, ctx)?;
                return dunder_bool(&result, LT_METHOD, line);
            }
            Err(RuntimeError::CannotCompare { what: "less", line })
        },
    }
}

/// Tests two values for inequality: the negation of [`equal`].
pub fn not_equal(lhs: &ValueRef,
                 rhs: &ValueRef,
                 line: usize,
                 ctx: &mut Context)
                 -> EvalResult<bool> {
    Ok(!equal(lhs, rhs, line, ctx)?)
}

/// Tests whether `lhs` orders strictly after `rhs`: neither less nor equal.
pub fn greater(lhs: &ValueRef, rhs: &ValueRef, line: usize, ctx: &mut Context) -> EvalResult<bool> {
    Ok(!less(lhs, rhs, line, ctx)? && !equal(lhs, rhs, line, ctx)?)
}

/// Tests whether `lhs` orders before `rhs` or equals it.
pub fn less_or_equal(lhs: &ValueRef,
                     rhs: &ValueRef,
                     line: usize,
                     ctx: &mut Context)
                     -> EvalResult<bool> {
    Ok(less(lhs, rhs, line, ctx)? || equal(lhs, rhs, line, ctx)?)
}

/// Tests whether `lhs` does not order strictly before `rhs`.
pub fn greater_or_equal(lhs: &ValueRef,
                        rhs: &ValueRef,
                        line: usize,
                        ctx: &mut Context)
                        -> EvalResult<bool> {
    Ok(!less(lhs, rhs, line, ctx)?)
}

/// Coerces the result of a comparison method to a boolean.
fn dunder_bool(result: &ValueRef, method: &str, line: usize) -> EvalResult<bool> {
    match result.get() {
        Some(Value::Bool(value)) => Ok(*value),
        _ => Err(RuntimeError::TypeError { details: format!("{method} must return a boolean"),
                                           line }),
    }
}
