use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::LiteralValue,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::class::{Class, Instance, STR_METHOD},
    },
};

/// A mapping from names to value handles.
///
/// Closures serve both as variable scopes (one per method call, plus the
/// program-level scope) and as the field maps of class instances.
pub type Closure = HashMap<String, ValueRef>;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, method returns, and conditions.
#[derive(Debug)]
pub enum Value {
    /// The absence value, printed as `None`.
    None,
    /// An integer value (32-bit signed).
    Number(i32),
    /// A string value.
    Str(String),
    /// A boolean value, printed as `True` or `False`.
    Bool(bool),
    /// A class object, as bound by a class definition.
    Class(Rc<Class>),
    /// An instance of a user-defined class with its own field map.
    Instance(Instance),
}

/// A possibly-empty, reference-counted handle to a runtime [`Value`].
///
/// Cloning a handle shares the referent; this is how `self` is passed into
/// method calls and how values move between scopes and fields. The empty
/// handle is the result of methods without an explicit `return` and of the
/// `None` literal; it is distinct from a handle pointing at [`Value::None`],
/// although the two behave identically in every observable way.
#[derive(Debug, Clone, Default)]
pub struct ValueRef {
    data: Option<Rc<Value>>,
}

impl ValueRef {
    /// Creates the empty handle.
    #[must_use]
    pub const fn none() -> Self {
        Self { data: None }
    }

    /// Creates an owning handle to a freshly constructed value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { data: Some(Rc::new(value)) }
    }

    /// Returns the referenced value, or `None` for the empty handle.
    #[must_use]
    pub fn get(&self) -> Option<&Value> {
        self.data.as_deref()
    }

    /// Returns `true` if the handle is empty or references [`Value::None`].
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self.get(), None | Some(Value::None))
    }

    /// Returns the referenced instance, if the handle holds one.
    #[must_use]
    pub fn as_instance(&self) -> Option<&Instance> {
        match self.get() {
            Some(Value::Instance(instance)) => Some(instance),
            _ => None,
        }
    }

    /// Tests the value for truthiness.
    ///
    /// The empty handle and `None` are false; booleans are themselves;
    /// numbers are true when non-zero; strings are true when non-empty;
    /// classes and instances are always false.
    ///
    /// # Example
    /// ```
    /// use minipy::interpreter::value::core::ValueRef;
    ///
    /// assert!(ValueRef::from(5).is_true());
    /// assert!(!ValueRef::from(0).is_true());
    /// assert!(!ValueRef::none().is_true());
    /// assert!(ValueRef::from("x").is_true());
    /// assert!(!ValueRef::from("").is_true());
    /// ```
    #[must_use]
    pub fn is_true(&self) -> bool {
        match self.get() {
            Some(Value::Bool(value)) => *value,
            Some(Value::Number(value)) => *value != 0,
            Some(Value::Str(value)) => !value.is_empty(),
            None | Some(Value::None | Value::Class(_) | Value::Instance(_)) => false,
        }
    }

    /// Renders the value the way the `print` statement shows it.
    ///
    /// Numbers render in decimal, booleans as `True`/`False`, strings as
    /// their raw characters, classes as `Class <name>`, and the empty
    /// handle as `None`. An instance renders through its `__str__` method
    /// when it has one, and as an opaque identity token otherwise.
    ///
    /// # Errors
    /// Propagates any runtime error raised by a `__str__` method.
    pub fn render(&self, line: usize, ctx: &mut Context) -> EvalResult<String> {
        let Some(value) = &self.data else {
            return Ok("None".to_string());
        };

        match &**value {
            Value::None => Ok("None".to_string()),
            Value::Number(number) => Ok(number.to_string()),
            Value::Str(text) => Ok(text.clone()),
            Value::Bool(true) => Ok("True".to_string()),
            Value::Bool(false) => Ok("False".to_string()),
            Value::Class(class) => Ok(format!("Class {}", class.name())),
            Value::Instance(instance) => {
                if instance.has_method(STR_METHOD, 0) {
                    let rendered = self.call_method(STR_METHOD, Vec::new(), line, ctx)?;
                    rendered.render(line, ctx)
                } else {
                    Ok(format!("<{} object at {:p}>", instance.class().name(), Rc::as_ptr(value)))
                }
            },
        }
    }
}

impl From<Value> for ValueRef {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl From<i32> for ValueRef {
    fn from(value: i32) -> Self {
        Self::new(Value::Number(value))
    }
}

impl From<bool> for ValueRef {
    fn from(value: bool) -> Self {
        Self::new(Value::Bool(value))
    }
}

impl From<String> for ValueRef {
    fn from(value: String) -> Self {
        Self::new(Value::Str(value))
    }
}

impl From<&str> for ValueRef {
    fn from(value: &str) -> Self {
        Self::new(Value::Str(value.to_string()))
    }
}

impl From<&LiteralValue> for ValueRef {
    /// Builds the runtime value of a literal expression.
    ///
    /// The `None` literal becomes the empty handle, not a freshly allocated
    /// [`Value::None`].
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::None => Self::none(),
            LiteralValue::Number(value) => (*value).into(),
            LiteralValue::Str(text) => text.as_str().into(),
            LiteralValue::Bool(value) => (*value).into(),
        }
    }
}
