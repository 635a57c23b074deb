use std::{
    cell::{OnceCell, RefCell},
    rc::Rc,
};

use crate::{
    ast::Statement,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::core::{Closure, ValueRef},
    },
};

/// The method invoked when an instance is constructed.
pub const INIT_METHOD: &str = "__init__";
/// The method invoked to render an instance for `print` and `str(...)`.
pub const STR_METHOD: &str = "__str__";
/// The method invoked for `==` when the left operand is an instance.
pub const EQ_METHOD: &str = "__eq__";
/// The method invoked for `<` when the left operand is an instance.
pub const LT_METHOD: &str = "__lt__";
/// The method invoked for `+` when the left operand is an instance.
pub const ADD_METHOD: &str = "__add__";
/// The method invoked for `-` when the left operand is an instance.
pub const SUB_METHOD: &str = "__sub__";
/// The method invoked for `*` when the left operand is an instance.
pub const MULT_METHOD: &str = "__mult__";
/// The method invoked for `/` when the left operand is an instance.
pub const DIV_METHOD: &str = "__div__";

/// The name under which the receiver is bound inside a method body.
const SELF_NAME: &str = "self";

/// A method of a user-defined class.
#[derive(Debug, Clone)]
pub struct Method {
    /// The method name.
    pub name:          String,
    /// The parameter names, not including the implicit `self`.
    pub formal_params: Vec<String>,
    /// The suite executed when the method is called.
    pub body:          Statement,
}

/// A user-defined class: a name, the methods defined on it, and an optional
/// base class.
///
/// Classes are built by the parser, registered in the program-level class
/// table, and shared by reference between the AST, `Class` values in scope,
/// and every instance. The method list is attached once the class body is
/// parsed: the class registers under its name first, so methods can
/// instantiate their own class.
#[derive(Debug)]
pub struct Class {
    name:    String,
    methods: OnceCell<Vec<Method>>,
    parent:  Option<Rc<Class>>,
}

impl Class {
    /// Creates a class whose methods are not attached yet.
    #[must_use]
    pub fn new(name: String, parent: Option<Rc<Self>>) -> Self {
        Self { name,
               methods: OnceCell::new(),
               parent }
    }

    /// Attaches the parsed method list. Happens exactly once per class.
    pub fn define_methods(&self, methods: Vec<Method>) {
        self.methods
            .set(methods)
            .unwrap_or_else(|_| unreachable!("methods are attached exactly once"));
    }

    /// Returns the class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks a method up by name, walking the inheritance chain.
    ///
    /// Methods defined on the class itself shadow inherited ones of the
    /// same name.
    #[must_use]
    pub fn get_method(&self, name: &str) -> Option<&Method> {
        let own = self.methods
                      .get()
                      .into_iter()
                      .flatten()
                      .find(|method| method.name == name);
        if let Some(found) = own {
            return Some(found);
        }
        self.parent.as_ref().and_then(|parent| parent.get_method(name))
    }
}

/// An instance of a user-defined [`Class`].
///
/// The field map starts empty and grows on first assignment to each field.
/// It uses interior mutability because instances are shared by reference
/// between scopes and other instances' fields.
#[derive(Debug)]
pub struct Instance {
    class:  Rc<Class>,
    fields: RefCell<Closure>,
}

impl Instance {
    /// Creates an instance of `class` with no fields set.
    #[must_use]
    pub fn new(class: Rc<Class>) -> Self {
        Self { class,
               fields: RefCell::new(Closure::new()), }
    }

    /// Returns the defining class.
    #[must_use]
    pub const fn class(&self) -> &Rc<Class> {
        &self.class
    }

    /// Returns `true` if the class provides `name` with exactly
    /// `argument_count` formal parameters.
    #[must_use]
    pub fn has_method(&self, name: &str, argument_count: usize) -> bool {
        self.class
            .get_method(name)
            .is_some_and(|method| method.formal_params.len() == argument_count)
    }

    /// Reads a field, or `None` if it was never assigned.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<ValueRef> {
        self.fields.borrow().get(name).cloned()
    }

    /// Creates or overwrites a field.
    pub fn set_field(&self, name: &str, value: ValueRef) {
        self.fields.borrow_mut().insert(name.to_string(), value);
    }
}

impl ValueRef {
    /// Calls a method on the referenced instance.
    ///
    /// The method body runs against a fresh scope holding `self` (a shared
    /// handle to the receiver) and the formal parameters bound to the
    /// actual arguments by position. The call's result is the value of the
    /// first `return` executed, or `None` if the body finishes without one.
    ///
    /// # Errors
    /// - [`RuntimeError::NotAnInstance`] if the handle does not reference a
    ///   class instance.
    /// - [`RuntimeError::UnknownMethod`] if the class does not provide the
    ///   method, or provides it with a different number of parameters.
    /// - Any runtime error raised by the method body.
    pub fn call_method(&self,
                       method: &str,
                       arguments: Vec<Self>,
                       line: usize,
                       ctx: &mut Context)
                       -> EvalResult<Self> {
        let Some(instance) = self.as_instance() else {
            return Err(RuntimeError::NotAnInstance { line });
        };

        let no_such_method = || RuntimeError::UnknownMethod { method: method.to_string(),
                                                              class:  instance.class()
                                                                              .name()
                                                                              .to_string(),
                                                              line };

        let Some(found) = instance.class().get_method(method) else {
            return Err(no_such_method());
        };
        if found.formal_params.len() != arguments.len() {
            return Err(no_such_method());
        }

        let mut closure = Closure::new();
        closure.insert(SELF_NAME.to_string(), self.clone());
        for (param, argument) in found.formal_params.iter().zip(arguments) {
            closure.insert(param.clone(), argument);
        }

        match ctx.exec(&found.body, &mut closure)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal(_) => Ok(Self::none()),
        }
    }
}
