/// Classes, methods, and instances.
///
/// Defines the `Class`, `Method`, and `Instance` types, method resolution
/// along the inheritance chain, and method invocation with its fresh call
/// scope. The names of the special methods the evaluator dispatches to
/// (`__init__`, `__str__`, `__eq__`, ...) live here as constants.
pub mod class;
/// Comparison functions over runtime values.
///
/// Implements equality and ordering for booleans, numbers, and strings,
/// delegation to `__eq__`/`__lt__` for class instances, and the comparisons
/// derived from those two primitives.
pub mod compare;

pub mod core;
