use crate::{
    evaluate,
    interpreter::{
        evaluator::{
            context::Context,
            function::core::{Arity, arity_mismatch},
        },
        value::{core::Value, operations::Operations, undefined::Undefined},
    },
};

/// The number of characters in a string, or of values in a multi-value.
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::function::text::len, value::core::Value};
///
/// assert_eq!(len(&[Value::from("héllo")]), Value::from(5));
/// assert!(len(&[Value::from(12)]).is_undefined());
/// ```
#[must_use]
pub fn len(args: &[Value]) -> Value {
    let [value] = args else {
        return arity_mismatch("len", Arity::Exact(1), args.len());
    };

    let count = match value {
        Value::String(text) => text.raw().chars().count(),
        Value::Multi(multi) => multi.values().len(),
        other => return Undefined::new(format!("len expects a string, got {other}")).into(),
    };

    u32::try_from(count).map_or_else(|_| Undefined::new("len result is too large").into(),
                                      Value::from)
}

/// Evaluates the text of its argument as an expression.
///
/// The nested evaluation sees an empty context: variables, host functions
/// and objects of the calling expression are not visible to it.
///
/// # Example
/// ```
/// use tally::{evaluate, interpreter::{evaluator::context::Context, value::core::Value}};
///
/// assert_eq!(evaluate("eval(\"7+22\")*2", &Context::new()), Value::from(58));
/// ```
#[must_use]
pub fn eval(args: &[Value]) -> Value {
    let [value] = args else {
        return arity_mismatch("eval", Arity::Exact(1), args.len());
    };

    match value.string_view() {
        Some(text) => evaluate(&text, &Context::default()),
        None => Undefined::new(format!("eval expects a string, got {value}")).into(),
    }
}
