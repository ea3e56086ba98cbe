use crate::interpreter::{
    evaluator::function::core::{Arity, arity_mismatch, number_arg, settle},
    value::core::Value,
};

/// Computes the minimum or maximum of one or more numeric values.
///
/// The operation is selected by the `name` parameter, which must be `"min"` or
/// `"max"`. Any argument without a numeric view makes the result `Undefined`.
///
/// # Parameters
/// - `name`: Either `"min"` or `"max"`.
/// - `args`: At least one argument.
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::function::min_max::min_max, value::core::Value};
///
/// let args = [Value::from(3), Value::from(-7), Value::from("12")];
/// assert_eq!(min_max("min", &args), Value::from(-7));
/// assert_eq!(min_max("max", &args), Value::from(12));
/// ```
#[must_use]
pub fn min_max(name: &str, args: &[Value]) -> Value {
    settle(extreme(name, args))
}

fn extreme(name: &str, args: &[Value]) -> Result<Value, Value> {
    let Some((first, rest)) = args.split_first() else {
        return Err(arity_mismatch(name, Arity::AtLeast(1), 0));
    };

    let mut best = number_arg(name, first)?;
    for arg in rest {
        let candidate = number_arg(name, arg)?;
        let better = if name == "min" { candidate < best } else { candidate > best };
        if better {
            best = candidate;
        }
    }
    Ok(Value::from(best))
}
