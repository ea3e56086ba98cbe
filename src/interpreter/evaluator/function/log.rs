use bigdecimal::BigDecimal;

use crate::{
    interpreter::{
        evaluator::function::core::{Arity, arity_mismatch, number_arg, settle},
        value::{core::Value, undefined::Undefined},
    },
    util::num,
};

/// Results closer than `10^-SNAP_DIGITS` to an integer are taken to be that
/// integer.
const SNAP_DIGITS: i64 = 45;

/// Computes the logarithm of a value, in base 10 unless a base is given.
///
/// Accepts one or two arguments: `value` and an optional `base`. Both need a
/// numeric view. Zero or negative input, and a base of one, are `Undefined`.
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::function::log::log, value::core::Value};
///
/// assert_eq!(log(&[Value::from(1000)]), Value::from(3));
/// assert_eq!(log(&[Value::from(8), Value::from(2)]), Value::from(3));
/// assert!(log(&[Value::from(-1)]).is_undefined());
/// ```
#[must_use]
pub fn log(args: &[Value]) -> Value {
    match args {
        [value] => settle(log_base(value, None)),
        [value, base] => settle(log_base(value, Some(base))),
        _ => arity_mismatch("log", Arity::OneOf(&[1, 2]), args.len()),
    }
}

fn log_base(value: &Value, base: Option<&Value>) -> Result<Value, Value> {
    let value = number_arg("log", value)?;
    let base = match base {
        Some(base) => number_arg("log", base)?,
        None => BigDecimal::from(10),
    };

    num::log(&value, &base).map(|l| Value::from(snap_to_integer(l)))
                           .map_err(|reason| Undefined::new(reason).into())
}

/// Removes the series rounding noise from results such as `log(1000)`, which
/// would otherwise come out a hair away from `3`.
fn snap_to_integer(value: BigDecimal) -> BigDecimal {
    let nearest = num::round(&value);
    let tolerance = BigDecimal::new(1.into(), SNAP_DIGITS);

    if (&value - &nearest).abs() < tolerance { nearest } else { value }
}
