use crate::{
    interpreter::{
        evaluator::function::core::{Arity, arity_mismatch, number_arg, settle},
        value::{core::Value, undefined::Undefined},
    },
    util::num,
};

/// Most fractional digits `trunc` will keep.
pub const MAX_TRUNC_PRECISION: u32 = 4096;

/// Truncates a number toward zero.
///
/// Called as `trunc(x)` it drops the fractional part. Called as
/// `trunc(precision x)` it keeps `precision` fractional digits; the
/// precision must be a non-negative integer no larger than
/// [`MAX_TRUNC_PRECISION`].
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::function::trunc::trunc, value::core::Value};
///
/// let x: Value = "-3.14159".parse::<bigdecimal::BigDecimal>().unwrap().into();
///
/// assert_eq!(trunc(&[x.clone()]), Value::from(-3));
/// assert_eq!(trunc(&[Value::from(2), x]).to_string(), "-3.14");
/// ```
#[must_use]
pub fn trunc(args: &[Value]) -> Value {
    match args {
        [value] => settle(truncate(0, value)),
        [precision, value] => settle(digits(precision).and_then(|digits| truncate(digits, value))),
        _ => arity_mismatch("trunc", Arity::OneOf(&[1, 2]), args.len()),
    }
}

fn digits(precision: &Value) -> Result<u32, Value> {
    let p = number_arg("trunc", precision)?;

    num::to_u32(&p).filter(|digits| *digits <= MAX_TRUNC_PRECISION).ok_or_else(|| {
                       let reason = format!("trunc precision must be a non-negative integer no larger than \
                                             {MAX_TRUNC_PRECISION}, got {precision}");
                       Undefined::new(reason).into()
                   })
}

fn truncate(digits: u32, value: &Value) -> Result<Value, Value> {
    let value = number_arg("trunc", value)?;
    Ok(Value::from(num::truncate(&value, digits)))
}
