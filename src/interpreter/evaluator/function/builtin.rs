use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::{
    interpreter::{
        evaluator::function::core::{Arity, arity_mismatch, number_arg, settle},
        value::{core::Value, undefined::Undefined},
    },
    util::num::{self, format_decimal},
};

/// π to fifty decimal places.
const PI_DIGITS: &str = "3.14159265358979323846264338327950288419716939937510";

/// Largest argument `factorial` accepts.
pub const MAX_FACTORIAL: u32 = 10_000;

/// Applies a decimal function to the single numeric argument of `name`.
fn with_number<F>(name: &str, args: &[Value], f: F) -> Value
    where F: FnOnce(&BigDecimal) -> Result<BigDecimal, String>
{
    let [x] = args else {
        return arity_mismatch(name, Arity::Exact(1), args.len());
    };

    settle(number_arg(name, x).and_then(|x| {
                                  f(&x).map(Value::from)
                                       .map_err(|reason| Undefined::new(reason).into())
                              }))
}

/// Computes a decimal function through `f64` for functions with no exact
/// decimal algorithm.
fn through_f64(name: &str, x: &BigDecimal, f: fn(f64) -> f64) -> Result<BigDecimal, String> {
    let input = num::decimal_to_f64(x).ok_or_else(|| {
                                          format!("{name} argument {} is out of range",
                                                  format_decimal(x))
                                      })?;

    num::decimal_from_f64(f(input)).ok_or_else(|| {
                                       format!("{name}({}) has no finite result",
                                               format_decimal(x))
                                   })
}

/// Generates a one-argument builtin from a decimal function.
///
/// The generated function accepts exactly one argument with a numeric view.
/// Anything else produces an `Undefined` naming the function.
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::function::builtin::abs, value::core::Value};
///
/// assert_eq!(abs(&[Value::from(-5)]), Value::from(5));
/// assert!(abs(&[Value::from(true)]).is_undefined());
/// ```
macro_rules! decimal_builtin {
    ($(#[$meta:meta])* $fname:ident, $op:expr) => {
        $(#[$meta])*
        #[must_use]
        pub fn $fname(args: &[Value]) -> Value {
            with_number(stringify!($fname), args, $op)
        }
    };
}

/// Generates a one-argument builtin computed through `f64`.
macro_rules! float_builtin {
    ($fname:ident) => {
        #[doc = concat!("`", stringify!($fname), "(x)` with `x` in radians, computed in double precision.")]
        #[must_use]
        pub fn $fname(args: &[Value]) -> Value {
            with_number(stringify!($fname), args, |x| through_f64(stringify!($fname), x, f64::$fname))
        }
    };
}

float_builtin!(sin);
float_builtin!(cos);
float_builtin!(tan);

decimal_builtin!(
    /// Absolute value.
    abs, |x| Ok(x.abs()));
decimal_builtin!(
    /// Largest integer not greater than `x`.
    floor, |x| Ok(num::floor(x)));
decimal_builtin!(
    /// Smallest integer not less than `x`.
    ceil, |x| Ok(num::ceil(x)));
decimal_builtin!(
    /// Nearest integer, halves rounded away from zero.
    round, |x| Ok(num::round(x)));
decimal_builtin!(
    /// Square root; negative input is `Undefined`.
    ///
    /// # Example
    /// ```
    /// use bigdecimal::ToPrimitive;
    /// use tally::interpreter::{evaluator::function::builtin::sqrt, value::core::Value};
    ///
    /// let Value::Number(root) = sqrt(&[Value::from(2)]) else { panic!() };
    /// assert!((root.get().to_f64().unwrap() - 1.414_213_562).abs() < 1e-6);
    ///
    /// assert!(sqrt(&[Value::from(-4)]).is_undefined());
    /// ```
    sqrt, num::sqrt);
decimal_builtin!(
    /// Natural logarithm; zero and negative input are `Undefined`.
    ln, num::ln);
decimal_builtin!(
    /// `e` raised to `x`.
    exp, num::exp);

/// The constant π.
#[must_use]
pub fn pi(_args: &[Value]) -> Value {
    BigDecimal::from_str(PI_DIGITS).map_or_else(|_| Undefined::new("invalid constant for pi").into(),
                                                Value::from)
}

/// Euler's number.
#[must_use]
pub fn e(_args: &[Value]) -> Value {
    num::exp(&BigDecimal::from(1)).map_or_else(|reason| Undefined::new(reason).into(), Value::from)
}

/// Computes `n!` for a non-negative integer `n`.
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::function::builtin::factorial, value::core::Value};
///
/// assert_eq!(factorial(&[Value::from(5)]), Value::from(120));
/// assert_eq!(factorial(&[Value::from(0)]), Value::from(1));
///
/// let r = factorial(&[Value::from(-10)]);
/// assert_eq!(r.reason(), Some("factorial requires a non-negative integer, got -10"));
/// ```
#[must_use]
pub fn factorial(args: &[Value]) -> Value {
    with_number("factorial", args, |x| {
        let Some(n) = num::to_u32(x) else {
            return Err(format!("factorial requires a non-negative integer, got {}",
                               format_decimal(x)));
        };
        if n > MAX_FACTORIAL {
            return Err(format!("factorial argument {n} is larger than {MAX_FACTORIAL}"));
        }

        let mut product = BigDecimal::from(1);
        for k in 2..=n {
            product *= BigDecimal::from(k);
        }
        Ok(product)
    })
}
