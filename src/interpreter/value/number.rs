use std::{cmp::Ordering, fmt::Display};

use bigdecimal::{BigDecimal, Zero};

use crate::{
    interpreter::value::{
        core::Value,
        operations::{Operations, unsupported},
        undefined::Undefined,
    },
    util::num::{self, format_decimal},
};

/// An exact decimal number.
///
/// Numbers never go through binary floating point, so chained arithmetic such
/// as `0.1 + 0.2` stays exact. Non-terminating quotients are rounded by the
/// decimal library's default division precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(BigDecimal);

impl Number {
    /// Wraps a decimal.
    #[must_use]
    pub const fn new(value: BigDecimal) -> Self {
        Self(value)
    }

    /// The wrapped decimal.
    #[must_use]
    pub const fn get(&self) -> &BigDecimal {
        &self.0
    }

    /// Views `rhs` as a decimal and applies `f`, or reports `operation` as
    /// unsupported for this pair of operands.
    fn with_numeric<F>(&self, operation: &str, rhs: &Value, f: F) -> Value
        where F: FnOnce(&BigDecimal, &BigDecimal) -> Value
    {
        match rhs.numeric_view() {
            Some(r) => f(&self.0, &r),
            None => unsupported(operation, self, rhs),
        }
    }

    fn compare<F>(&self, operation: &str, rhs: &Value, f: F) -> Value
        where F: FnOnce(Ordering) -> bool
    {
        self.with_numeric(operation, rhs, |l, r| Value::from(f(l.cmp(r))))
    }

    /// Resolves a shift amount, which must be a non-negative integer no
    /// larger than [`num::MAX_SHIFT`].
    fn shift_amount(&self, operation: &str, rhs: &Value) -> Result<u32, Value> {
        let amount = rhs.numeric_view().ok_or_else(|| unsupported(operation, self, rhs))?;

        num::to_u32(&amount).filter(|n| *n <= num::MAX_SHIFT).ok_or_else(|| {
                                Undefined::new(format!("{operation} requires a non-negative integer shift no larger than {}, got {}",
                                                       num::MAX_SHIFT,
                                                       format_decimal(&amount))).into()
                            })
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_decimal(&self.0))
    }
}

impl Operations for Number {
    fn kind(&self) -> &'static str {
        "Number"
    }

    fn numeric_view(&self) -> Option<BigDecimal> {
        Some(self.0.clone())
    }

    fn string_view(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn bool_view(&self) -> Option<bool> {
        Some(!self.0.is_zero())
    }

    fn add(&self, rhs: &Value) -> Value {
        self.with_numeric("Add", rhs, |l, r| Value::from(l + r))
    }

    fn sub(&self, rhs: &Value) -> Value {
        self.with_numeric("Sub", rhs, |l, r| Value::from(l - r))
    }

    fn multiply(&self, rhs: &Value) -> Value {
        self.with_numeric("Multiply", rhs, |l, r| Value::from(l * r))
    }

    fn divide(&self, rhs: &Value) -> Value {
        self.with_numeric("Divide", rhs, |l, r| {
                if r.is_zero() {
                    return Undefined::new(format!("division by zero: {} / 0",
                                                  format_decimal(l))).into();
                }
                Value::from(l / r)
            })
    }

    fn modulo(&self, rhs: &Value) -> Value {
        self.with_numeric("Mod", rhs, |l, r| {
                if r.is_zero() {
                    return Undefined::new(format!("modulo by zero: {} % 0",
                                                  format_decimal(l))).into();
                }
                Value::from(l % r)
            })
    }

    fn power_of(&self, rhs: &Value) -> Value {
        self.with_numeric("PowerOf", rhs, |l, r| {
                num::pow(l, r).map_or_else(|reason| Undefined::new(reason).into(), Value::from)
            })
    }

    fn lshift(&self, rhs: &Value) -> Value {
        match self.shift_amount("LShift", rhs) {
            Ok(n) => {
                let factor = num::pow_integer(&BigDecimal::from(2), n);
                Value::from(num::floor(&(&self.0 * &factor)))
            },
            Err(undefined) => undefined,
        }
    }

    fn rshift(&self, rhs: &Value) -> Value {
        match self.shift_amount("RShift", rhs) {
            Ok(n) => {
                Value::from(num::floor(&num::div_pow2(&self.0, n)))
            },
            Err(undefined) => undefined,
        }
    }

    fn less_than(&self, rhs: &Value) -> Value {
        self.compare("LessThan", rhs, Ordering::is_lt)
    }

    fn less_than_or_equal(&self, rhs: &Value) -> Value {
        self.compare("LessThanOrEqual", rhs, Ordering::is_le)
    }

    fn greater_than(&self, rhs: &Value) -> Value {
        self.compare("GreaterThan", rhs, Ordering::is_gt)
    }

    fn greater_than_or_equal(&self, rhs: &Value) -> Value {
        self.compare("GreaterThanOrEqual", rhs, Ordering::is_ge)
    }

    fn equal_to(&self, rhs: &Value) -> Value {
        self.compare("EqualTo", rhs, Ordering::is_eq)
    }

    fn not_equal_to(&self, rhs: &Value) -> Value {
        self.compare("NotEqualTo", rhs, Ordering::is_ne)
    }
}
