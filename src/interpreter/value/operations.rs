use std::fmt::Display;

use bigdecimal::BigDecimal;

use crate::interpreter::value::{
    core::Value,
    text::Text,
    undefined::Undefined,
};

/// The full operation surface every value supports.
///
/// Each value type implements this trait and overrides only the operations
/// that are meaningful for it. Everything it leaves out falls back to the
/// default bodies here, which answer with an [`Undefined`] naming the
/// operation and both operands. Evaluation therefore never fails
/// structurally, whatever combination of operands it meets.
///
/// Binary operations look at the right operand through one of three views:
/// - [`numeric_view`](Self::numeric_view) for arithmetic,
/// - [`string_view`](Self::string_view) for concatenation and text
///   comparison,
/// - [`bool_view`](Self::bool_view) for logical combination.
///
/// A value that cannot supply the view its left operand asks for makes the
/// operation `Undefined`. `Undefined` itself supplies no view at all.
///
/// # Example
/// ```
/// use tally::interpreter::value::{core::Value, operations::Operations};
///
/// let sum = Value::from(2).add(&Value::from(3));
/// assert_eq!(sum, Value::from(5));
///
/// // Booleans cannot be divided.
/// let quotient = Value::from(true).divide(&Value::from(2));
/// assert!(quotient.is_undefined());
/// ```
pub trait Operations: Display {
    /// Short type name used in diagnostics.
    fn kind(&self) -> &'static str;

    /// The value as an exact decimal, if it has one.
    fn numeric_view(&self) -> Option<BigDecimal> {
        None
    }
    /// The value as raw text, if it has one.
    fn string_view(&self) -> Option<String> {
        None
    }
    /// The value as a truth value, if it has one.
    fn bool_view(&self) -> Option<bool> {
        None
    }

    fn add(&self, rhs: &Value) -> Value {
        unsupported("Add", self, rhs)
    }
    fn sub(&self, rhs: &Value) -> Value {
        unsupported("Sub", self, rhs)
    }
    fn multiply(&self, rhs: &Value) -> Value {
        unsupported("Multiply", self, rhs)
    }
    fn divide(&self, rhs: &Value) -> Value {
        unsupported("Divide", self, rhs)
    }
    fn power_of(&self, rhs: &Value) -> Value {
        unsupported("PowerOf", self, rhs)
    }
    fn modulo(&self, rhs: &Value) -> Value {
        unsupported("Mod", self, rhs)
    }
    fn lshift(&self, rhs: &Value) -> Value {
        unsupported("LShift", self, rhs)
    }
    fn rshift(&self, rhs: &Value) -> Value {
        unsupported("RShift", self, rhs)
    }

    fn less_than(&self, rhs: &Value) -> Value {
        unsupported("LessThan", self, rhs)
    }
    fn greater_than(&self, rhs: &Value) -> Value {
        unsupported("GreaterThan", self, rhs)
    }
    fn equal_to(&self, rhs: &Value) -> Value {
        unsupported("EqualTo", self, rhs)
    }
    /// Defaults to the negation of [`greater_than`](Self::greater_than).
    fn less_than_or_equal(&self, rhs: &Value) -> Value {
        negate(self.greater_than(rhs))
    }
    /// Defaults to the negation of [`less_than`](Self::less_than).
    fn greater_than_or_equal(&self, rhs: &Value) -> Value {
        negate(self.less_than(rhs))
    }
    /// Defaults to the negation of [`equal_to`](Self::equal_to).
    fn not_equal_to(&self, rhs: &Value) -> Value {
        negate(self.equal_to(rhs))
    }

    /// Casts to a `String` value holding the raw text.
    fn as_string(&self) -> Value {
        self.string_view().map_or_else(|| cast_failure("a string", self),
                                       |text| Value::String(Text::new(text)))
    }
    /// Casts to a `Number` value.
    fn as_number(&self) -> Value {
        self.numeric_view().map_or_else(|| cast_failure("a number", self), Value::from)
    }
    /// Casts to a `Bool` value.
    fn as_bool(&self) -> Value {
        self.bool_view().map_or_else(|| cast_failure("a boolean", self), Value::from)
    }
}

/// Builds the `Undefined` returned for an operation a value does not
/// support, naming the operation and the display form of both operands.
///
/// # Example
/// ```
/// use tally::interpreter::value::{core::Value, operations::unsupported};
///
/// let v = unsupported("Sub", &Value::from("ab"), &Value::from(1));
/// assert_eq!(v.reason(), Some("Sub is not defined for \"ab\" and 1"));
/// ```
pub fn unsupported(operation: &str, lhs: &(impl Display + ?Sized), rhs: &Value) -> Value {
    Undefined::new(format!("{operation} is not defined for {lhs} and {rhs}")).into()
}

fn cast_failure(target: &str, value: &(impl Display + ?Sized)) -> Value {
    Undefined::new(format!("cannot convert {value} to {target}")).into()
}

/// Flips a boolean result, leaving anything else (an `Undefined`) untouched.
fn negate(value: Value) -> Value {
    match value {
        Value::Bool(b) => Value::from(!b.get()),
        other => other,
    }
}
