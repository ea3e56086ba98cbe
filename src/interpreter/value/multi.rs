use std::fmt::Display;

use crate::interpreter::value::{
    core::Value,
    operations::{Operations, unsupported},
};

/// An ordered group of values.
///
/// Multi-values cannot be written in an expression. They only appear as the
/// result of a function that returns several values, and are spread back
/// into individual arguments when passed to another call.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiValue(Vec<Value>);

impl MultiValue {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// The grouped values, in order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl Display for MultiValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;

        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{value}")?;
        }

        write!(f, "]")
    }
}

impl Operations for MultiValue {
    fn kind(&self) -> &'static str {
        "MultiValue"
    }

    /// Element-wise equality against another multi-value of the same length.
    fn equal_to(&self, rhs: &Value) -> Value {
        let Value::Multi(other) = rhs else {
            return unsupported("EqualTo", self, rhs);
        };

        if self.0.len() != other.0.len() {
            return Value::from(false);
        }

        for (l, r) in self.0.iter().zip(&other.0) {
            match l.equal_to(r) {
                Value::Bool(b) if b.get() => {},
                Value::Bool(_) => return Value::from(false),
                undefined => return undefined,
            }
        }
        Value::from(true)
    }
}
