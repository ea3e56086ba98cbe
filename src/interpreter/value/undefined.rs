use std::fmt::Display;

use crate::interpreter::value::{core::Value, operations::Operations};

/// The absorbing "no result" value.
///
/// Every operation performed on an `Undefined` returns that same `Undefined`,
/// so the reason of the first failure survives however much arithmetic
/// follows it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Undefined {
    reason: Option<String>,
}

impl Undefined {
    /// Creates an `Undefined` carrying a diagnostic reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: Some(reason.into()) }
    }

    /// Creates an `Undefined` describing malformed input found during
    /// evaluation.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::value::undefined::Undefined;
    ///
    /// let u = Undefined::syntax("dangling operator '+'");
    /// assert_eq!(u.reason(), Some("syntax error: dangling operator '+'"));
    /// ```
    #[must_use]
    pub fn syntax(message: impl Display) -> Self {
        Self::new(format!("syntax error: {message}"))
    }

    /// The diagnostic reason, if one was recorded.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl Display for Undefined {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "Undefined({reason})"),
            None => write!(f, "Undefined"),
        }
    }
}

/// Implements every binary operation of [`Operations`] by handing back the
/// receiver unchanged.
macro_rules! absorb {
    ($($method:ident),* $(,)?) => {
        $(
            fn $method(&self, _rhs: &Value) -> Value {
                Value::Undefined(self.clone())
            }
        )*
    };
}

impl Operations for Undefined {
    fn kind(&self) -> &'static str {
        "Undefined"
    }

    absorb!(add,
            sub,
            multiply,
            divide,
            power_of,
            modulo,
            lshift,
            rshift,
            less_than,
            less_than_or_equal,
            greater_than,
            greater_than_or_equal,
            equal_to,
            not_equal_to);

    fn as_string(&self) -> Value {
        Value::Undefined(self.clone())
    }

    fn as_number(&self) -> Value {
        Value::Undefined(self.clone())
    }

    fn as_bool(&self) -> Value {
        Value::Undefined(self.clone())
    }
}
