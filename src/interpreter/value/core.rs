use std::ops;

use bigdecimal::BigDecimal;

use crate::interpreter::value::{
    boolean::Boolean,
    multi::MultiValue,
    number::Number,
    operations::Operations,
    text::Text,
    undefined::Undefined,
};

/// Represents a runtime value in the interpreter.
///
/// This closed enum models every possible evaluation result. Each variant
/// wraps a type implementing [`Operations`]; `Value` itself implements the
/// trait by forwarding to the wrapped type, so evaluation code never needs to
/// know which variant it holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An exact decimal number.
    Number(Number),
    /// A UTF-8 string.
    String(Text),
    /// A boolean, produced by comparisons.
    Bool(Boolean),
    /// The absorbing "no result" value carrying an optional reason.
    Undefined(Undefined),
    /// Several values returned from a single function call.
    Multi(MultiValue),
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Self::Number(Number::new(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::from(BigDecimal::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::from(BigDecimal::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::from(BigDecimal::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(Boolean::new(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Text::new(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Text::new(v))
    }
}

impl From<Undefined> for Value {
    fn from(v: Undefined) -> Self {
        Self::Undefined(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Multi(MultiValue::new(v))
    }
}

impl Value {
    /// Creates an `Undefined` value with the given reason.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::value::core::Value;
    ///
    /// let v = Value::undefined("unknown variable 'x'");
    /// assert!(v.is_undefined());
    /// assert_eq!(v.reason(), Some("unknown variable 'x'"));
    /// ```
    #[must_use]
    pub fn undefined(reason: impl Into<String>) -> Self {
        Self::Undefined(Undefined::new(reason))
    }

    /// Returns `true` if the value is [`Undefined`].
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined(..))
    }

    /// Returns `true` if the value is a [`Number`].
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// The diagnostic reason of an `Undefined`, `None` for any other value.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Undefined(u) => u.reason(),
            _ => None,
        }
    }

    /// The display form without string quoting.
    ///
    /// Identical to `to_string()` for every variant except `String`, where
    /// the raw content is returned.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("ab").to_string(), "\"ab\"");
    /// assert_eq!(Value::from("ab").raw_string(), "ab");
    /// assert_eq!(Value::from(true).raw_string(), "True");
    /// ```
    #[must_use]
    pub fn raw_string(&self) -> String {
        match self {
            Self::String(t) => t.raw().to_string(),
            other => other.to_string(),
        }
    }

    fn operand(&self) -> &dyn Operations {
        match self {
            Self::Number(n) => n,
            Self::String(s) => s,
            Self::Bool(b) => b,
            Self::Undefined(u) => u,
            Self::Multi(m) => m,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Undefined(u) => write!(f, "{u}"),
            Self::Multi(m) => write!(f, "{m}"),
        }
    }
}

impl Operations for Value {
    fn kind(&self) -> &'static str {
        self.operand().kind()
    }

    fn numeric_view(&self) -> Option<BigDecimal> {
        self.operand().numeric_view()
    }

    fn string_view(&self) -> Option<String> {
        self.operand().string_view()
    }

    fn bool_view(&self) -> Option<bool> {
        self.operand().bool_view()
    }

    fn add(&self, rhs: &Value) -> Value {
        self.operand().add(rhs)
    }

    fn sub(&self, rhs: &Value) -> Value {
        self.operand().sub(rhs)
    }

    fn multiply(&self, rhs: &Value) -> Value {
        self.operand().multiply(rhs)
    }

    fn divide(&self, rhs: &Value) -> Value {
        self.operand().divide(rhs)
    }

    fn power_of(&self, rhs: &Value) -> Value {
        self.operand().power_of(rhs)
    }

    fn modulo(&self, rhs: &Value) -> Value {
        self.operand().modulo(rhs)
    }

    fn lshift(&self, rhs: &Value) -> Value {
        self.operand().lshift(rhs)
    }

    fn rshift(&self, rhs: &Value) -> Value {
        self.operand().rshift(rhs)
    }

    fn less_than(&self, rhs: &Value) -> Value {
        self.operand().less_than(rhs)
    }

    fn less_than_or_equal(&self, rhs: &Value) -> Value {
        self.operand().less_than_or_equal(rhs)
    }

    fn greater_than(&self, rhs: &Value) -> Value {
        self.operand().greater_than(rhs)
    }

    fn greater_than_or_equal(&self, rhs: &Value) -> Value {
        self.operand().greater_than_or_equal(rhs)
    }

    fn equal_to(&self, rhs: &Value) -> Value {
        self.operand().equal_to(rhs)
    }

    fn not_equal_to(&self, rhs: &Value) -> Value {
        self.operand().not_equal_to(rhs)
    }

    fn as_string(&self) -> Value {
        self.operand().as_string()
    }

    fn as_number(&self) -> Value {
        self.operand().as_number()
    }

    fn as_bool(&self) -> Value {
        self.operand().as_bool()
    }
}

/// Forwards a `std::ops` operator on references to an [`Operations`] method.
macro_rules! forward_operator {
    ($($trait:ident :: $fn:ident => $method:ident),* $(,)?) => {
        $(
            impl ops::$trait<&Value> for &Value {
                type Output = Value;

                fn $fn(self, rhs: &Value) -> Value {
                    Operations::$method(self, rhs)
                }
            }
        )*
    };
}

forward_operator! {
    Add::add => add,
    Sub::sub => sub,
    Mul::mul => multiply,
    Div::div => divide,
    Rem::rem => modulo,
    Shl::shl => lshift,
    Shr::shr => rshift,
}
