use std::fmt::Display;

use crate::interpreter::value::{
    core::Value,
    operations::{Operations, unsupported},
};

/// A truth value, displayed as `True` or `False`.
///
/// `+` combines booleans with logical or and `*` with logical and; the right
/// operand only needs a boolean view, so `true() * 1` is `True`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boolean(bool);

impl Boolean {
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> bool {
        self.0
    }

    fn with_bool<F>(self, operation: &str, rhs: &Value, f: F) -> Value
        where F: FnOnce(bool, bool) -> bool
    {
        match rhs.bool_view() {
            Some(r) => Value::from(f(self.0, r)),
            None => unsupported(operation, &self, rhs),
        }
    }
}

impl Display for Boolean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Operations for Boolean {
    fn kind(&self) -> &'static str {
        "Bool"
    }

    fn string_view(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn bool_view(&self) -> Option<bool> {
        Some(self.0)
    }

    fn add(&self, rhs: &Value) -> Value {
        self.with_bool("Add", rhs, |l, r| l || r)
    }

    fn multiply(&self, rhs: &Value) -> Value {
        self.with_bool("Multiply", rhs, |l, r| l && r)
    }

    fn equal_to(&self, rhs: &Value) -> Value {
        self.with_bool("EqualTo", rhs, |l, r| l == r)
    }
}
