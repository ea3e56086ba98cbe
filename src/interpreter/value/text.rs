use std::{cmp::Ordering, fmt::Display, str::FromStr};

use bigdecimal::BigDecimal;

use crate::{
    evaluate,
    interpreter::{
        evaluator::context::Context,
        value::{
            core::Value,
            operations::{Operations, unsupported},
            undefined::Undefined,
        },
    },
    util::num,
};

/// Upper bound on the length, in bytes, of a string built by repetition.
pub const MAX_REPEAT_LEN: usize = 1 << 20;

/// A UTF-8 string value.
///
/// Comparisons always use the raw content. The [`Display`] form is quoted and
/// escaped so that strings are distinguishable from numbers in printed
/// results; use [`Text::raw`] for the content itself.
///
/// # Example
/// ```
/// use tally::interpreter::value::text::Text;
///
/// let t = Text::new("ab");
/// assert_eq!(t.to_string(), "\"ab\"");
/// assert_eq!(t.raw(), "ab");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    /// Wraps a string.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw, unquoted content.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.0
    }

    fn with_text<F>(&self, operation: &str, rhs: &Value, f: F) -> Value
        where F: FnOnce(&str, &str) -> Value
    {
        match rhs.string_view() {
            Some(r) => f(&self.0, &r),
            None => unsupported(operation, self, rhs),
        }
    }

    fn compare<F>(&self, operation: &str, rhs: &Value, f: F) -> Value
        where F: FnOnce(Ordering) -> bool
    {
        self.with_text(operation, rhs, |l, r| Value::from(f(l.cmp(r))))
    }

    fn count(&self, operation: &str, rhs: &Value) -> Result<usize, Value> {
        let n = rhs.numeric_view().ok_or_else(|| unsupported(operation, self, rhs))?;

        num::to_u32(&n).and_then(|n| usize::try_from(n).ok()).ok_or_else(|| {
                              let reason = format!("{operation} requires a non-negative integer, got {}",
                                                   num::format_decimal(&n));
                              Undefined::new(reason).into()
                          })
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"")?;
        for c in self.0.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                c => write!(f, "{c}")?,
            }
        }
        write!(f, "\"")
    }
}

impl Operations for Text {
    fn kind(&self) -> &'static str {
        "String"
    }

    /// Parses the content as a decimal; failing that, evaluates it as an
    /// expression and accepts a numeric result.
    fn numeric_view(&self) -> Option<BigDecimal> {
        if let Ok(n) = BigDecimal::from_str(self.0.trim()) {
            return Some(n);
        }
        match evaluate(&self.0, &Context::default()) {
            Value::Number(n) => Some(n.get().clone()),
            _ => None,
        }
    }

    fn string_view(&self) -> Option<String> {
        Some(self.0.clone())
    }

    fn bool_view(&self) -> Option<bool> {
        let text = self.0.trim();
        Some(!(text.is_empty() || text == "0" || text.eq_ignore_ascii_case("false")))
    }

    fn add(&self, rhs: &Value) -> Value {
        self.with_text("Add", rhs, |l, r| Value::from(format!("{l}{r}")))
    }

    fn multiply(&self, rhs: &Value) -> Value {
        match self.count("Multiply", rhs) {
            Ok(n) if self.0.len().saturating_mul(n) > MAX_REPEAT_LEN => {
                Undefined::new(format!("Multiply would build a string longer than {MAX_REPEAT_LEN} bytes")).into()
            },
            Ok(n) => Value::from(self.0.repeat(n)),
            Err(undefined) => undefined,
        }
    }

    /// Drops `n` bytes from the left, clamped to the empty string.
    fn lshift(&self, rhs: &Value) -> Value {
        match self.count("LShift", rhs) {
            Ok(n) if n >= self.0.len() => Value::from(""),
            Ok(mut start) => {
                while !self.0.is_char_boundary(start) {
                    start += 1;
                }
                Value::from(&self.0[start..])
            },
            Err(undefined) => undefined,
        }
    }

    /// Drops `n` bytes from the right, clamped to the empty string.
    fn rshift(&self, rhs: &Value) -> Value {
        match self.count("RShift", rhs) {
            Ok(n) if n >= self.0.len() => Value::from(""),
            Ok(n) => {
                let mut end = self.0.len() - n;
                while !self.0.is_char_boundary(end) {
                    end -= 1;
                }
                Value::from(&self.0[..end])
            },
            Err(undefined) => undefined,
        }
    }

    fn less_than(&self, rhs: &Value) -> Value {
        self.compare("LessThan", rhs, Ordering::is_lt)
    }

    fn greater_than(&self, rhs: &Value) -> Value {
        self.compare("GreaterThan", rhs, Ordering::is_gt)
    }

    fn equal_to(&self, rhs: &Value) -> Value {
        self.compare("EqualTo", rhs, Ordering::is_eq)
    }
}
