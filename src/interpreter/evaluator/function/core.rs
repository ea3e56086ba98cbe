use std::fmt::{Debug, Display};

use bigdecimal::BigDecimal;
use tracing::debug;

use crate::{
    ast::Tree,
    interpreter::{
        evaluator::{
            context::Context,
            function::{builtin, log, min_max, text, trunc},
        },
        value::{core::Value, operations::Operations, undefined::Undefined},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluated arguments and answers with a value;
/// failures are reported as `Undefined`.
pub type BuiltinFn = fn(&[Value]) -> Value;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin accepts `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(allowed) => allowed.contains(&n),
            Self::AtLeast(m) => n >= m,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(1) => write!(f, "1 argument"),
            Self::Exact(n) => write!(f, "{n} arguments"),
            Self::OneOf(allowed) => {
                let counts: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                write!(f, "{} arguments", counts.join(" or "))
            },
            Self::AtLeast(n) => write!(f, "at least {n} argument(s)"),
        }
    }
}

/// A named built-in function with its arity.
pub struct Builtin {
    name:  &'static str,
    arity: Arity,
    func:  BuiltinFn,
}

impl Builtin {
    /// The canonical, lowercase name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Checks the argument count and runs the handler.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::{evaluator::function::core::lookup_builtin, value::core::Value};
    ///
    /// let floor = lookup_builtin("FLOOR").unwrap();
    /// assert_eq!(floor.call(&["2.7".parse::<bigdecimal::BigDecimal>().unwrap().into()]),
    ///            Value::from(2));
    ///
    /// let missing = floor.call(&[]);
    /// assert_eq!(missing.reason(), Some("floor expects 1 argument, got 0"));
    /// ```
    #[must_use]
    pub fn call(&self, args: &[Value]) -> Value {
        if !self.arity.check(args.len()) {
            return arity_mismatch(self.name, self.arity, args.len());
        }
        (self.func)(args)
    }
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a lowercase string name,
/// - its arity,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every built-in function, in table order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "pi"        => { arity: Arity::Exact(0), func: builtin::pi },
    "e"         => { arity: Arity::Exact(0), func: builtin::e },
    "true"      => { arity: Arity::Exact(0), func: |_| Value::from(true) },
    "false"     => { arity: Arity::Exact(0), func: |_| Value::from(false) },
    "sin"       => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"       => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"       => { arity: Arity::Exact(1), func: builtin::tan },
    "sqrt"      => { arity: Arity::Exact(1), func: builtin::sqrt },
    "ln"        => { arity: Arity::Exact(1), func: builtin::ln },
    "exp"       => { arity: Arity::Exact(1), func: builtin::exp },
    "abs"       => { arity: Arity::Exact(1), func: builtin::abs },
    "floor"     => { arity: Arity::Exact(1), func: builtin::floor },
    "ceil"      => { arity: Arity::Exact(1), func: builtin::ceil },
    "round"     => { arity: Arity::Exact(1), func: builtin::round },
    "factorial" => { arity: Arity::Exact(1), func: builtin::factorial },
    "log"       => { arity: Arity::OneOf(&[1, 2]), func: log::log },
    "trunc"     => { arity: Arity::OneOf(&[1, 2]), func: trunc::trunc },
    "min"       => { arity: Arity::AtLeast(1), func: |args| min_max::min_max("min", args) },
    "max"       => { arity: Arity::AtLeast(1), func: |args| min_max::min_max("max", args) },
    "len"       => { arity: Arity::Exact(1), func: text::len },
    "eval"      => { arity: Arity::Exact(1), func: text::eval },
}

/// Finds a built-in function by name, ignoring ASCII case.
///
/// # Example
/// ```
/// use tally::interpreter::evaluator::function::core::lookup_builtin;
///
/// assert_eq!(lookup_builtin("Sqrt").map(|b| b.name()), Some("sqrt"));
/// assert!(lookup_builtin("sqrtx").is_none());
/// ```
#[must_use]
pub fn lookup_builtin(name: &str) -> Option<&'static Builtin> {
    BUILTIN_TABLE.iter().find(|builtin| builtin.name.eq_ignore_ascii_case(name))
}

/// Builds the `Undefined` for a call with the wrong number of arguments.
#[must_use]
pub fn arity_mismatch(name: &str, arity: Arity, got: usize) -> Value {
    Undefined::new(format!("{name} expects {arity}, got {got}")).into()
}

/// Views an argument as a decimal for the function `name`.
pub(crate) fn number_arg(name: &str, value: &Value) -> Result<BigDecimal, Value> {
    value.numeric_view()
         .ok_or_else(|| Undefined::new(format!("{name} expects a number, got {value}")).into())
}

/// Collapses a handler result whose error side is already an `Undefined`.
pub(crate) fn settle(result: Result<Value, Value>) -> Value {
    result.unwrap_or_else(|undefined| undefined)
}

impl Context {
    /// Evaluates a function call.
    ///
    /// Arguments are evaluated first, left to right. A built-in attached at
    /// build time runs next; otherwise the name is looked up among the host
    /// functions of the context.
    ///
    /// # Parameters
    /// - `name`: Function name as written.
    /// - `builtin`: The built-in resolved when the tree was built.
    /// - `arguments`: One tree per argument.
    ///
    /// # Returns
    /// The function result, the first `Undefined` argument, or an `Undefined`
    /// naming an unknown function.
    pub(crate) fn call_function(&self,
                                name: &str,
                                builtin: Option<&Builtin>,
                                arguments: &[Tree])
                                -> Value {
        let args = match self.eval_arguments(arguments) {
            Ok(args) => args,
            Err(undefined) => return undefined,
        };

        if let Some(builtin) = builtin {
            return builtin.call(&args);
        }

        match self.function(name) {
            Some(function) => function(&args),
            None => {
                debug!(name, "unknown function");
                Undefined::new(format!("unknown function '{name}'")).into()
            },
        }
    }

    /// Evaluates argument trees left to right.
    ///
    /// The first argument that evaluates to `Undefined` is returned as the
    /// error, reason intact. Multi-values are spread into the list.
    pub(crate) fn eval_arguments(&self, arguments: &[Tree]) -> Result<Vec<Value>, Value> {
        let mut values = Vec::with_capacity(arguments.len());

        for argument in arguments {
            match self.eval(argument) {
                undefined @ Value::Undefined(_) => return Err(undefined),
                Value::Multi(multi) => values.extend(multi.into_values()),
                value => values.push(value),
            }
        }
        Ok(values)
    }
}
