use std::fmt::Display;

use tracing::trace;

use crate::{
    ast::{Entry, Operator, Tree},
    interpreter::{
        evaluator::context::Context,
        value::{core::Value, operations::Operations, undefined::Undefined},
    },
};

/// The reduction passes in the order they run, each with the operators it
/// combines. Earlier passes bind tighter.
const PASSES: &[(&str, &[Operator])] =
    &[("power", &[Operator::Pow]),
      ("multiplicative", &[Operator::Mul, Operator::Div, Operator::Mod]),
      ("additive", &[Operator::Add, Operator::Sub]),
      ("shift", &[Operator::LeftShift, Operator::RightShift]),
      ("relational",
       &[Operator::Less, Operator::LessEqual, Operator::Greater, Operator::GreaterEqual]),
      ("equality", &[Operator::Equal, Operator::NotEqual])];

/// A tree entry after resolution: either a value or an operator still
/// waiting for its pass.
#[derive(Debug, Clone, PartialEq)]
enum Term {
    Value(Value),
    Operator(Operator),
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Operator(op) => write!(f, "{op}"),
        }
    }
}

impl Tree {
    /// Evaluates the tree against `context`.
    ///
    /// Shorthand for [`Context::eval`].
    ///
    /// ## Example
    /// ```
    /// use tally::{build, interpreter::{evaluator::context::Context, value::core::Value}};
    ///
    /// let tree = build(":r: ^ 2 * 3").unwrap();
    /// let small = Context::new().with_variable("r", 2);
    /// let large = Context::new().with_variable("r", 10);
    ///
    /// assert_eq!(tree.eval(&small), Value::from(12));
    /// assert_eq!(tree.eval(&large), Value::from(300));
    /// ```
    #[must_use]
    pub fn eval(&self, context: &Context) -> Value {
        context.eval(self)
    }
}

impl Context {
    /// Reduces a tree to a single value.
    ///
    /// Every entry is resolved first, left to right: groups and calls are
    /// evaluated in full, variables and object members are looked up. The
    /// first entry that resolves to `Undefined` ends the evaluation and is
    /// returned as it is.
    ///
    /// The resolved sequence then goes through one left-to-right pass per
    /// precedence tier: `^`, then `* / %`, then `+ -`, then `<< >>`, then
    /// `< <= > >=`, then `== !=`. Each pass combines the operators of its
    /// tier and leaves everything else in place for the passes after it.
    ///
    /// Evaluation never fails: malformed sequences come back as `Undefined`
    /// with a syntax reason.
    ///
    /// # Example
    /// ```
    /// use tally::{build, interpreter::{evaluator::context::Context, value::core::Value}};
    ///
    /// let tree = build("10 + 5 * 4 ^ 3 * 2 + 6 * 7").unwrap();
    /// assert_eq!(Context::new().eval(&tree), Value::from(692));
    /// ```
    #[must_use]
    pub fn eval(&self, tree: &Tree) -> Value {
        let mut terms = match self.resolve_entries(tree.entries()) {
            Ok(terms) => fold_leading_sign(terms),
            Err(undefined) => return undefined,
        };

        for (name, focus) in PASSES {
            terms = match reduce(terms, focus) {
                Ok(terms) => terms,
                Err(undefined) => return undefined,
            };
            trace!(pass = *name, output = %render(&terms), "reduction pass");
        }

        let mut terms = terms.into_iter();
        match (terms.next(), terms.next()) {
            (Some(Term::Value(value)), None) => value,
            (None, _) => Undefined::syntax("empty expression").into(),
            (first, second) => {
                let leftover: Vec<Term> = first.into_iter().chain(second).chain(terms).collect();
                Undefined::syntax(format!("expression does not reduce to a single value: {}",
                                          render(&leftover))).into()
            },
        }
    }

    fn resolve_entries(&self, entries: &[Entry]) -> Result<Vec<Term>, Value> {
        entries.iter().map(|entry| self.resolve_entry(entry)).collect()
    }

    fn resolve_entry(&self, entry: &Entry) -> Result<Term, Value> {
        let value = match entry {
            Entry::Operator(op) => return Ok(Term::Operator(*op)),
            Entry::Literal(value) => value.clone(),
            Entry::SubTree(tree) => self.eval(tree),
            Entry::FunctionCall { name,
                                  builtin,
                                  arguments, } => self.call_function(name, *builtin, arguments),
            Entry::VariableRef { name } => self.resolve_variable(name),
            Entry::ObjectProperty { object, member } => self.resolve_property(object, member),
            Entry::ObjectMethod { object,
                                  member,
                                  arguments, } => self.call_method(object, member, arguments),
        };

        if value.is_undefined() { Err(value) } else { Ok(Term::Value(value)) }
    }
}

/// The leading sign rule of the builder, applied again to resolved terms so
/// that trees assembled by hand behave the same way.
fn fold_leading_sign(mut terms: Vec<Term>) -> Vec<Term> {
    match terms.first() {
        Some(Term::Operator(Operator::Add)) => {
            terms.remove(0);
        },
        Some(Term::Operator(Operator::Sub)) => {
            terms[0] = Term::Operator(Operator::Mul);
            terms.insert(0, Term::Value(Value::from(-1)));
        },
        _ => {},
    }
    terms
}

/// One left-to-right pass combining the operators in `focus`.
///
/// The scan keeps an accumulator and a pending operator. A value either
/// starts the accumulator or is combined into it through the pending
/// operator. An operator in focus becomes pending. Any other operator
/// flushes the accumulator, the pending operator and itself to the output
/// untouched.
fn reduce(terms: Vec<Term>, focus: &[Operator]) -> Result<Vec<Term>, Value> {
    let mut output = Vec::with_capacity(terms.len());
    let mut accumulator: Option<Value> = None;
    let mut pending: Option<Operator> = None;

    for term in terms {
        match term {
            Term::Value(value) => match (accumulator.take(), pending.take()) {
                (Some(lhs), Some(op)) => accumulator = Some(calculate(&lhs, op, &value)),
                (None, Some(op)) => {
                    let message = format!("operator '{op}' has no left operand");
                    return Err(Undefined::syntax(message).into());
                },
                (Some(lhs), None) => {
                    output.push(Term::Value(lhs));
                    accumulator = Some(value);
                },
                (None, None) => accumulator = Some(value),
            },
            Term::Operator(op) if focus.contains(&op) => {
                if let Some(previous) = pending.replace(op) {
                    let message = format!("operator '{op}' follows '{previous}' with no operand in between");
                    return Err(Undefined::syntax(message).into());
                }
            },
            Term::Operator(op) => {
                output.extend(accumulator.take().map(Term::Value));
                output.extend(pending.take().map(Term::Operator));
                output.push(Term::Operator(op));
            },
        }
    }

    output.extend(accumulator.map(Term::Value));
    output.extend(pending.map(Term::Operator));
    Ok(output)
}

/// Applies `op` to two values.
///
/// # Example
/// ```
/// use tally::{
///     ast::Operator,
///     interpreter::{evaluator::core::calculate, value::core::Value},
/// };
///
/// assert_eq!(calculate(&Value::from(7), Operator::Mod, &Value::from(4)), Value::from(3));
/// assert_eq!(calculate(&Value::from(1), Operator::LeftShift, &Value::from(4)), Value::from(16));
/// assert_eq!(calculate(&Value::from("b"), Operator::Greater, &Value::from("a")), Value::from(true));
/// ```
#[must_use]
pub fn calculate(lhs: &Value, op: Operator, rhs: &Value) -> Value {
    match op {
        Operator::Add => lhs.add(rhs),
        Operator::Sub => lhs.sub(rhs),
        Operator::Mul => lhs.multiply(rhs),
        Operator::Div => lhs.divide(rhs),
        Operator::Mod => lhs.modulo(rhs),
        Operator::Pow => lhs.power_of(rhs),
        Operator::Less => lhs.less_than(rhs),
        Operator::LessEqual => lhs.less_than_or_equal(rhs),
        Operator::Greater => lhs.greater_than(rhs),
        Operator::GreaterEqual => lhs.greater_than_or_equal(rhs),
        Operator::Equal => lhs.equal_to(rhs),
        Operator::NotEqual => lhs.not_equal_to(rhs),
        Operator::LeftShift => lhs.lshift(rhs),
        Operator::RightShift => lhs.rshift(rhs),
    }
}

fn render(terms: &[Term]) -> String {
    terms.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}
