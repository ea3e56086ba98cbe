use std::{fmt::Display, str::FromStr};

use crate::{
    error::ParseError,
    interpreter::{evaluator::function::core::Builtin, value::core::Value},
};

/// Represents a binary operator.
///
/// Operators are never evaluated on their own. They sit between two value
/// entries of a [`Tree`] and are consumed by the reduction pass whose focus
/// set contains them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Left shift (`<<`)
    LeftShift,
    /// Right shift (`>>`)
    RightShift,
}

impl Operator {
    /// The source symbol of the operator.
    ///
    /// ## Example
    /// ```
    /// use tally::ast::Operator;
    ///
    /// assert_eq!(Operator::LeftShift.symbol(), "<<");
    /// assert_eq!("<<".parse::<Operator>(), Ok(Operator::LeftShift));
    /// ```
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
        }
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let operator = match s {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "^" => Self::Pow,
            "<" => Self::Less,
            "<=" => Self::LessEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<<" => Self::LeftShift,
            ">>" => Self::RightShift,
            _ => return Err(ParseError::UnknownOperator { operator: s.to_string() }),
        };
        Ok(operator)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One element of a [`Tree`].
///
/// Precedence is not encoded in the shape of the tree. A tree is a flat
/// sequence of entries, and only parentheses and calls introduce nesting.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A number or string literal, resolved when the tree is built.
    Literal(Value),
    /// A binary operator between two value entries.
    Operator(Operator),
    /// A parenthesised group.
    SubTree(Tree),
    /// A call to a named function, `name(a b ...)`.
    FunctionCall {
        /// The name as written.
        name:      String,
        /// The built-in body, if the name matched one when the tree was built.
        builtin:   Option<&'static Builtin>,
        /// One tree per argument.
        arguments: Vec<Tree>,
    },
    /// A variable reference, `:name:`.
    VariableRef {
        /// Name of the variable.
        name: String,
    },
    /// A property of a host object, `:object.member:`.
    ObjectProperty {
        /// Name of the object.
        object: String,
        /// Everything after the first dot.
        member: String,
    },
    /// A method call on a host object, `object.member(a b ...)`.
    ObjectMethod {
        /// Name of the object.
        object:    String,
        /// Everything after the first dot.
        member:    String,
        /// One tree per argument.
        arguments: Vec<Tree>,
    },
}

impl Entry {
    /// Returns `true` for operator entries.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(..))
    }

    /// The number of entries this entry stands for, counting through nested
    /// trees. See [`Tree::full_len`].
    fn full_len(&self) -> usize {
        match self {
            Self::SubTree(tree) => tree.full_len(),
            Self::FunctionCall { arguments, .. } | Self::ObjectMethod { arguments, .. } => {
                1 + arguments.iter().map(Tree::full_len).sum::<usize>()
            },
            _ => 1,
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::SubTree(tree) => write!(f, "({tree})"),
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "{name}(")?;
                write_arguments(f, arguments)?;
                write!(f, ")")
            },
            Self::VariableRef { name } => write!(f, ":{name}:"),
            Self::ObjectProperty { object, member } => write!(f, ":{object}.{member}:"),
            Self::ObjectMethod { object,
                                 member,
                                 arguments, } => {
                write!(f, "{object}.{member}(")?;
                write_arguments(f, arguments)?;
                write!(f, ")")
            },
        }
    }
}

fn write_arguments(f: &mut std::fmt::Formatter<'_>, arguments: &[Tree]) -> std::fmt::Result {
    for (index, argument) in arguments.iter().enumerate() {
        if index > 0 {
            write!(f, " ")?;
        }
        if argument.trunk_len() > 1 {
            write!(f, "({argument})")?;
        } else {
            write!(f, "{argument}")?;
        }
    }
    Ok(())
}

/// A parsed expression: an ordered sequence of [`Entry`] values.
///
/// A tree is immutable once built and can be evaluated any number of times
/// against different contexts.
///
/// ## Example
/// ```
/// use tally::build;
///
/// let tree = build("2 * (3 + 4)").unwrap();
/// assert_eq!(tree.trunk_len(), 3);
/// assert_eq!(tree.full_len(), 5);
/// assert_eq!(tree.to_string(), "2 * (3 + 4)");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree {
    entries: Vec<Entry>,
}

impl Tree {
    #[must_use]
    pub const fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// The top-level entries, in order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of top-level entries.
    #[must_use]
    pub fn trunk_len(&self) -> usize {
        self.entries.len()
    }

    /// The number of entries counted through every nesting level.
    ///
    /// A parenthesised group contributes the full length of its contents in
    /// place of its own slot. A call contributes one slot for itself plus the
    /// full length of every argument tree.
    #[must_use]
    pub fn full_len(&self) -> usize {
        self.entries.iter().map(Entry::full_len).sum()
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
