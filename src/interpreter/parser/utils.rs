use crate::{
    ast::{Entry, Operator, Tree},
    interpreter::value::core::Value,
};

/// Applies the leading sign rule to a freshly built entry list.
///
/// A leading `+` is dropped. A leading `-` is replaced by `-1 *`, so unary
/// minus at the start of an expression becomes a multiplication and needs no
/// operator of its own during evaluation.
///
/// # Example
/// ```
/// use tally::{
///     ast::{Entry, Operator},
///     interpreter::{parser::utils::fold_sign, value::core::Value},
/// };
///
/// let folded = fold_sign(vec![Entry::Operator(Operator::Sub), Entry::Literal(Value::from(4))]);
/// assert_eq!(folded,
///            vec![Entry::Literal(Value::from(-1)),
///                 Entry::Operator(Operator::Mul),
///                 Entry::Literal(Value::from(4))]);
/// ```
#[must_use]
pub fn fold_sign(mut entries: Vec<Entry>) -> Vec<Entry> {
    match entries.first() {
        Some(Entry::Operator(Operator::Add)) => {
            entries.remove(0);
        },
        Some(Entry::Operator(Operator::Sub)) => {
            entries[0] = Entry::Operator(Operator::Mul);
            entries.insert(0, Entry::Literal(Value::from(-1)));
        },
        _ => {},
    }
    entries
}

/// Partitions the contents of a call into argument trees.
///
/// Arguments are separated by whitespace only, so a boundary is inferred
/// wherever two non-operator entries are adjacent. Inside one expression that
/// never happens, which makes the split unambiguous for flat arguments.
///
/// A sign between two arguments binds to neither: `f(1 -2)` is the single
/// argument `1 - 2`, while `f(1 (-2))` is two arguments.
///
/// # Example
/// ```
/// use tally::{build, interpreter::parser::utils::split_arguments};
///
/// let inner = build("1 2 + 3 :x:").unwrap();
/// let arguments = split_arguments(inner);
/// assert_eq!(arguments.len(), 3);
/// assert_eq!(arguments[1].to_string(), "2 + 3");
/// ```
#[must_use]
pub fn split_arguments(inner: Tree) -> Vec<Tree> {
    let mut arguments = Vec::new();
    let mut current: Vec<Entry> = Vec::new();

    for entry in inner.into_entries() {
        if let Some(last) = current.last()
           && !last.is_operator()
           && !entry.is_operator()
        {
            arguments.push(Tree::new(std::mem::take(&mut current)));
        }
        current.push(entry);
    }

    if !current.is_empty() {
        arguments.push(Tree::new(current));
    }
    arguments
}

/// Resolves the escapes in the contents of a string literal.
///
/// `\n`, `\t` and `\r` become control characters; any other escaped
/// character stands for itself.
pub(in crate::interpreter::parser) fn unescape(literal: &str) -> String {
    let mut text = String::with_capacity(literal.len());
    let mut chars = literal.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some('r') => text.push('\r'),
            Some(other) => text.push(other),
            None => text.push('\\'),
        }
    }
    text
}
