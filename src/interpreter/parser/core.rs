use std::str::FromStr;

use bigdecimal::BigDecimal;
use tracing::debug;

use crate::{
    ast::{Entry, Tree},
    error::{ParseError, ParseResult},
    interpreter::{
        evaluator::function::core::lookup_builtin,
        lexer::{PartKind, next_part},
        parser::utils::{fold_sign, split_arguments, unescape},
        value::core::Value,
    },
};

/// Deepest nesting of groups and calls the builder accepts.
pub const MAX_DEPTH: usize = 128;

/// Builds the expression tree for `expression`.
///
/// The input is consumed part by part. Groups and calls are built
/// recursively from their inner text; call contents are then split into
/// argument trees. Every tree, nested or not, has its leading sign folded.
///
/// # Parameters
/// - `expression`: The source text.
///
/// # Returns
/// The finished tree, or the first [`ParseError`] met. No partial tree is
/// ever returned.
///
/// # Example
/// ```
/// use tally::{ast::Entry, build, error::ParseError};
///
/// let tree = build("sqrt(16) + :x:").unwrap();
/// assert_eq!(tree.trunk_len(), 3);
/// assert!(matches!(tree.entries()[0], Entry::FunctionCall { builtin: Some(_), .. }));
///
/// assert!(matches!(build("(1 + 2"), Err(ParseError::SyntaxError { .. })));
/// ```
pub fn build(expression: &str) -> ParseResult<Tree> {
    let tree = build_nested(expression, 0)?;

    debug!(trunk = tree.trunk_len(), full = tree.full_len(), "built expression tree");
    Ok(tree)
}

fn build_nested(expression: &str, depth: usize) -> ParseResult<Tree> {
    let mut entries = Vec::new();
    let mut rest = expression;

    loop {
        let part = next_part(rest)?;
        rest = &rest[part.consumed..];

        let entry = match part.kind {
            PartKind::Blank => break,
            PartKind::Number => Entry::Literal(number(part.text)?),
            PartKind::StringLiteral => Entry::Literal(Value::from(unescape(part.text))),
            PartKind::Variable => variable(part.text),
            PartKind::Operator => Entry::Operator(part.text.parse()?),
            PartKind::FunctionCall => group(part.text, depth)?,
        };
        entries.push(entry);
    }

    Ok(Tree::new(fold_sign(entries)))
}

fn number(literal: &str) -> ParseResult<Value> {
    BigDecimal::from_str(literal).map(Value::from)
                                 .map_err(|_| ParseError::InvalidNumber { literal: literal.to_string() })
}

/// A name with a dot addresses a member of a host object.
fn variable(name: &str) -> Entry {
    match name.split_once('.') {
        Some((object, member)) => Entry::ObjectProperty { object: object.to_string(),
                                                          member: member.to_string(), },
        None => Entry::VariableRef { name: name.to_string() },
    }
}

/// Builds a `name(...)` or `(...)` part.
fn group(text: &str, depth: usize) -> ParseResult<Entry> {
    if depth >= MAX_DEPTH {
        return Err(ParseError::NestingTooDeep { limit: MAX_DEPTH });
    }

    let (Some(open), Some(inner_end)) = (text.find('('), text.len().checked_sub(1)) else {
        return Err(ParseError::syntax("malformed group", text));
    };
    let name = &text[..open];
    let inner = build_nested(&text[open + 1..inner_end], depth + 1)?;

    if name.is_empty() {
        return Ok(Entry::SubTree(inner));
    }

    let arguments = split_arguments(inner);

    Ok(match name.split_once('.') {
        Some((object, member)) => Entry::ObjectMethod { object: object.to_string(),
                                                        member: member.to_string(),
                                                        arguments },
        None => Entry::FunctionCall { name: name.to_string(),
                                      builtin: lookup_builtin(name),
                                      arguments },
    })
}
