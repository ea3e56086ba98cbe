/// Structural errors.
///
/// Defines the errors raised while segmenting or building an expression:
/// unterminated literals, unbalanced parentheses, malformed numbers and
/// operators the language does not know. These are the only failures that
/// abort; everything that goes wrong during evaluation is an `Undefined`
/// value instead.
pub mod parse_error;

pub use parse_error::{ParseError, ParseResult};
