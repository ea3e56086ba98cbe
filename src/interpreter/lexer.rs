use logos::Logos;

use crate::error::{ParseError, ParseResult};

/// The kind of a lexical [`Part`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// A numeric literal such as `42` or `3.14`.
    Number,
    /// The contents of a `"`-delimited string, escapes still in place.
    StringLiteral,
    /// A binary operator, or a squashed run of signs.
    Operator,
    /// The name inside a `:name:` reference.
    Variable,
    /// A call `name(...)` or a bare group `(...)`, parentheses included.
    FunctionCall,
    /// Nothing but separators remain.
    Blank,
}

/// One segment of the input, produced by [`next_part`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part<'a> {
    /// The meaningful text of the part. See [`PartKind`] for what each kind
    /// keeps.
    pub text:     &'a str,
    /// What the part is.
    pub kind:     PartKind,
    /// Bytes of input consumed, leading separators included.
    pub consumed: usize,
}

/// The token that opens a part.
///
/// Logos classifies the head of the remaining input. Parts that span more
/// than one token (strings, variables, groups and sign runs) are then
/// extended by hand.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n,]+")]
enum Head {
    /// `"`
    #[token("\"")]
    Quote,
    /// `:`
    #[token(":")]
    Colon,
    /// A name immediately followed by `(`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_.]*\(")]
    Call,
    /// A name with no parenthesis after it.
    #[regex(r"[A-Za-z_][A-Za-z0-9_.]*")]
    Identifier,
    /// `(`
    #[token("(")]
    Open,
    /// `)`
    #[token(")")]
    Close,
    /// `+` or `-`, possibly the start of a run.
    #[regex(r"[+-]")]
    Sign,
    /// Every other operator.
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("^")]
    #[token("<")]
    #[token(">")]
    #[token("<<")]
    #[token(">>")]
    #[token("<=")]
    #[token(">=")]
    #[token("==")]
    #[token("!=")]
    Operator,
    /// Digits and dots; validated after matching.
    #[regex(r"[0-9][0-9.]*")]
    Number,
}

/// Space, tab, carriage return, newline and comma all separate parts.
const fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | ',')
}

const fn starts_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '^' | '<' | '>' | '=' | '!')
}

/// Extracts the next lexical part from `text`.
///
/// Leading separators are skipped. When nothing else remains the part is
/// [`PartKind::Blank`] and extraction is over.
///
/// # Parameters
/// - `text`: The remaining, not yet consumed input.
///
/// # Returns
/// The part and the number of bytes it consumed, or a
/// [`ParseError::SyntaxError`] when the input cannot be segmented.
///
/// # Example
/// ```
/// use tally::interpreter::lexer::{PartKind, next_part};
///
/// let part = next_part("  - -+ 4").unwrap();
/// assert_eq!(part.kind, PartKind::Operator);
/// assert_eq!(part.text, "+");
///
/// let part = next_part("sin(\")\" 1) * 2").unwrap();
/// assert_eq!(part.kind, PartKind::FunctionCall);
/// assert_eq!(part.text, "sin(\")\" 1)");
///
/// assert!(next_part("\"open").is_err());
/// ```
pub fn next_part(text: &str) -> ParseResult<Part<'_>> {
    let mut lexer = Head::lexer(text);

    let Some(head) = lexer.next() else {
        return Ok(Part { text:     "",
                         kind:     PartKind::Blank,
                         consumed: text.len(), });
    };

    let span = lexer.span();
    let start = span.start;
    let rest = &text[start..];

    match head {
        Ok(Head::Quote) => {
            let close = string_end(rest)?;
            Ok(Part { text:     &rest[1..close],
                      kind:     PartKind::StringLiteral,
                      consumed: start + close + 1, })
        },
        Ok(Head::Colon) => variable(rest).map(|(name, len)| Part { text:     name,
                                                                   kind:     PartKind::Variable,
                                                                   consumed: start + len, }),
        Ok(Head::Call | Head::Open) => {
            let close = group_end(rest, span.len() - 1)?;
            Ok(Part { text:     &rest[..=close],
                      kind:     PartKind::FunctionCall,
                      consumed: start + close + 1, })
        },
        Ok(Head::Close) => Err(ParseError::syntax("unbalanced parentheses", rest)),
        Ok(Head::Identifier) => {
            Err(ParseError::syntax(format!("unexpected name '{}'; call functions as name(...) and \
                                            write variables as :name:",
                                           lexer.slice()),
                                   rest))
        },
        Ok(Head::Sign) => Ok(squash_signs(rest, start)),
        Ok(Head::Operator) => Ok(Part { text:     lexer.slice(),
                                        kind:     PartKind::Operator,
                                        consumed: span.end, }),
        Ok(Head::Number) => number(lexer.slice(), rest, start),
        Err(()) => Err(ParseError::syntax("unexpected character", rest)),
    }
}

/// Finds the closing quote of the string literal at the start of `text`.
///
/// A quote preceded by an odd run of backslashes is escaped and does not
/// terminate the literal.
fn string_end(text: &str) -> ParseResult<usize> {
    let mut backslashes = 0usize;

    for (index, c) in text.char_indices().skip(1) {
        match c {
            '\\' => backslashes += 1,
            '"' if backslashes % 2 == 0 => return Ok(index),
            _ => backslashes = 0,
        }
    }

    Err(ParseError::syntax("unterminated string literal", text))
}

/// Finds the parenthesis that closes the one at byte `open`, skipping over
/// the contents of string literals.
fn group_end(text: &str, open: usize) -> ParseResult<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut index = open;

    while index < bytes.len() {
        match bytes[index] {
            b'"' => index += string_end(&text[index..])?,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(index);
                }
            },
            _ => {},
        }
        index += 1;
    }

    Err(ParseError::syntax("unbalanced parentheses", text))
}

/// Reads `:name:` at the start of `text`, returning the name and the length
/// of the whole reference.
fn variable(text: &str) -> ParseResult<(&str, usize)> {
    let body = &text[1..];
    let Some(close) = body.find(':') else {
        return Err(ParseError::syntax("unterminated variable reference", text));
    };

    let name = &body[..close];
    if name.is_empty() {
        return Err(ParseError::syntax("empty variable name", text));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ParseError::syntax("variable names cannot contain whitespace", text));
    }

    Ok((name, close + 2))
}

/// Squashes a run of `+` and `-`, possibly separated by blanks, into one
/// sign by the parity of its minus count.
fn squash_signs(text: &str, start: usize) -> Part<'_> {
    let mut negative = false;
    let mut end = 0;

    for (index, c) in text.char_indices() {
        match c {
            '-' => {
                negative = !negative;
                end = index + 1;
            },
            '+' => end = index + 1,
            c if is_separator(c) => {},
            _ => break,
        }
    }

    Part { text:     if negative { "-" } else { "+" },
           kind:     PartKind::Operator,
           consumed: start + end, }
}

fn number<'a>(literal: &'a str, text: &str, start: usize) -> ParseResult<Part<'a>> {
    if literal.matches('.').count() > 1 {
        return Err(ParseError::syntax("number has more than one decimal point", text));
    }
    if literal.ends_with('.') {
        return Err(ParseError::syntax("number ends with a decimal point", text));
    }
    if let Some(next) = text[literal.len()..].chars().next()
       && !is_separator(next)
       && !starts_operator(next)
    {
        return Err(ParseError::syntax(format!("unexpected '{next}' after number"), text));
    }

    Ok(Part { text:     literal,
              kind:     PartKind::Number,
              consumed: start + literal.len(), })
}
