//! # tally
//!
//! tally is an embeddable expression language written in Rust.
//! It segments, builds, and evaluates arithmetic, comparison and string
//! expressions over exact decimal numbers, resolving variables, functions and
//! host object members through a caller-supplied context.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

pub use crate::interpreter::{
    evaluator::context::Context,
    parser::core::build,
    value::core::Value,
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Tree` and `Entry` types and the binary
/// `Operator` set. A tree is a flat sequence of entries; only groups and
/// calls nest.
///
/// # Responsibilities
/// - Defines the entry kinds a tree can hold.
/// - Measures trees for diagnostics.
/// - Renders trees back to expression text.
pub mod ast;
/// Provides the structural error type.
///
/// This module defines the errors raised while segmenting and building an
/// expression. Evaluation itself never fails; it produces `Undefined` values
/// instead.
pub mod error;
/// Orchestrates the process of evaluating an expression.
///
/// This module ties together lexing, tree building, evaluation and the
/// value types.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides the resolution context expressions are evaluated against.
pub mod interpreter;
/// General numeric helpers.
///
/// Decimal conversions, rounding, powers and the transcendental series used
/// throughout the value algebra and the built-in functions.
pub mod util;

/// Builds and evaluates an expression in one step.
///
/// Structural failures from the lexer or the builder are folded into an
/// `Undefined` carrying the error message, so callers only ever check one
/// result type.
///
/// # Examples
/// ```
/// use tally::{Context, Value, evaluate};
///
/// let context = Context::new().with_variable("price", 40);
/// assert_eq!(evaluate(":price: * 3 - 20", &context), Value::from(100));
///
/// // Unbalanced input does not panic or error; it is Undefined.
/// let broken = evaluate("(1 + 2", &context);
/// assert!(broken.is_undefined());
/// assert!(broken.reason().unwrap().contains("unbalanced parentheses"));
/// ```
#[must_use]
pub fn evaluate(text: &str, context: &Context) -> Value {
    match build(text) {
        Ok(tree) => tree.eval(context),
        Err(e) => {
            debug!(error = %e, "expression rejected");
            Value::undefined(e.to_string())
        },
    }
}
