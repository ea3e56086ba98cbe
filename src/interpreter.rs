/// The evaluator module reduces trees to values.
///
/// The evaluator resolves every entry of a tree, consulting the context for
/// variables, functions and object members, and then combines the results
/// in one left-to-right pass per precedence tier.
///
/// # Responsibilities
/// - Runs the reduction passes over resolved entries.
/// - Dispatches calls to built-in and host functions.
/// - Reports every failure as an `Undefined` value instead of aborting.
pub mod evaluator;
/// The lexer module segments source text into parts.
///
/// Each call extracts the next part of the remaining input: a number, a
/// string literal, a variable reference, an operator, or a whole call or
/// group with its parentheses.
///
/// # Responsibilities
/// - Skips separators and recognises the head of the next part.
/// - Counts brackets across groups, skipping string contents.
/// - Reports malformed input as a `ParseError`.
pub mod lexer;
/// The parser module builds the expression tree from lexical parts.
///
/// Groups and calls are built recursively, call contents are split into
/// argument trees, and leading signs are folded into multiplications.
///
/// # Responsibilities
/// - Converts parts into tree entries.
/// - Resolves built-in function names while building.
/// - Bounds nesting depth.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types produced by evaluation: exact
/// numbers, strings, booleans, multi-values and the absorbing `Undefined`.
/// Every type answers the complete operation surface.
///
/// # Responsibilities
/// - Defines the `Value` enum and the `Operations` trait.
/// - Implements arithmetic, comparison and casts per value type.
/// - Turns unsupported combinations into `Undefined`.
pub mod value;
