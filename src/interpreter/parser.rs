/// Tree construction.
///
/// Drives the lexer over the input and assembles the flat, recursively
/// nested [`Tree`](crate::ast::Tree), enforcing the nesting limit.
pub mod core;

/// Helpers shared by the builder and the evaluator.
///
/// Leading sign folding, argument splitting and string unescaping.
pub mod utils;
