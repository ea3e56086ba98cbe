/// Tree reduction.
///
/// Resolves tree entries and runs the precedence passes that combine them
/// into one value.
pub mod core;

/// The resolution context.
///
/// Variables, host functions and host objects consulted during evaluation,
/// together with the `Object` collaborator interface.
pub mod context;

/// Function evaluation.
///
/// Handles built-in and host function calls, argument checking, and
/// argument evaluation.
pub mod function;
