/// Elementary built-in functions.
///
/// Constants, trigonometry, roots, exponentials, rounding and `factorial`.
pub mod builtin;
/// The `log` function implementation.
///
/// Base 10 by default, any positive base other than one on request.
pub mod log;
/// `min` and `max` function implementations.
///
/// Returns the minimum or maximum value from a list of arguments.
pub mod min_max;
/// String-oriented functions: `len` and `eval`.
pub mod text;
/// The `trunc` (truncate) function implementation.
///
/// Truncates toward zero, optionally keeping some fractional digits.
pub mod trunc;

/// The built-in table and call dispatch.
///
/// Declares the static name table with arity checks and evaluates calls,
/// falling back to host functions for names the table does not know.
pub mod core;
