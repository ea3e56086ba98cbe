/// Decimal helpers.
///
/// This module provides the numeric routines the value algebra and the
/// built-in functions share: conversions between decimals and machine
/// numbers, rounding, exact integer powers, and the logarithm and exponential
/// series computed to a fixed number of significant digits.
///
/// Fallible routines return `Err` with a human-readable reason, which callers
/// turn into an `Undefined` value.
pub mod num;
