/// Boolean values.
///
/// Defines the `Boolean` type produced by comparisons. Booleans combine with
/// `+` (or) and `*` (and) and compare for equality.
pub mod boolean;
/// Multi-value aggregation.
///
/// Defines the `MultiValue` type used when a function returns several values
/// at once. It cannot be written in an expression directly.
pub mod multi;
/// Exact decimal numbers.
///
/// Defines the `Number` type with exact arithmetic, comparisons and the
/// bit-shift style scaling by powers of two.
pub mod number;
/// The operation surface shared by every value type.
///
/// Declares the `Operations` trait whose default bodies answer with
/// `Undefined`, so each value type overrides only what it supports.
pub mod operations;
/// String values.
///
/// Defines the `Text` type: concatenation, repetition, byte slicing through
/// shifts, and raw-content comparison.
pub mod text;
/// The absorbing `Undefined` value.
///
/// Defines the `Undefined` type which every operation returns unchanged,
/// preserving the reason of the first failure.
pub mod undefined;

pub mod core;
