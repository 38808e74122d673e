/// Function values and calling conventions.
///
/// Defines the `Function` enum with one variant per calling convention, user
/// closures and bound methods.
pub mod function;
/// Lazy sequences.
///
/// Defines `Sequence`, a shared single-pass iterator, and iteration over every
/// iterable value.
pub mod sequence;

pub mod core;
