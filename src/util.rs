/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point values without silent data loss. Mixing an integer with a
/// real only succeeds while the integer is exactly representable, and forcing
/// a real back to an integer fails instead of saturating.
pub mod num;
/// Stack growth for deeply nested expression trees.
///
/// A chain of operators without parentheses builds a tree as deep as the
/// chain is long, so the recursive builder and evaluator grow the stack on
/// demand instead of overflowing it.
pub mod stack;
