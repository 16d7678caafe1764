/// Statement segmentation and classification.
///
/// Splits the token stream into statements, decides whether each one is a
/// print, an assignment or a bare expression, and owns the diagnostics
/// collected while building.
pub mod core;

/// Binary operation building.
///
/// Finds the operator an expression splits at by scanning right to left for
/// the loosest-binding operator outside parentheses, then builds both sides.
pub mod binary;

/// Operand group resolution.
///
/// Handles token ranges with no top-level operator: parenthesized groups,
/// signed operands and plain leaves.
pub mod unary;
