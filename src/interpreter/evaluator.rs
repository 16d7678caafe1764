/// Binary operator evaluation logic.
///
/// Applies `+ - * / % ^` to two tagged values and enforces the integer
/// truncation rule.
pub mod binary;

/// Core evaluation logic and context management.
///
/// Contains the statement runner, expression walking, trace mode and the
/// reporting of runtime errors.
pub mod core;

/// The run-scoped variable store.
///
/// Maps variable names to their current values. Created empty for each run
/// and handed to the evaluator by mutable reference.
pub mod store;
