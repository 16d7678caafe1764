/// Operator dispatch and the integer truncation rule.
pub mod core;

/// Exponentiation.
pub mod power;

/// Addition, subtraction, multiplication, division and modulo.
///
/// Integer arithmetic is checked, and a zero right operand of `/` or `%` is an
/// error for both integers and reals.
pub mod scalar;
