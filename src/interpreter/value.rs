/// The numeric value type.
///
/// Defines `Value`, the integer/real duality every expression evaluates to,
/// along with literal parsing and the conversions used by the truncation
/// rule.
pub mod core;
