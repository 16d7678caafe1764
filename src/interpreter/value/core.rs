use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{f64_to_i64_truncated, i64_to_f64_checked},
};

/// Represents a runtime value in the interpreter.
///
/// Every value carries an explicit integer/real tag. The tag of a binary
/// result is decided by the tags of both operands, never by the magnitude of
/// the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A integer value (64 bit integer).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl Value {
    /// Parses literal text, including an optional leading sign.
    ///
    /// Text containing a `.` is a real, anything else an integer.
    ///
    /// # Errors
    /// - `RuntimeError::Overflow` if an integer literal does not fit in 64
    ///   bits.
    /// - `RuntimeError::InvalidOperand` if the text is not a number.
    ///
    /// # Example
    /// ```
    /// use xlang::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::parse_literal("42").unwrap(), Value::Integer(42));
    /// assert_eq!(Value::parse_literal("-2.50").unwrap(), Value::Real(-2.5));
    /// assert!(Value::parse_literal("4x").is_err());
    /// ```
    pub fn parse_literal(text: &str) -> EvalResult<Self> {
        let invalid = || RuntimeError::InvalidOperand { text: text.to_string() };

        if text.contains('.') {
            return text.parse().map(Self::Real).map_err(|_| invalid());
        }

        let digits = text.trim_start_matches(['+', '-']);
        let is_numeric = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());

        text.parse()
            .map(Self::Integer)
            .map_err(|_| if is_numeric { RuntimeError::Overflow } else { invalid() })
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Converts the value to an `f64`.
    ///
    /// Integers convert only while they are exactly representable.
    ///
    /// # Errors
    /// `RuntimeError::IntegerTooLarge` for integers beyond `±(2^53 - 1)`.
    pub fn as_real(self) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(r),
            Self::Integer(n) => i64_to_f64_checked(n, RuntimeError::IntegerTooLarge { value: n }),
        }
    }

    /// Forces the value to an integer by dropping any fractional part.
    ///
    /// # Errors
    /// `RuntimeError::Overflow` if a real is not finite or out of the `i64`
    /// range.
    ///
    /// # Example
    /// ```
    /// use xlang::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Real(2.5).truncate().unwrap(), Value::Integer(2));
    /// assert_eq!(Value::Integer(7).truncate().unwrap(), Value::Integer(7));
    /// ```
    pub fn truncate(self) -> EvalResult<Self> {
        match self {
            Self::Integer(_) => Ok(self),
            Self::Real(r) => f64_to_i64_truncated(r).map(Self::Integer),
        }
    }

    /// Arithmetic negation, keeping the tag.
    ///
    /// # Errors
    /// `RuntimeError::Overflow` when negating `i64::MIN`.
    pub fn negate(self) -> EvalResult<Self> {
        match self {
            Self::Integer(n) => n.checked_neg().map(Self::Integer).ok_or(RuntimeError::Overflow),
            Self::Real(r) => Ok(Self::Real(-r)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r}"),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}
