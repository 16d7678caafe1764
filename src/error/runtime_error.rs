use thiserror::Error;

/// Represents all errors that can occur while evaluating a statement.
///
/// Every variant except [`RuntimeError::Output`] is fail-soft: it is written to
/// the output channel, the statement in progress is abandoned and the next
/// statement runs normally.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Tried to read a variable that was never assigned.
    #[error("undefined variable: {name}")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// An operand leaf that is neither a variable nor a number.
    #[error("invalid operand: {text}")]
    InvalidOperand {
        /// The leaf text as written in the source.
        text: String,
    },
    /// Attempted `/` or `%` with a zero right operand.
    #[error("division by zero")]
    DivisionByZero,
    /// An integer result does not fit in 64 bits.
    #[error("integer overflow")]
    Overflow,
    /// An integer could not be mixed with a real without losing precision.
    #[error("integer too large to convert to a real number: {value}")]
    IntegerTooLarge {
        /// The offending integer.
        value: i64,
    },
    /// Writing program output failed. This one aborts the run.
    #[error("failed to write program output")]
    Output(#[from] std::io::Error),
}
