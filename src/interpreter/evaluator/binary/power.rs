use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates an exponentiation operation.
    ///
    /// Integer bases with a non-negative integer exponent that fits in a
    /// `u32` use checked arithmetic. Every other case is computed in
    /// floating-point form with `powf` and yields a real; `eval_binary` then
    /// truncates it back when both operands were integers.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result of `base ^ exponent`.
    ///
    /// # Example
    /// ```
    /// use xlang::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let b = Value::Integer(2);
    /// let e = Value::Integer(10);
    ///
    /// let result = Context::eval_pow(b, e).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Context::eval_pow(b, Value::Integer(-2)).unwrap();
    /// assert_eq!(result, Value::Real(0.25));
    /// ```
    pub fn eval_pow(base: Value, exponent: Value) -> EvalResult<Value> {
        use Value::{Integer, Real};

        if let (Integer(b), Integer(e)) = (base, exponent)
           && let Ok(e) = u32::try_from(e)
        {
            return b.checked_pow(e).map(Integer).ok_or(RuntimeError::Overflow);
        }

        Ok(Real(base.as_real()?.powf(exponent.as_real()?)))
    }
}
