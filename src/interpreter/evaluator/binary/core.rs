use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// `+ - * /` and `%` are routed to the scalar handlers, `^` to
    /// `eval_pow`. When both operands are integers the result is then forced
    /// to an integer by truncation, whatever the operator produced; any real
    /// operand makes the result real.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use xlang::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let left = Value::Integer(10);
    /// let right = Value::Integer(4);
    ///
    /// let result = Context::eval_binary(BinaryOperator::Div, left, right);
    /// assert_eq!(result.unwrap(), Value::Integer(2));
    ///
    /// let result = Context::eval_binary(BinaryOperator::Div, Value::Real(10.0), right);
    /// assert_eq!(result.unwrap(), Value::Real(2.5));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Pow, Sub};

        let result = match op {
            Add | Sub | Mul | Div => Self::eval_scalar_op(op, left, right)?,
            Mod => Self::eval_mod(left, right)?,
            Pow => Self::eval_pow(left, right)?,
        };

        if left.is_integer() && right.is_integer() {
            return result.truncate();
        }

        Ok(result)
    }
}
