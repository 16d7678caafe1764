use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a scalar arithmetic operation.
    ///
    /// Two integers use checked integer arithmetic; division truncates toward
    /// zero. If either operand is real both are converted to `f64` first.
    /// Division by zero is checked explicitly for both tags. The operator
    /// must be one of `Add`, `Sub`, `Mul` or `Div`.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed scalar.
    pub(crate) fn eval_scalar_op(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Sub};
        use Value::{Integer, Real};

        if let (Integer(a), Integer(b)) = (left, right) {
            let result = match op {
                Add => a.checked_add(b),
                Sub => a.checked_sub(b),
                Mul => a.checked_mul(b),
                Div => {
                    if b == 0 {
                        return Err(RuntimeError::DivisionByZero);
                    }
                    a.checked_div(b)
                },
                _ => unreachable!(),
            };

            return result.map(Integer).ok_or(RuntimeError::Overflow);
        }

        let a = left.as_real()?;
        let b = right.as_real()?;

        Ok(Real(match op {
                    Add => a + b,
                    Sub => a - b,
                    Mul => a * b,
                    Div => {
                        if b == 0.0 {
                            return Err(RuntimeError::DivisionByZero);
                        }
                        a / b
                    },
                    _ => unreachable!(),
                }))
    }

    /// Evaluates `left % right` as a floored modulo.
    ///
    /// A non-zero result always has the sign of `right`, for integers and
    /// reals alike: `-7 % 3 = 2`, `7 % -3 = -2`.
    ///
    /// # Errors
    /// `RuntimeError::DivisionByZero` if `right` is zero.
    pub fn eval_mod(left: Value, right: Value) -> EvalResult<Value> {
        use Value::{Integer, Real};

        if let (Integer(a), Integer(b)) = (left, right) {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero);
            }

            let r = a.wrapping_rem(b);
            return Ok(Integer(if r != 0 && (r < 0) != (b < 0) { r + b } else { r }));
        }

        let a = left.as_real()?;
        let b = right.as_real()?;
        if b == 0.0 {
            return Err(RuntimeError::DivisionByZero);
        }

        let r = a % b;
        Ok(Real(if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }))
    }
}
