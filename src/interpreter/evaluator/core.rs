use std::io::{self, Write};

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{evaluator::store::VariableStore, value::core::Value},
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing why the current statement was abandoned.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// Borrows the variable store and the output channel for the duration of a
/// run. Program values, print traces and runtime error messages are all
/// written to the same output, in the order they happen.
pub struct Context<'a> {
    /// Variables of the current run.
    pub store: &'a mut VariableStore,
    out:       &'a mut dyn Write,
}

impl<'a> Context<'a> {
    /// Creates an evaluation context over an existing store and output.
    pub fn new(store: &'a mut VariableStore, out: &'a mut dyn Write) -> Self {
        Self { store, out }
    }

    /// Runs every statement once, in order.
    ///
    /// Absent statements are skipped. A statement that fails at runtime has
    /// its error message written to the output, and the run continues with
    /// the next statement.
    ///
    /// # Errors
    /// Only a failure to write to the output stops the run.
    pub fn run(&mut self, statements: &[Option<Statement>]) -> io::Result<()> {
        for statement in statements {
            let Some(statement) = statement else {
                tracing::trace!("skipping absent statement");
                continue;
            };

            match self.execute(statement) {
                Ok(()) => {},
                Err(RuntimeError::Output(error)) => return Err(error),
                Err(error) => {
                    tracing::warn!(%error, %statement, "statement failed");
                    writeln!(self.out, "{error}")?;
                },
            }
        }

        Ok(())
    }

    /// Evaluates a single statement.
    ///
    /// - An expression statement prints its value.
    /// - A print statement prints every binary step of its expression, then
    ///   its value.
    /// - An assignment binds the value to the name, creating the variable on
    ///   first use.
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<()> {
        tracing::trace!(%statement, "executing");

        match statement {
            Statement::Expression(expr) => {
                let value = self.eval(expr, false)?;
                writeln!(self.out, "{value}")?;
            },
            Statement::Print(expr) => {
                tracing::trace!(steps = expr.operation_count(), "tracing print");
                let value = self.eval(expr, true)?;
                writeln!(self.out, "{value}")?;
            },
            Statement::Assignment { name, value } => {
                let value = self.eval(value, false)?;

                if self.store.assign(name, value) {
                    tracing::debug!(name = name.as_str(), %value, "variable created");
                } else {
                    tracing::trace!(name = name.as_str(), %value, "variable updated");
                }
            },
        }

        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// The left operand of a binary operation is evaluated before the right
    /// one, and a failure on the left means the right is never touched.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `trace`: Write each binary step as `(<left> <op> <right>) =
    ///   <result>` on its own line, as soon as it is computed.
    pub fn eval(&mut self, expr: &Expr, trace: bool) -> EvalResult<Value> {
        ensure_sufficient_stack(|| match expr {
            Expr::Operand(text) => self.eval_operand(text),
            Expr::BinaryOperation { left, op, right } => {
                let left = self.eval(left, trace)?;
                let right = self.eval(right, trace)?;
                let result = Self::eval_binary(*op, left, right)?;

                if trace {
                    writeln!(self.out, "({left} {op} {right}) = {result}")?;
                }

                Ok(result)
            },
        })
    }

    /// Evaluates an operand leaf.
    ///
    /// Text that starts with a letter or `_` after its optional sign is a
    /// variable reference; anything else is a literal.
    ///
    /// # Errors
    /// - `RuntimeError::UndefinedVariable` for a name that was never
    ///   assigned.
    /// - The literal parsing errors of [`Value::parse_literal`].
    pub fn eval_operand(&self, text: &str) -> EvalResult<Value> {
        let (negative, body) = match text.strip_prefix('-') {
            Some(body) => (true, body),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        if !body.starts_with(|c: char| c.is_alphabetic() || c == '_') {
            return Value::parse_literal(text);
        }

        let value = self.store
                        .get(body)
                        .ok_or_else(|| RuntimeError::UndefinedVariable { name: body.to_string() })?;

        if negative { value.negate() } else { Ok(value) }
    }
}

/// Runs `statements` against `store`, writing program output to `out`.
///
/// # Errors
/// Returns an error only if writing to `out` fails.
///
/// # Example
/// ```
/// use xlang::interpreter::{
///     evaluator::{core::run, store::VariableStore},
///     lexer::tokenize,
///     parser::core::build,
///     value::core::Value,
/// };
///
/// let (tokens, _) = tokenize("x = 10 / 4\nprint x * 2.0");
/// let (statements, _) = build(&tokens);
///
/// let mut store = VariableStore::new();
/// let mut out = Vec::new();
/// run(&statements, &mut store, &mut out).unwrap();
///
/// assert_eq!(store.get("x"), Some(Value::Integer(2)));
/// assert_eq!(String::from_utf8(out).unwrap(), "(2 * 2) = 4\n4\n");
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
pub fn run(statements: &[Option<Statement>],
           store: &mut VariableStore,
           out: &mut dyn Write)
           -> io::Result<()> {
    Context::new(store, out).run(statements)?;

    tracing::debug!(variables = store.len(), "run finished");
    Ok(())
}
