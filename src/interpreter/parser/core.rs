use crate::{
    ast::Statement,
    error::{Diagnostic, DiagnosticKind, Diagnostics},
    interpreter::lexer::{Token, TokenKind},
};

/// Statements in source order. `None` marks a statement whose construction
/// failed; the evaluator skips it.
pub type StatementList = Vec<Option<Statement>>;

/// Builds statements from tokens, collecting syntax diagnostics on the way.
///
/// The builder never gives up on the whole token stream: a malformed
/// statement is reported, recorded as absent, and building carries on with
/// the next one.
#[derive(Debug, Default)]
pub struct Builder {
    pub(in crate::interpreter::parser) diagnostics: Diagnostics,
}

impl Builder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every statement in `tokens`.
    ///
    /// # Parameters
    /// - `tokens`: The whole token stream, in source order.
    ///
    /// # Returns
    /// One entry per segmented statement, `None` where building failed.
    pub fn build_all(&mut self, tokens: &[Token]) -> StatementList {
        let mut statements = Vec::new();
        let mut rest = tokens;

        while !rest.is_empty() {
            let (current, remaining) = rest.split_at(statement_length(rest));
            let statement = self.build_statement(current);

            match &statement {
                Some(statement) => tracing::trace!(%statement, "built statement"),
                None => tracing::trace!(row = current[0].row, "statement dropped"),
            }

            statements.push(statement);
            rest = remaining;
        }

        statements
    }

    /// Classifies and builds a single statement.
    ///
    /// A statement starting with `print` is a print statement; one starting
    /// with an identifier followed by `=` is an assignment; anything else is
    /// an expression statement.
    ///
    /// # Parameters
    /// - `tokens`: The tokens of exactly one statement.
    ///
    /// # Returns
    /// The statement, or `None` if its expression could not be built.
    pub fn build_statement(&mut self, tokens: &[Token]) -> Option<Statement> {
        let (first, rest) = tokens.split_first()?;

        if first.kind == TokenKind::Keyword && first.text == "print" {
            return self.build_expression(rest, first).map(Statement::Print);
        }

        if first.kind == TokenKind::Identifier
           && let Some((equals, value)) = rest.split_first()
           && equals.is_operator("=")
        {
            return self.build_expression(value, equals)
                       .map(|value| Statement::Assignment { name: first.text.clone(),
                                                            value });
        }

        self.build_expression(tokens, first).map(Statement::Expression)
    }

    /// Consumes the builder, handing back what it reported.
    #[must_use]
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub(in crate::interpreter::parser) fn report(&mut self, token: &Token, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::at(token.position(), kind));
    }
}

/// Returns how many leading tokens of `tokens` form the first statement.
///
/// A statement ends before the first token that sits on a later row than the
/// token before it, unless a parenthesis opened within the statement is still
/// waiting to be closed.
///
/// # Example
/// ```
/// use xlang::interpreter::{lexer::tokenize, parser::core::statement_length};
///
/// let (tokens, _) = tokenize("x = (1 +\n 2)\nprint x");
///
/// assert_eq!(statement_length(&tokens), 6);
/// assert_eq!(statement_length(&tokens[6..]), 2);
/// ```
#[must_use]
pub fn statement_length(tokens: &[Token]) -> usize {
    let mut nesting: isize = 0;

    for (index, token) in tokens.iter().enumerate() {
        if index > 0 && nesting <= 0 && token.row > tokens[index - 1].row {
            return index;
        }

        if token.is_open_paren() {
            nesting += 1;
        } else if token.is_close_paren() {
            nesting -= 1;
        }
    }

    tokens.len()
}

/// Converts tokens into statements plus syntax diagnostics.
///
/// # Example
/// ```
/// use xlang::{
///     ast::{BinaryOperator, Expr, Statement},
///     interpreter::{lexer::tokenize, parser::core::build},
/// };
///
/// let (tokens, _) = tokenize("x = 20 + 4");
/// let (statements, diagnostics) = build(&tokens);
///
/// assert!(diagnostics.is_empty());
/// assert_eq!(statements,
///            vec![Some(Statement::Assignment { name:  "x".to_string(),
///                                              value: Expr::binary(Expr::operand("20"),
///                                                                  BinaryOperator::Add,
///                                                                  Expr::operand("4")), })]);
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
#[must_use]
pub fn build(tokens: &[Token]) -> (StatementList, Diagnostics) {
    let mut builder = Builder::new();
    let statements = builder.build_all(tokens);
    let diagnostics = builder.into_diagnostics();

    tracing::debug!(statements = statements.len(),
                    absent = statements.iter().filter(|s| s.is_none()).count(),
                    diagnostics = diagnostics.len(),
                    "built statements");

    (statements, diagnostics)
}
