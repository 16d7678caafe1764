use std::fmt;

use thiserror::Error;

/// A 1-based location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Line number, starting at 1.
    pub row:    usize,
    /// Character offset within the line, starting at 1.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// The fixed set of conditions reported by the tokenizer and the AST builder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The source ended while parentheses were still open.
    #[error("waiting parentheses to close")]
    WaitingParentheses,
    /// A character that starts no token.
    #[error("invalid token: {0}")]
    InvalidToken(char),
    /// A `)` with no open group to close.
    #[error("extra closed parentheses")]
    ExtraClosedParentheses,
    /// A malformed operand group.
    #[error("invalid syntax")]
    InvalidSyntax,
    /// A statement or operator with nothing to operate on.
    #[error("expression missing")]
    ExpressionMissing,
}

/// A single collected report.
///
/// Position-bound diagnostics render as `"<row>:<column> <message>"`,
/// phase-level ones as the bare message.
///
/// # Example
/// ```
/// use xlang::error::{Diagnostic, DiagnosticKind, Position};
///
/// let at = Diagnostic::at(Position { row: 2, column: 5 }, DiagnosticKind::InvalidSyntax);
/// assert_eq!(at.to_string(), "2:5 invalid syntax");
///
/// let plain = Diagnostic::plain(DiagnosticKind::WaitingParentheses);
/// assert_eq!(plain.to_string(), "waiting parentheses to close");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the condition was detected, if it is bound to a position.
    pub position: Option<Position>,
    /// What went wrong.
    pub kind:     DiagnosticKind,
}

impl Diagnostic {
    /// Creates a diagnostic bound to a source position.
    #[must_use]
    pub const fn at(position: Position, kind: DiagnosticKind) -> Self {
        Self { position: Some(position),
               kind }
    }

    /// Creates a phase-level diagnostic with no position.
    #[must_use]
    pub const fn plain(kind: DiagnosticKind) -> Self {
        Self { position: None,
               kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{position} {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Ordered log of diagnostics.
///
/// Every phase appends to its own collector and hands it back to the caller
/// alongside its normal output. The caller may merge collectors with
/// [`Diagnostics::extend`] and decides, between phases, whether the partial
/// results are worth carrying on with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends a diagnostic, keeping report order.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(%diagnostic, "diagnostic");
        self.entries.push(diagnostic);
    }

    /// Moves every diagnostic of `other` to the end of `self`.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Renders every diagnostic, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type IntoIter = std::slice::Iter<'a, Diagnostic>;
    type Item = &'a Diagnostic;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, diagnostic) in self.entries.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }

            write!(f, "{diagnostic}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn invalid_token_is_tagged_with_the_character() {
        let diagnostic = Diagnostic::plain(DiagnosticKind::InvalidToken('$'));

        assert_eq!(diagnostic.to_string(), "invalid token: $");
    }

    #[test]
    fn collector_keeps_report_order() {
        let mut first = Diagnostics::new();
        first.push(Diagnostic::at(Position { row: 1, column: 1 },
                                  DiagnosticKind::ExtraClosedParentheses));

        let mut second = Diagnostics::new();
        second.push(Diagnostic::plain(DiagnosticKind::WaitingParentheses));
        second.push(Diagnostic::at(Position { row: 4, column: 2 },
                                   DiagnosticKind::ExpressionMissing));

        first.extend(second);

        assert_eq!(first.len(), 3);
        assert_eq!(first.messages(),
                   vec!["1:1 extra closed parentheses".to_string(),
                        "waiting parentheses to close".to_string(),
                        "4:2 expression missing".to_string()]);
        assert_eq!(first.to_string(),
                   "1:1 extra closed parentheses\nwaiting parentheses to close\n4:2 expression \
                    missing");
    }

    #[test]
    fn empty_collector_renders_nothing() {
        let diagnostics = Diagnostics::default();

        assert!(diagnostics.is_empty());
        assert_eq!(diagnostics.to_string(), "");
    }
}
