use std::fmt;

use logos::Logos;

use crate::error::{Diagnostic, DiagnosticKind, Diagnostics, Position};

/// Reserved words. A keyword only matches on a word boundary, see
/// [`keyword_prefix`].
const KEYWORDS: [&str; 1] = ["print"];

/// The category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Integer or decimal literal, such as `42` or `3.14`.
    Literal,
    /// Variable name, such as `x`, `_total2` or `größe`.
    Identifier,
    /// `print`
    Keyword,
    /// One of `+ - * / % ^ =`.
    Operator,
    /// `(` or `)`.
    Parenthesis,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Literal => "literal",
            Self::Identifier => "identifier",
            Self::Keyword => "keyword",
            Self::Operator => "operator",
            Self::Parenthesis => "parenthesis",
        };
        write!(f, "{name}")
    }
}

/// Represents a lexical token in the source input.
///
/// Tokens keep their text exactly as written along with the 1-based row and
/// column of their first character. They are never modified once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:   TokenKind,
    /// The lexeme as it appears in the source.
    pub text:   String,
    /// Line number, starting at 1.
    pub row:    usize,
    /// Character offset within the line, starting at 1.
    pub column: usize,
}

impl Token {
    #[must_use]
    pub const fn position(&self) -> Position {
        Position { row:    self.row,
                   column: self.column, }
    }

    /// Reports whether the token is the operator spelled `symbol`.
    #[must_use]
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }

    #[must_use]
    pub fn is_open_paren(&self) -> bool {
        self.kind == TokenKind::Parenthesis && self.text == "("
    }

    #[must_use]
    pub fn is_close_paren(&self) -> bool {
        self.kind == TokenKind::Parenthesis && self.text == ")"
    }

    /// Reports whether the token can stand on its own as an operand leaf.
    #[must_use]
    pub fn is_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Literal | TokenKind::Identifier)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} {}", self.row, self.column, self.kind, self.text)
    }
}

/// Raw token classes recognised by `logos`.
///
/// Longest match plus `logos` priorities reproduce the classification order
/// literal, operator, keyword, identifier, parenthesis. The two cases longest
/// match cannot express are handled by the [`Tokenizer`] driver: a keyword
/// followed directly by a digit, and the one-character advance after an
/// invalid token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexerExtras)]
enum Lexeme {
    /// `42`, `3.14`
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Literal,
    /// `12.`: a dot must be followed by at least one digit.
    #[regex(r"[0-9]+\.")]
    MalformedLiteral,
    /// `+ - * / % ^ =`
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("^")]
    #[token("=")]
    Operator,
    /// `print`
    #[token("print")]
    Keyword,
    /// Identifier tokens; variable names such as `x`, `total_2` or `größe`.
    #[regex(r"[\p{L}_][\p{L}0-9_]*")]
    Identifier,
    /// `(`
    #[token("(")]
    OpenParen,
    /// `)`
    #[token(")")]
    CloseParen,
    /// Line breaks.
    #[token("\n", newline)]
    NewLine,
    /// Spaces, tabs, vertical tabs and carriage returns.
    #[regex(r"[ \t\r\x0B]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current row and where it starts so every token can be given a
/// row and column. Offsets are absolute byte offsets into the whole source,
/// which stay valid when the driver restarts the lexer part-way through.
#[derive(Debug, Clone, Copy)]
struct LexerExtras {
    /// The current line number in the source being tokenized.
    row:        usize,
    /// Byte offset of the first character of the current line.
    line_start: usize,
    /// Byte offset at which the running `logos` lexer was started.
    base:       usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { row:        1,
               line_start: 0,
               base:       0, }
    }
}

fn newline(lex: &mut logos::Lexer<Lexeme>) -> logos::Skip {
    lex.extras.row += 1;
    lex.extras.line_start = lex.extras.base + lex.span().end;
    logos::Skip
}

/// Returns the keyword `text` starts with when the keyword is cut off by a
/// word boundary inside an identifier lexeme.
///
/// Identifier lexemes continue with letters (any script), ASCII digits and
/// `_`. Of those only a digit ends a keyword, so `print2` splits into `print`
/// and `2` while `printer`, `print_x` and `printé` stay identifiers.
fn keyword_prefix(text: &str) -> Option<&'static str> {
    KEYWORDS.into_iter().find(|keyword| {
                            text.strip_prefix(keyword)
                                .and_then(|rest| rest.chars().next())
                                .is_some_and(|next| next.is_ascii_digit())
                        })
}

/// Fail-soft driver around the `logos` lexer.
struct Tokenizer<'src> {
    source:      &'src str,
    lexer:       logos::Lexer<'src, Lexeme>,
    nesting:     usize,
    tokens:      Vec<Token>,
    diagnostics: Diagnostics,
}

impl<'src> Tokenizer<'src> {
    fn new(source: &'src str) -> Self {
        Self { source,
               lexer: Lexeme::lexer_with_extras(source, LexerExtras::default()),
               nesting: 0,
               tokens: Vec::new(),
               diagnostics: Diagnostics::new() }
    }

    fn run(mut self) -> (Vec<Token>, Diagnostics) {
        while let Some(lexeme) = self.lexer.next() {
            let start = self.lexer.extras.base + self.lexer.span().start;
            let text = self.lexer.slice();

            match lexeme {
                Ok(Lexeme::Literal) => self.push(TokenKind::Literal, text, start),
                Ok(Lexeme::Operator) => self.push(TokenKind::Operator, text, start),
                Ok(Lexeme::Keyword) => self.push(TokenKind::Keyword, text, start),
                Ok(Lexeme::Identifier) => self.identifier(text, start),
                Ok(Lexeme::OpenParen) => {
                    self.nesting += 1;
                    self.push(TokenKind::Parenthesis, text, start);
                },
                Ok(Lexeme::CloseParen) => self.close_paren(text, start),
                Ok(Lexeme::MalformedLiteral) | Err(()) => self.invalid(text, start),
                Ok(Lexeme::NewLine | Lexeme::Ignored) => {},
            }
        }

        if self.nesting > 0 {
            self.diagnostics
                .push(Diagnostic::plain(DiagnosticKind::WaitingParentheses));
        }

        (self.tokens, self.diagnostics)
    }

    fn push(&mut self, kind: TokenKind, text: &str, start: usize) {
        let Position { row, column } = self.position(start);
        let token = Token { kind,
                            text: text.to_string(),
                            row,
                            column };

        tracing::trace!(%token, "token");
        self.tokens.push(token);
    }

    fn identifier(&mut self, text: &str, start: usize) {
        if let Some(keyword) = keyword_prefix(text) {
            self.push(TokenKind::Keyword, keyword, start);
            self.resume_at(start + keyword.len());
        } else {
            self.push(TokenKind::Identifier, text, start);
        }
    }

    fn close_paren(&mut self, text: &str, start: usize) {
        if self.nesting == 0 {
            self.diagnostics
                .push(Diagnostic::at(self.position(start), DiagnosticKind::ExtraClosedParentheses));
        } else {
            self.nesting -= 1;
        }

        self.push(TokenKind::Parenthesis, text, start);
    }

    /// Reports the first character of `text` and resumes scanning right after
    /// it, whatever the rest of the failed lexeme was.
    fn invalid(&mut self, text: &str, start: usize) {
        let Some(character) = text.chars().next() else {
            return;
        };

        self.diagnostics
            .push(Diagnostic::plain(DiagnosticKind::InvalidToken(character)));
        self.resume_at(start + character.len_utf8());
    }

    /// Restarts the `logos` lexer at an absolute byte offset, keeping the
    /// row bookkeeping.
    fn resume_at(&mut self, offset: usize) {
        let mut extras = self.lexer.extras;
        extras.base = offset;
        self.lexer = Lexeme::lexer_with_extras(&self.source[offset..], extras);
    }

    fn position(&self, offset: usize) -> Position {
        let extras = &self.lexer.extras;
        let column = self.source[extras.line_start..offset].chars().count() + 1;

        Position { row: extras.row,
                   column }
    }
}

/// Converts source text into tokens plus lexical diagnostics.
///
/// Tokenizing never stops early: an invalid character is reported and
/// skipped, an unmatched `)` is reported and kept, and unclosed `(` are
/// reported once at the end. The returned tokens are every token that could
/// be classified, in source order.
///
/// # Example
/// ```
/// use xlang::interpreter::lexer::{TokenKind, tokenize};
///
/// let (tokens, diagnostics) = tokenize("x = 1.5 $");
///
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[2].kind, TokenKind::Literal);
/// assert_eq!(tokens[2].text, "1.5");
/// assert_eq!(diagnostics.to_string(), "invalid token: $");
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
#[must_use]
pub fn tokenize(source: &str) -> (Vec<Token>, Diagnostics) {
    let (tokens, diagnostics) = Tokenizer::new(source).run();

    tracing::debug!(tokens = tokens.len(),
                    diagnostics = diagnostics.len(),
                    "tokenized source");

    (tokens, diagnostics)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|token| token.kind).collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|token| token.text.as_str()).collect()
    }

    #[test]
    fn integer_literal() {
        let (tokens, diagnostics) = tokenize("123");

        assert!(diagnostics.is_empty());
        assert_eq!(tokens,
                   vec![Token { kind:   TokenKind::Literal,
                                text:   "123".to_string(),
                                row:    1,
                                column: 1, }]);
    }

    #[test]
    fn decimal_literal() {
        let (tokens, diagnostics) = tokenize("123.5");

        assert!(diagnostics.is_empty());
        assert_eq!(kinds(&tokens), vec![TokenKind::Literal]);
        assert_eq!(texts(&tokens), vec!["123.5"]);
    }

    #[test]
    fn trailing_dot_is_not_a_literal() {
        let (tokens, diagnostics) = tokenize("12.");

        assert!(tokens.is_empty());
        assert_eq!(diagnostics.messages(),
                   vec!["invalid token: 1", "invalid token: 2", "invalid token: ."]);
    }

    #[test]
    fn lone_dot_is_invalid() {
        let (tokens, diagnostics) = tokenize("1 . 2");

        assert_eq!(texts(&tokens), vec!["1", "2"]);
        assert_eq!(diagnostics.messages(), vec!["invalid token: ."]);
    }

    #[test]
    fn keyword_needs_a_word_boundary() {
        let (tokens, _) = tokenize("print");
        assert_eq!(kinds(&tokens), vec![TokenKind::Keyword]);

        let (tokens, _) = tokenize("printer");
        assert_eq!(kinds(&tokens), vec![TokenKind::Identifier]);
        assert_eq!(texts(&tokens), vec!["printer"]);

        let (tokens, _) = tokenize("print_x");
        assert_eq!(kinds(&tokens), vec![TokenKind::Identifier]);

        let (tokens, _) = tokenize("print(1)");
        assert_eq!(kinds(&tokens),
                   vec![TokenKind::Keyword,
                        TokenKind::Parenthesis,
                        TokenKind::Literal,
                        TokenKind::Parenthesis]);
    }

    #[test]
    fn keyword_followed_by_digit_splits() {
        let (tokens, diagnostics) = tokenize("print2.5");

        assert!(diagnostics.is_empty());
        assert_eq!(kinds(&tokens), vec![TokenKind::Keyword, TokenKind::Literal]);
        assert_eq!(texts(&tokens), vec!["print", "2.5"]);
        assert_eq!(tokens[1].column, 6);
    }

    #[test]
    fn every_operator_is_recognised() {
        let (tokens, diagnostics) = tokenize("+ - * ^/ %=");

        assert!(diagnostics.is_empty());
        assert!(tokens.iter().all(|token| token.kind == TokenKind::Operator));
        assert_eq!(texts(&tokens), vec!["+", "-", "*", "^", "/", "%", "="]);
    }

    #[test]
    fn rows_and_columns_follow_the_source() {
        let (tokens, diagnostics) = tokenize("x = 20 + 4\n\tprint  (x)\n");

        assert!(diagnostics.is_empty());
        let positions: Vec<(usize, usize)> =
            tokens.iter().map(|token| (token.row, token.column)).collect();
        assert_eq!(positions,
                   vec![(1, 1), (1, 3), (1, 5), (1, 8), (1, 10), (2, 2), (2, 9), (2, 10), (2, 11)]);
    }

    #[test]
    fn balanced_parentheses_produce_no_diagnostics() {
        let (tokens, diagnostics) = tokenize("((1 + (2)) * (3\n))");

        assert!(diagnostics.is_empty());
        assert_eq!(tokens.iter().filter(|token| token.is_open_paren()).count(),
                   tokens.iter().filter(|token| token.is_close_paren()).count());
    }

    #[test]
    fn extra_closing_parenthesis_keeps_the_counter_at_zero() {
        let (tokens, diagnostics) = tokenize("())(");

        assert_eq!(tokens.len(), 4);
        assert_eq!(diagnostics.messages(),
                   vec!["1:3 extra closed parentheses", "waiting parentheses to close"]);
    }

    #[test]
    fn unclosed_parenthesis_is_reported_once_at_the_end() {
        let (_, diagnostics) = tokenize("((1 + 2)\nx");

        assert_eq!(diagnostics.messages(), vec!["waiting parentheses to close"]);
    }

    #[test]
    fn invalid_characters_do_not_stop_tokenizing() {
        let (tokens, diagnostics) = tokenize("a # b\n€ c");

        assert_eq!(texts(&tokens), vec!["a", "b", "c"]);
        assert_eq!(tokens[2].column, 3);
        assert_eq!(diagnostics.messages(), vec!["invalid token: #", "invalid token: €"]);
    }

    #[test]
    fn invalid_token_diagnostics_carry_no_position() {
        let (tokens, diagnostics) = tokenize("x = 3 $ 4");

        assert_eq!(texts(&tokens), vec!["x", "=", "3", "4"]);
        assert_eq!(diagnostics.messages(), vec!["invalid token: $"]);
        assert!(diagnostics.iter().all(|diagnostic| diagnostic.position.is_none()));
    }

    #[test]
    fn identifiers_accept_letters_of_any_script() {
        let (tokens, diagnostics) = tokenize("héllo = 1
π2 = größe
printé");

        assert!(diagnostics.is_empty());
        assert_eq!(texts(&tokens), vec!["héllo", "=", "1", "π2", "=", "größe", "printé"]);
        assert_eq!(kinds(&tokens)[6], TokenKind::Identifier);
        assert_eq!(tokens[2].column, 9);
    }

    #[test]
    fn vertical_tab_and_carriage_return_are_whitespace() {
        let (tokens, diagnostics) = tokenize("1\x0B+\r\n2");

        assert!(diagnostics.is_empty());
        assert_eq!(texts(&tokens), vec!["1", "+", "2"]);
        assert_eq!(tokens[2].row, 2);
    }
}
