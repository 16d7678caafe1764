use crate::{
    ast::{BinaryOperator, Expr, Precedence},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::Builder,
    },
    util::stack::ensure_sufficient_stack,
};

impl Builder {
    /// Builds an expression tree from a token range.
    ///
    /// The range is split at the operator returned by [`find_split`]; each
    /// side is built recursively, left first. Ranges without a top-level
    /// operator are operand groups.
    ///
    /// Both sides are always built, so every problem in the range is
    /// reported, but a single failure anywhere makes the whole tree absent.
    ///
    /// # Parameters
    /// - `tokens`: The tokens of the expression. May be empty.
    /// - `anchor`: The token just before the range, used to position an
    ///   "expression missing" diagnostic when the range is empty.
    ///
    /// # Returns
    /// The expression tree, or `None` if it could not be built.
    pub fn build_expression(&mut self, tokens: &[Token], anchor: &Token) -> Option<Expr> {
        ensure_sufficient_stack(|| {
            let Some(index) = find_split(tokens) else {
                return self.build_operand_group(tokens, anchor);
            };

            let operator = &tokens[index];
            let op = BinaryOperator::from_symbol(&operator.text)?;

            let left = self.build_expression(&tokens[..index], operator);
            let right = self.build_expression(&tokens[index + 1..], operator);

            Some(Expr::binary(left?, op, right?))
        })
    }
}

/// Finds the operator a token range should be split at.
///
/// Tokens are scanned from right to left and anything inside parentheses is
/// skipped. The first additive operator met (so the rightmost one) wins
/// immediately. Otherwise the rightmost multiplicative operator is used, and
/// failing that the rightmost `%` or `^`.
///
/// A `+` or `-` only counts as additive in binary position, meaning it is not
/// the first token and does not follow another operator. In any other
/// position it is a sign and belongs to the operand after it.
///
/// # Parameters
/// - `tokens`: The tokens of one expression.
///
/// # Returns
/// The index of the splitting operator, or `None` if the range has no
/// top-level binary operator.
///
/// # Example
/// ```
/// use xlang::interpreter::{lexer::tokenize, parser::binary::find_split};
///
/// let (tokens, _) = tokenize("2 * (3 + 4) - 1 - 5");
/// assert_eq!(find_split(&tokens), Some(9));
///
/// let (tokens, _) = tokenize("2 ^ 3 * -4");
/// assert_eq!(find_split(&tokens), Some(3));
///
/// let (tokens, _) = tokenize("(1 + 2)");
/// assert_eq!(find_split(&tokens), None);
/// ```
#[must_use]
pub fn find_split(tokens: &[Token]) -> Option<usize> {
    let mut nesting: isize = 0;
    let mut multiplicative = None;
    let mut other = None;

    for (index, token) in tokens.iter().enumerate().rev() {
        if token.is_close_paren() {
            nesting += 1;
            continue;
        }
        if token.is_open_paren() {
            nesting -= 1;
            continue;
        }
        if nesting != 0 || token.kind != TokenKind::Operator {
            continue;
        }

        let Some(op) = BinaryOperator::from_symbol(&token.text) else {
            continue;
        };

        match op.precedence() {
            Precedence::Additive => {
                if is_binary_position(tokens, index) {
                    return Some(index);
                }
            },
            Precedence::Multiplicative => {
                multiplicative.get_or_insert(index);
            },
            Precedence::Other => {
                other.get_or_insert(index);
            },
        }
    }

    multiplicative.or(other)
}

fn is_binary_position(tokens: &[Token], index: usize) -> bool {
    index > 0 && tokens[index - 1].kind != TokenKind::Operator
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        ast::Statement,
        interpreter::{lexer::tokenize, parser::core::build},
    };

    fn tree(source: &str) -> String {
        let (tokens, _) = tokenize(source);
        let (statements, diagnostics) = build(&tokens);

        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics}");
        statements[0].as_ref()
                     .map_or_else(|| "<absent>".to_string(), ToString::to_string)
    }

    fn diagnostics(source: &str) -> Vec<String> {
        let (tokens, _) = tokenize(source);
        build(&tokens).1.messages()
    }

    #[test]
    fn additive_splits_before_multiplicative() {
        assert_eq!(tree("2 + 3 * 4"), "(2 + (3 * 4))");
        assert_eq!(tree("2 * 3 + 4"), "((2 * 3) + 4)");
        assert_eq!(tree("1 + 2 * 3 - 4 / 5"), "((1 + (2 * 3)) - (4 / 5))");
    }

    #[test]
    fn rightmost_operator_of_a_tier_is_the_root() {
        assert_eq!(tree("10 - 2 - 3"), "((10 - 2) - 3)");
        assert_eq!(tree("100 / 10 / 5"), "((100 / 10) / 5)");
        assert_eq!(tree("2 ^ 3 ^ 2"), "((2 ^ 3) ^ 2)");
    }

    #[test]
    fn other_operators_bind_tighter_than_multiplicative() {
        assert_eq!(tree("7 * 3 % 4"), "(7 * (3 % 4))");
        assert_eq!(tree("2 * 3 ^ 2"), "(2 * (3 ^ 2))");
        assert_eq!(tree("1 + 2 ^ 2 % 3"), "(1 + ((2 ^ 2) % 3))");
    }

    #[test]
    fn parentheses_are_skipped_and_stripped() {
        assert_eq!(tree("(2 + 3) * 4"), "((2 + 3) * 4)");
        assert_eq!(tree("((((5))))"), "5");
        assert_eq!(tree("(1 + 2) * (3 - (4 / 2))"), "((1 + 2) * (3 - (4 / 2)))");
    }

    #[test]
    fn signs_in_unary_position_belong_to_the_operand() {
        assert_eq!(tree("-5"), "-5");
        assert_eq!(tree("2 * -3"), "(2 * -3)");
        assert_eq!(tree("1 - -x"), "(1 - -x)");
        assert_eq!(tree("+2.5 ^ -1"), "(+2.5 ^ -1)");
    }

    #[test]
    fn operator_without_right_operand_is_missing_an_expression() {
        assert_eq!(diagnostics("1 +"), vec!["1:3 expression missing"]);
        assert_eq!(diagnostics("* 2"), vec!["1:1 expression missing"]);
        assert_eq!(diagnostics("()"), vec!["1:1 expression missing"]);
    }

    #[test]
    fn long_chains_build_a_left_leaning_tree() {
        let (tokens, _) = tokenize(&vec!["x"; 10_000].join(" - "));
        let (statements, diagnostics) = build(&tokens);

        assert!(diagnostics.is_empty());
        let Some(Statement::Expression(expr)) = &statements[0] else {
            panic!("expected an expression statement");
        };
        assert_eq!(expr.operation_count(), 9_999);
    }

    #[test]
    fn equals_is_not_a_binary_operator() {
        assert_eq!(diagnostics("x = 1 = 2"), vec!["1:9 invalid syntax"]);
    }
}
