use crate::{
    ast::Expr,
    error::DiagnosticKind,
    interpreter::{lexer::Token, parser::core::Builder},
};

impl Builder {
    /// Builds a token range that has no top-level binary operator.
    ///
    /// Accepted shapes:
    /// - `( <expr> )` where the first parenthesis closes on the last token:
    ///   the parentheses are stripped and the inside is built as an
    ///   expression;
    /// - `<operand>`: a literal or identifier leaf;
    /// - `+ <operand>` or `- <operand>`: a leaf whose text carries the sign.
    ///
    /// Anything longer is reported as invalid syntax at its third token, and
    /// an empty range as a missing expression at `anchor`.
    ///
    /// # Parameters
    /// - `tokens`: The tokens of the group.
    /// - `anchor`: The token just before the group.
    ///
    /// # Returns
    /// The operand, or `None` if the group is malformed.
    pub fn build_operand_group(&mut self, tokens: &[Token], anchor: &Token) -> Option<Expr> {
        match tokens {
            [] => {
                self.report(anchor, DiagnosticKind::ExpressionMissing);
                None
            },
            [open, inner @ .., _]
                if open.is_open_paren() && closing_index(tokens) == Some(tokens.len() - 1) =>
            {
                self.build_expression(inner, open)
            },
            [token] => self.build_leaf(token),
            [sign, operand] => self.build_signed(sign, operand),
            [_, _, third, ..] => {
                self.report(third, DiagnosticKind::InvalidSyntax);
                None
            },
        }
    }

    fn build_leaf(&mut self, token: &Token) -> Option<Expr> {
        if !token.is_operand() {
            self.report(token, DiagnosticKind::InvalidSyntax);
            return None;
        }

        Some(Expr::operand(token.text.as_str()))
    }

    fn build_signed(&mut self, sign: &Token, operand: &Token) -> Option<Expr> {
        if !(sign.is_operator("+") || sign.is_operator("-")) {
            self.report(sign, DiagnosticKind::InvalidSyntax);
            return None;
        }
        if !operand.is_operand() {
            self.report(operand, DiagnosticKind::InvalidSyntax);
            return None;
        }

        Some(Expr::operand(format!("{}{}", sign.text, operand.text)))
    }
}

/// Returns the index of the parenthesis closing the one `tokens` starts with.
fn closing_index(tokens: &[Token]) -> Option<usize> {
    let mut nesting = 0_usize;

    for (index, token) in tokens.iter().enumerate() {
        if token.is_open_paren() {
            nesting += 1;
        } else if token.is_close_paren() {
            nesting = nesting.checked_sub(1)?;
            if nesting == 0 {
                return Some(index);
            }
        }
    }

    None
}
