use std::{fmt, mem};

use crate::util::stack::ensure_sufficient_stack;

/// An abstract syntax tree (AST) node representing an expression.
///
/// The tree is strictly owned top-down: each [`Expr::BinaryOperation`] owns
/// both of its children and nothing points back up, so a statement's tree is
/// dropped as a unit once the statement has run.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal or variable reference, kept as written.
    ///
    /// A unary sign is folded into the text, so `-x` and `+2.5` are both
    /// single operands.
    Operand(String),
    /// Two sub-expressions combined by an operator.
    BinaryOperation {
        /// Left operand, evaluated first.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
}

impl Expr {
    /// Builds an operand leaf.
    #[must_use]
    pub fn operand(text: impl Into<String>) -> Self {
        Self::Operand(text.into())
    }

    /// Builds a binary node from two owned children.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOperator, right: Self) -> Self {
        Self::BinaryOperation { left: Box::new(left),
                                op,
                                right: Box::new(right) }
    }

    /// Counts the binary operations in the tree.
    ///
    /// ## Example
    /// ```
    /// use xlang::ast::{BinaryOperator, Expr};
    ///
    /// let expr = Expr::binary(Expr::operand("1"),
    ///                         BinaryOperator::Add,
    ///                         Expr::binary(Expr::operand("2"), BinaryOperator::Mul, Expr::operand("3")));
    ///
    /// assert_eq!(expr.operation_count(), 2);
    /// ```
    #[must_use]
    pub fn operation_count(&self) -> usize {
        ensure_sufficient_stack(|| match self {
            Self::Operand(_) => 0,
            Self::BinaryOperation { left, right, .. } => {
                1 + left.operation_count() + right.operation_count()
            },
        })
    }
}

/// Tears the tree down with an explicit work list, so dropping a long
/// operator chain does not recurse once per level.
impl Drop for Expr {
    fn drop(&mut self) {
        fn detach(expr: &mut Expr, pending: &mut Vec<Expr>) {
            if let Expr::BinaryOperation { left, right, .. } = expr {
                pending.push(mem::replace(left.as_mut(), Expr::Operand(String::new())));
                pending.push(mem::replace(right.as_mut(), Expr::Operand(String::new())));
            }
        }

        let mut pending = Vec::new();
        detach(self, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach(&mut expr, &mut pending);
        }
    }
}

/// Renders the tree fully parenthesized, e.g. `((x + 20) * 2)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Self::Operand(text) => write!(f, "{text}"),
            Self::BinaryOperation { left, op, right } => write!(f, "({left} {op} {right})"),
        })
    }
}

/// Represents a top-level statement.
///
/// Statements are segmented from the token stream one source line at a time,
/// except that a line break inside an open parenthesis group continues the
/// current statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `print <expr>`: evaluated in trace mode.
    Print(Expr),
    /// `<name> = <expr>`: binds or rebinds a variable.
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
    },
    /// A standalone expression whose value is printed.
    Expression(Expr),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Print(expr) => write!(f, "print {expr}"),
            Self::Assignment { name, value } => write!(f, "{name} = {value}"),
            Self::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Modulo (`%`)
    Mod,
}

/// The priority groups used when looking for the operator to split an
/// expression at.
///
/// Variants are ordered from the loosest binding to the tightest: an
/// expression is split at an additive operator if it has one at the top level,
/// then at a multiplicative one, then at any other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// `+` and `-`
    Additive,
    /// `*` and `/`
    Multiplicative,
    /// `%` and `^`
    Other,
}

impl BinaryOperator {
    /// Looks up the operator spelled by `symbol`.
    ///
    /// `=` is an operator token but not a binary operator, so it yields
    /// `None` like any other text.
    ///
    /// ## Example
    /// ```
    /// use xlang::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_symbol("^"), Some(BinaryOperator::Pow));
    /// assert_eq!(BinaryOperator::from_symbol("="), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "^" => Some(Self::Pow),
            "%" => Some(Self::Mod),
            _ => None,
        }
    }

    /// The source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Mod => "%",
        }
    }

    #[must_use]
    pub const fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Additive,
            Self::Mul | Self::Div => Precedence::Multiplicative,
            Self::Pow | Self::Mod => Precedence::Other,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
