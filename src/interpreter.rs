/// The evaluator module executes statements and computes results.
///
/// The evaluator walks the statement list in order, evaluates expression
/// trees, performs the arithmetic, manages variable state, and produces the
/// program output. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates expression trees, applying the integer truncation rule.
/// - Handles variable assignment and lookup.
/// - Reports runtime errors such as undefined variables or division by zero
///   on the output channel, cancelling only the current statement.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a numeric literal, identifier, keyword, operator or
/// parenthesis, tagged with its row and column. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Tracks parenthesis balance across the whole input.
/// - Reports lexical diagnostics for invalid characters and unbalanced
///   parentheses.
pub mod lexer;
/// The parser module builds expression trees from tokens.
///
/// Tokens are segmented into statements by row and parenthesis nesting, then
/// each expression is split recursively at its lowest-precedence top-level
/// operator.
///
/// # Responsibilities
/// - Classifies print, assignment and expression statements.
/// - Reports syntax diagnostics with their positions.
/// - Marks statements that fail to build as absent instead of stopping.
pub mod parser;
/// The value module defines the runtime numeric type.
///
/// Every expression evaluates to a `Value`, either an integer or a real, and
/// the tags of the operands decide the tag of the result.
pub mod value;
